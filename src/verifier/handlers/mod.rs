pub mod fallback;
pub use self::fallback::{method_not_allowed, not_found};

pub mod reply;
pub use self::reply::{ErrorCode, Rejection, Reply};

pub mod sign;
pub use self::sign::sign_response;

pub mod verify;
pub use self::verify::verify;
