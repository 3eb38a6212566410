//! Command line front end: argument parsing, telemetry setup and the server action.

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod globals;
pub mod telemetry;

mod start;
pub use self::start::start;
