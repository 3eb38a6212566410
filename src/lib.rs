//! # Aria Verifier
//!
//! `aria-verifier` is a small HTTP relay that runs expensive Argon2 password checks on
//! behalf of an upstream service. It exposes exactly one endpoint, `POST /`, and protects it
//! two ways:
//!
//! 1. **Mutual HMAC.** The caller signs the raw request body with the request secret
//!    (`X-Aria-Request-Sig`). Every response body, including rejections, is signed with a
//!    separate response secret (`X-Aria-Response-Sig`) so the caller can trust the verdict.
//! 2. **Latency floor.** The verification is padded to a fixed minimum duration (250 ms by
//!    default) on every outcome, so response timing does not reveal whether a hash matched,
//!    mismatched or was rejected early.
//!
//! ## Request flow
//!
//! ```text
//! raw bytes -> signature check -> JSON parse -> argon2 verify (padded) -> reply -> response signature
//! ```
//!
//! The signature check runs on the raw bytes before parsing, and the parser reads the same
//! bytes, so what was signed is exactly what gets verified.
//!
//! ## Tuning
//!
//! The floor must stay above the fastest legitimate branch. When the Argon2 work factor of
//! stored hashes changes, measure again and adjust `--min-latency-ms`.

pub mod cli;
pub mod verifier;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
