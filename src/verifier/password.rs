//! The protected operation: checking a candidate password against a stored hash.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordVerifier},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task;
use utoipa::ToSchema;

/// Parsed body of a verification request.
#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Candidate password supplied by the end user.
    #[schema(value_type = String)]
    pub input_password: SecretString,
    /// PHC-formatted hash previously stored for the account.
    pub hashed_value: String,
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("malformed password hash: {0}")]
    MalformedHash(password_hash::Error),
    #[error("unsupported password hash: {0}")]
    UnsupportedHash(password_hash::Error),
    #[error("verification worker failed: {0}")]
    Worker(String),
}

impl VerificationError {
    /// Static class name, safe to log.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::MalformedHash(_) => "malformed_hash",
            Self::UnsupportedHash(_) => "unsupported_hash",
            Self::Worker(_) => "worker",
        }
    }
}

#[derive(Debug)]
pub enum VerificationOutcome {
    Match,
    Mismatch,
    Error(VerificationError),
}

impl VerificationOutcome {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Capability that checks a password against a stored hash.
///
/// Implementations run on the blocking pool and may take as long as the hash's work
/// factor demands.
pub trait PasswordCheck: Send + Sync + 'static {
    /// # Errors
    /// Returns an error if `stored_hash` is not a hash this check can evaluate.
    fn check(&self, candidate: &[u8], stored_hash: &str) -> Result<bool, VerificationError>;
}

/// Argon2 (`argon2d`, `argon2i`, `argon2id`) using the parameters embedded in the PHC string.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Check;

impl PasswordCheck for Argon2Check {
    fn check(&self, candidate: &[u8], stored_hash: &str) -> Result<bool, VerificationError> {
        let parsed = PasswordHash::new(stored_hash).map_err(VerificationError::MalformedHash)?;

        // A PHC string without salt or output parses fine but can never verify.
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(VerificationError::MalformedHash(
                password_hash::Error::PhcStringField,
            ));
        }

        match Argon2::default().verify_password(candidate, &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(VerificationError::UnsupportedHash(err)),
        }
    }
}

#[derive(Clone)]
pub struct VerificationService {
    check: Arc<dyn PasswordCheck>,
}

impl VerificationService {
    pub fn new<C: PasswordCheck>(check: C) -> Self {
        Self {
            check: Arc::new(check),
        }
    }

    /// Run the check on the blocking pool and fold every result into an outcome.
    pub async fn verify(&self, request: VerificationRequest) -> VerificationOutcome {
        let check = Arc::clone(&self.check);
        let VerificationRequest {
            input_password,
            hashed_value,
        } = request;

        let joined = task::spawn_blocking(move || {
            check.check(input_password.expose_secret().as_bytes(), &hashed_value)
        })
        .await;

        match joined {
            Ok(Ok(true)) => VerificationOutcome::Match,
            Ok(Ok(false)) => VerificationOutcome::Mismatch,
            Ok(Err(err)) => VerificationOutcome::Error(err),
            Err(err) => VerificationOutcome::Error(VerificationError::Worker(err.to_string())),
        }
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::new(Argon2Check)
    }
}

impl std::fmt::Debug for VerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationService").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::{Algorithm, Params, PasswordHasher, Version, password_hash::SaltString};

    /// Cheap Argon2id hash so tests stay fast.
    fn hash(password: &str) -> String {
        let params = Params::new(1024, 1, 1, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::encode_b64(b"aria-test-salt").unwrap();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn request(password: &str, hashed_value: &str) -> VerificationRequest {
        VerificationRequest {
            input_password: SecretString::from(password),
            hashed_value: hashed_value.to_string(),
        }
    }

    #[test]
    fn argon2_check_matches_and_mismatches() {
        let stored = hash("correct");
        assert!(Argon2Check.check(b"correct", &stored).unwrap());
        assert!(!Argon2Check.check(b"wrong", &stored).unwrap());
    }

    #[test]
    fn argon2_check_rejects_malformed_hash() {
        let err = Argon2Check.check(b"correct", "not-a-hash").unwrap_err();
        assert_eq!(err.class(), "malformed_hash");
    }

    #[test]
    fn argon2_check_rejects_foreign_algorithm() {
        let err = Argon2Check
            .check(b"correct", "$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA")
            .unwrap_err();
        assert_eq!(err.class(), "unsupported_hash");
    }

    #[tokio::test]
    async fn service_outcomes() {
        let service = VerificationService::default();
        let stored = hash("correct");

        assert!(matches!(
            service.verify(request("correct", &stored)).await,
            VerificationOutcome::Match
        ));
        assert!(matches!(
            service.verify(request("wrong", &stored)).await,
            VerificationOutcome::Mismatch
        ));
        assert!(matches!(
            service.verify(request("correct", "$argon2id$garbage")).await,
            VerificationOutcome::Error(VerificationError::MalformedHash(_))
        ));
    }

    #[tokio::test]
    async fn repeated_verification_is_idempotent() {
        let service = VerificationService::default();
        let stored = hash("correct");

        for _ in 0..3 {
            assert!(service.verify(request("correct", &stored)).await.is_match());
            assert!(!service.verify(request("nope", &stored)).await.is_match());
        }
    }

    struct PanickingCheck;

    impl PasswordCheck for PanickingCheck {
        fn check(&self, _: &[u8], _: &str) -> Result<bool, VerificationError> {
            panic!("boom")
        }
    }

    #[tokio::test]
    async fn worker_panic_becomes_error_outcome() {
        let service = VerificationService::new(PanickingCheck);
        let outcome = service.verify(request("a", "b")).await;
        match outcome {
            VerificationOutcome::Error(err) => assert_eq!(err.class(), "worker"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn request_debug_redacts_password() {
        let rendered = format!("{:?}", request("hunter2", "$argon2id$"));
        assert!(!rendered.contains("hunter2"));
    }
}
