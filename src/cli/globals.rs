use crate::verifier::{compare::constant_time_eq, signature::SigningKeys};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};

/// Shared secrets, read once at startup.
#[derive(Clone)]
pub struct GlobalArgs {
    pub request_secret: SecretString,
    pub response_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(request_secret: SecretString, response_secret: SecretString) -> Self {
        Self {
            request_secret,
            response_secret,
        }
    }

    /// Turn both secrets into HMAC signers.
    /// # Errors
    /// Returns an error if a secret cannot key HMAC-SHA256.
    pub fn signing_keys(&self) -> Result<SigningKeys> {
        SigningKeys::new(&self.request_secret, &self.response_secret)
            .context("Failed to initialize signing keys")
    }

    /// Both directions keyed with the same secret defeats the point of having two.
    #[must_use]
    pub fn secrets_identical(&self) -> bool {
        constant_time_eq(
            self.request_secret.expose_secret().as_bytes(),
            self.response_secret.expose_secret().as_bytes(),
        )
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("request_secret", &"***")
            .field("response_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("in"), SecretString::from("out"));
        assert_eq!(args.request_secret.expose_secret(), "in");
        assert_eq!(args.response_secret.expose_secret(), "out");
        assert!(!args.secrets_identical());
        assert!(args.signing_keys().is_ok());
    }

    #[test]
    fn test_identical_secrets() {
        let args = GlobalArgs::new(SecretString::from("same"), SecretString::from("same"));
        assert!(args.secrets_identical());
    }

    #[test]
    fn test_debug_redacts() {
        let args = GlobalArgs::new(
            SecretString::from("request-value"),
            SecretString::from("response-value"),
        );
        let rendered = format!("{args:?}");
        assert!(!rendered.contains("request-value"));
        assert!(!rendered.contains("response-value"));
    }
}
