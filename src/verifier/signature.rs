//! Mutual HMAC-SHA256 envelope for request and response bodies.
//!
//! Requests are signed by the caller with the request secret and responses are signed by us
//! with the response secret. Keeping one key per direction means a leaked request secret is
//! not enough to forge responses, and the other way around.

use crate::verifier::compare::constant_time_eq;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

pub const REQUEST_SIGNATURE_HEADER: &str = "x-aria-request-sig";
pub const RESPONSE_SIGNATURE_HEADER: &str = "x-aria-response-sig";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid HMAC key")]
    InvalidKey,
}

/// HMAC-SHA256 keyed once, reused for every message.
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha256,
}

impl HmacSigner {
    /// # Errors
    /// Returns an error if the key cannot initialize HMAC-SHA256.
    pub fn new(key: &[u8]) -> Result<Self, SignatureError> {
        let mac = HmacSha256::new_from_slice(key).map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self { mac })
    }

    /// Lowercase hex digest of `message`.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

/// Sign `message` with `key`, returning the hex digest.
///
/// # Errors
/// Returns an error if the key cannot initialize HMAC-SHA256.
pub fn sign(message: &[u8], key: &[u8]) -> Result<String, SignatureError> {
    Ok(HmacSigner::new(key)?.sign(message))
}

/// The two directional signers, built once at startup.
#[derive(Clone, Debug)]
pub struct SigningKeys {
    request: HmacSigner,
    response: HmacSigner,
}

impl SigningKeys {
    /// # Errors
    /// Returns an error if either secret cannot key HMAC-SHA256.
    pub fn new(
        request_secret: &SecretString,
        response_secret: &SecretString,
    ) -> Result<Self, SignatureError> {
        Ok(Self {
            request: HmacSigner::new(request_secret.expose_secret().as_bytes())?,
            response: HmacSigner::new(response_secret.expose_secret().as_bytes())?,
        })
    }

    /// Check the claimed request signature against the raw body.
    ///
    /// Compares the hex representations, so an uppercase or padded claim is a mismatch.
    /// An empty claim can never match a digest.
    #[must_use]
    pub fn verify_inbound(&self, raw_body: &[u8], claimed_signature: &[u8]) -> bool {
        let expected = self.request.sign(raw_body);
        constant_time_eq(expected.as_bytes(), claimed_signature)
    }

    /// Signature for the final response body.
    #[must_use]
    pub fn sign_outbound(&self, raw_response_body: &[u8]) -> String {
        self.response.sign(raw_response_body)
    }
}
