//! Shared-secret guard for parcel routes.
//!
//! Callers present the secret in the `X-API-Key` header. The configured key
//! is hashed on construction and the plaintext is zeroized; comparisons run
//! over every byte of the SHA-256 digests, so the comparison time does not
//! depend on where the first mismatch occurs. Only a truncated fingerprint is
//! ever logged.

use std::fmt;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::Error;

use super::state::HttpState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Error returned when constructing an [`ApiKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("API key must not be empty")]
pub struct EmptyApiKey;

/// Configured shared secret, retained only as its SHA-256 digest.
#[derive(Clone)]
pub struct ApiKey {
    digest: [u8; 32],
}

fn digest(value: &[u8]) -> [u8; 32] {
    Sha256::digest(value).into()
}

impl ApiKey {
    /// Wrap a secret, rejecting blank values.
    ///
    /// # Examples
    /// ```
    /// use swissparcel::inbound::http::api_key::ApiKey;
    ///
    /// let key = ApiKey::new("SUPER_ALEX").expect("non-empty key");
    /// assert!(key.matches("SUPER_ALEX"));
    /// assert!(!key.matches("super_alex"));
    /// ```
    pub fn new(secret: impl Into<String>) -> Result<Self, EmptyApiKey> {
        let secret = Zeroizing::new(secret.into());
        if secret.trim().is_empty() {
            return Err(EmptyApiKey);
        }
        Ok(Self {
            digest: digest(secret.as_bytes()),
        })
    }

    /// Whether `presented` equals the configured secret.
    #[must_use]
    pub fn matches(&self, presented: &str) -> bool {
        let candidate = digest(presented.as_bytes());
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right))
            == 0
    }

    /// First eight bytes of the SHA-256 digest, hex encoded.
    ///
    /// Safe to log: identifies which key is active without revealing it.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(self.digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Marker extractor proving the request carried the configured API key.
///
/// Handlers take `_auth: Authorised` as an argument; extraction fails with
/// `403 forbidden` when the header is missing or wrong.
#[derive(Debug, Clone, Copy)]
pub struct Authorised;

fn authorise(req: &HttpRequest) -> Result<Authorised, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(value) if state.api_key.matches(value) => Ok(Authorised),
        Some(_) => {
            warn!(path = req.path(), "rejected request with an invalid API key");
            Err(Error::forbidden("invalid API key"))
        }
        None => {
            warn!(path = req.path(), "rejected request without an API key");
            Err(Error::forbidden("missing API key"))
        }
    }
}

impl FromRequest for Authorised {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorise(req))
    }
}
