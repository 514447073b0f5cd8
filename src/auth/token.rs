//! Stored credential token decoding and time-bound validation.
//!
//! Tokens are JWTs in compact form. Only the payload segment is decoded; the
//! signature cannot be checked client-side and is ignored.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::{DecodeError, SessionResult};
use crate::traits::KeyValueStorage;

/// Storage key holding the credential token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Decoded token claims.
///
/// Only `exp` and `nbf` are interpreted; everything else is kept for
/// diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiry, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// Not-before, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of checking claims against a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    NotYetValid,
}

impl Claims {
    /// Check the time-bound claims at `now` (fractional epoch seconds).
    ///
    /// Expiry is checked first, so a token that is both expired and not yet
    /// valid reports `Expired`.
    pub fn status_at(&self, now: f64) -> TokenStatus {
        if matches!(self.exp, Some(exp) if exp < now) {
            return TokenStatus::Expired;
        }
        if matches!(self.nbf, Some(nbf) if nbf > now) {
            return TokenStatus::NotYetValid;
        }
        TokenStatus::Valid
    }

    fn to_log_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Decode the payload segment of a compact JWT into [`Claims`].
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Malformed {
            segments: segments.len(),
        });
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    serde_json::from_slice(&payload).map_err(|e| DecodeError::Claims(e.to_string()))
}

/// Current time as fractional seconds since the Unix epoch.
pub fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Decides from storage content whether the stored credential is usable.
#[derive(Debug)]
pub struct TokenValidator<S: ?Sized> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage + ?Sized> TokenValidator<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Validate the stored token against the current time.
    pub fn validate(&self) -> SessionResult<bool> {
        self.validate_at(now_seconds())
    }

    /// Validate the stored token against `now` (fractional epoch seconds).
    ///
    /// A missing or empty token is `Ok(false)` without decoding. An expired
    /// or not-yet-valid token is `Ok(false)` with a warning carrying the
    /// claims. A token that does not decode is an error.
    pub fn validate_at(&self, now: f64) -> SessionResult<bool> {
        let token = match self.storage.get_item(ACCESS_TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(false),
        };

        let claims = decode_claims(&token)?;
        match claims.status_at(now) {
            TokenStatus::Valid => Ok(true),
            TokenStatus::Expired => {
                warn!(claims = %claims.to_log_string(), "token expired");
                Ok(false)
            }
            TokenStatus::NotYetValid => {
                warn!(claims = %claims.to_log_string(), "token not yet valid");
                Ok(false)
            }
        }
    }

    /// Read the raw stored token, if any.
    pub fn stored_token(&self) -> SessionResult<Option<String>> {
        Ok(self
            .storage
            .get_item(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }
}

/// Build an unsigned compact token carrying `claims`.
///
/// Used by tests and benchmarks to fabricate stored credentials.
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.sig", header, payload)
}
