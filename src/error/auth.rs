//! Authentication-related error types.

use thiserror::Error;

/// The stored token could not be decoded into claims.
///
/// Distinct from an expired or not-yet-valid token: those decode fine and
/// simply fail the time checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The token is not `header.payload.signature`
    #[error("token is malformed: expected 3 segments, found {segments}")]
    Malformed { segments: usize },

    /// The payload segment is not valid base64url
    #[error("token payload is not valid base64url: {0}")]
    Base64(String),

    /// The payload decoded but is not a claims object
    #[error("token claims are invalid: {0}")]
    Claims(String),
}

/// Login or signup was answered with a non-success status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("authentication request failed ({status}): {message}")]
pub struct AuthRequestError {
    /// HTTP status returned by the server
    pub status: u16,
    /// Message from the server's error payload
    pub message: String,
}

impl AuthRequestError {
    /// Whether the server rejected the credentials themselves.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}
