//! Unified error type for session operations.

use thiserror::Error;

use super::auth::{AuthRequestError, DecodeError};
use super::category::ErrorCategory;
use crate::traits::{StorageError, TransportError};

/// Error returned by the session manager and its collaborators.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The stored token could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Login/signup was rejected by the server
    #[error(transparent)]
    AuthRequest(#[from] AuthRequestError),

    /// No usable response from the server
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Client storage could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::Decode(_) => ErrorCategory::Auth,
            SessionError::AuthRequest(e) if e.is_unauthorized() => ErrorCategory::Auth,
            SessionError::AuthRequest(e) if e.status >= 500 => ErrorCategory::Server,
            SessionError::AuthRequest(_) => ErrorCategory::Client,
            SessionError::Transport(TransportError::InvalidResponse(_)) => ErrorCategory::Client,
            SessionError::Transport(TransportError::InvalidUrl(_)) => ErrorCategory::Client,
            SessionError::Transport(_) => ErrorCategory::Network,
            SessionError::Storage(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Decode(_) => "E_DECODE",
            SessionError::AuthRequest(_) => "E_AUTH_REQUEST",
            SessionError::Transport(TransportError::Timeout(_)) => "E_NET_TIMEOUT",
            SessionError::Transport(_) => "E_TRANSPORT",
            SessionError::Storage(_) => "E_STORAGE",
        }
    }

    /// Get a message suitable for showing next to the login form.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Decode(_) => {
                "Your stored session is unreadable. Please sign in again.".to_string()
            }
            SessionError::AuthRequest(e) => e.message.clone(),
            SessionError::Transport(TransportError::Timeout(_)) => {
                "The server took too long to respond.".to_string()
            }
            SessionError::Transport(_) => "Could not reach the server.".to_string(),
            SessionError::Storage(_) => "Could not access local session storage.".to_string(),
        }
    }
}
