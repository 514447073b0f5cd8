//! Error handling for the session manager.
//!
//! - **Domain errors**: [`DecodeError`], [`AuthRequestError`], and the
//!   transport/storage errors defined next to their traits
//! - **Unified error**: [`SessionError`] wraps all of them
//! - **Categories**: [`ErrorCategory`] drives retry and messaging decisions
//!
//! | Error | Category | Retryable |
//! |-------|----------|-----------|
//! | Decode | Auth | No |
//! | AuthRequest 401/403 | Auth | No |
//! | AuthRequest 5xx | Server | Yes |
//! | Transport | Network | Yes |
//! | Storage | System | No |

mod auth;
mod category;
mod session_error;

pub use auth::{AuthRequestError, DecodeError};
pub use category::ErrorCategory;
pub use session_error::SessionError;

/// Result alias used across the crate.
pub type SessionResult<T> = Result<T, SessionError>;
