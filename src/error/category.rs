//! Error category classification.
//!
//! High-level categorization of errors to drive retry decisions and the
//! wording the form layer shows to the user.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, DNS, timeout).
    /// Generally transient and retryable.
    Network,

    /// Authentication errors: bad credentials, unusable token.
    Auth,

    /// Backend errors (HTTP 5xx). Retryable after a delay.
    Server,

    /// Client-side errors: the request itself was rejected (4xx other than
    /// auth) or the server answered with something we cannot use.
    Client,

    /// Local storage or OS errors.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Sign out and sign back in",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "This may be a bug. Please report it if it persists",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Auth.to_string(), "auth");
        assert_eq!(ErrorCategory::Network.to_string(), "network");
    }

    #[test]
    fn test_recovery_hint_per_category() {
        assert!(ErrorCategory::Network.recovery_hint().contains("internet connection"));
        assert!(ErrorCategory::Auth.recovery_hint().contains("sign back in"));
        assert!(ErrorCategory::System.recovery_hint().contains("disk space"));
    }
}
