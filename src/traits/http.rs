//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the outbound transport, enabling
//! dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response whose body is the serialized JSON value.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(status, headers, Bytes::from(value.to_string()))
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport failures: no usable response came back from the server.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The server answered, but the body could not be used
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client, the
/// intercepting wrapper that applies registered request rules, and a mock
/// client for tests.
///
/// # Example
///
/// ```ignore
/// use frest::traits::{HttpClient, Headers};
///
/// async fn fetch<C: HttpClient>(client: &C) -> Result<String, TransportError> {
///     let response = client.get("https://api.example.com/me", &Headers::new()).await?;
///     response.text().map_err(|e| TransportError::InvalidResponse(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, TransportError>;

    /// Perform a POST request with a string body.
    ///
    /// Non-2xx statuses are returned as `Ok(Response)`; only transport
    /// failures become errors.
    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new() {
        let response = Response::new(200, Bytes::from("Hello"));
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, Bytes::from("Hello"));
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(Response::new(299, Bytes::new()).is_success());
        assert!(!Response::new(300, Bytes::new()).is_success());
        assert!(!Response::new(401, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json_body() {
        let response = Response::json_body(401, &serde_json::json!({"message": "nope"}));
        assert_eq!(
            response.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["message"], "nope");
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            TransportError::Timeout("30s".to_string()).to_string(),
            "Request timeout: 30s"
        );
        assert_eq!(
            TransportError::InvalidResponse("missing token".to_string()).to_string(),
            "Invalid response: missing token"
        );
    }
}
