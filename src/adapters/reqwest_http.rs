//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production HTTP client implementation using
//! reqwest, implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, Response, TransportError};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use frest::adapters::ReqwestHttpClient;
/// use frest::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.get("https://api.example.com/me", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings (no timeout).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client that gives up on requests after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self { client })
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to TransportError.
    fn convert_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidUrl(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<Response, TransportError> {
        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, TransportError> {
        let builder = Self::apply_headers(self.client.get(url), headers);
        Self::send(builder).await
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);
        Self::send(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_default() {
        let client = ReqwestHttpClient::default();
        let _ = client.inner();
    }

    #[test]
    fn test_reqwest_http_client_with_timeout() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_convert_headers() {
        let mut header_map = reqwest::header::HeaderMap::new();
        header_map.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        header_map.insert(reqwest::header::CONTENT_LENGTH, "100".parse().unwrap());

        let headers = ReqwestHttpClient::convert_headers(&header_map);
        assert_eq!(
            headers.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(headers.get("content-length"), Some(&"100".to_string()));
    }

    #[tokio::test]
    async fn test_get_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client.get("not-a-valid-url", &Headers::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_post_connection_refused() {
        let client = ReqwestHttpClient::new();
        // Use a port that's unlikely to be in use
        let result = client
            .post("http://127.0.0.1:59999/api/auth/login", "{}", &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(TransportError::ConnectionFailed(_)) | Err(TransportError::Other(_))
        ));
    }
}
