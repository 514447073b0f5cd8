//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryStorage`] - in-memory key-value storage

pub mod http;
pub mod storage;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::InMemoryStorage;
