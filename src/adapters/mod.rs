//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`InterceptingClient`] - transport wrapper that applies request rules
//! - [`FileStorage`] - JSON-file key-value storage
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::InMemoryStorage`] - in-memory key-value storage

pub mod file_storage;
pub mod intercepting;
pub mod mock;
pub mod reqwest_http;

pub use file_storage::{default_storage_path, FileStorage};
pub use intercepting::InterceptingClient;
pub use mock::{InMemoryStorage, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
