//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport operations (GET, POST)
//! - [`RequestInterceptors`] - request-mutation rule registration
//! - [`KeyValueStorage`] - persistent client storage

pub mod http;
pub mod interceptors;
pub mod storage;

pub use http::{Headers, HttpClient, Response, TransportError};
pub use interceptors::{InterceptorId, RequestInterceptors, RequestRule};
pub use storage::{KeyValueStorage, StorageError};
