//! Request interceptor registration API.
//!
//! A transport that implements [`RequestInterceptors`] runs every active
//! rule over the headers of each outbound request before sending it.

use std::fmt;
use std::sync::Arc;

use super::http::Headers;

/// Opaque handle returned when a request rule is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterceptorId(pub u64);

impl fmt::Display for InterceptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interceptor#{}", self.0)
    }
}

/// A request-mutation rule.
pub type RequestRule = Arc<dyn Fn(&mut Headers) + Send + Sync>;

/// Registration API for request-mutation rules.
pub trait RequestInterceptors: Send + Sync {
    /// Install `rule`; it applies to every request sent after this call.
    fn use_request(&self, rule: RequestRule) -> InterceptorId;

    /// Remove the rule registered under `id`.
    ///
    /// Returns `false` if no such rule was active.
    fn eject_request(&self, id: InterceptorId) -> bool;

    /// Number of currently active rules.
    fn active_request_rules(&self) -> usize;
}
