//! Bearer credential interceptor registry.
//!
//! Tracks the handle of the one request rule that attaches
//! `Authorization: Bearer <token>` to outbound requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::traits::{Headers, InterceptorId, RequestInterceptors, RequestRule};

/// Registry key of the bearer-attachment rule.
pub const BEARER_KEY: &str = "bearer";

/// Build the rule that adds `Authorization: Bearer <token>`.
pub fn bearer_rule(token: &str) -> RequestRule {
    let value = format!("Bearer {}", token);
    Arc::new(move |headers: &mut Headers| {
        headers.insert("Authorization".to_string(), value.clone());
    })
}

/// Keeps at most one active bearer rule on the transport.
#[derive(Debug)]
pub struct CredentialInterceptorRegistry<T: ?Sized> {
    transport: Arc<T>,
    handles: Mutex<HashMap<&'static str, InterceptorId>>,
}

impl<T: RequestInterceptors + ?Sized> CredentialInterceptorRegistry<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            handles: Mutex::new(HashMap::new()),
        }
    }

    fn handles(&self) -> MutexGuard<'_, HashMap<&'static str, InterceptorId>> {
        self.handles.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Attach `token` to every future request, replacing any previous
    /// bearer rule.
    pub fn register_bearer(&self, token: &str) {
        // Held across eject + install so concurrent callers cannot both
        // leave a rule behind.
        let mut handles = self.handles();
        let previous = handles.remove(BEARER_KEY);
        if let Some(previous) = previous {
            self.transport.eject_request(previous);
        }
        let id = self.transport.use_request(bearer_rule(token));
        handles.insert(BEARER_KEY, id);
        debug!(
            previous = ?previous,
            interceptor = %id,
            "Bearer rule registered"
        );
    }

    /// Drop the bearer rule, removing it from the transport as well.
    pub fn clear(&self) {
        let mut handles = self.handles();
        if let Some(id) = handles.remove(BEARER_KEY) {
            self.transport.eject_request(id);
            debug!(interceptor = %id, "Bearer rule cleared");
        }
    }

    /// Handle of the active bearer rule, if any.
    pub fn active_handle(&self) -> Option<InterceptorId> {
        self.handles().get(BEARER_KEY).copied()
    }
}
