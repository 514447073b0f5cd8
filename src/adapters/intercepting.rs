//! Transport wrapper with request interceptors.
//!
//! [`InterceptingClient`] wraps any [`HttpClient`] and implements
//! [`RequestInterceptors`]. Each outbound request gets a copy of the caller's
//! headers with every active rule applied, in registration order.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::traits::{
    Headers, HttpClient, InterceptorId, RequestInterceptors, RequestRule, Response, TransportError,
};

/// HTTP client that runs registered request rules before delegating.
pub struct InterceptingClient<C> {
    inner: C,
    rules: Mutex<Vec<(InterceptorId, RequestRule)>>,
    next_id: AtomicU64,
}

impl<C: HttpClient> InterceptingClient<C> {
    /// Wrap `inner` with an empty rule set.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            rules: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Get a reference to the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn rules(&self) -> MutexGuard<'_, Vec<(InterceptorId, RequestRule)>> {
        self.rules.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy `headers` and run every active rule over the copy.
    fn intercept(&self, headers: &Headers) -> Headers {
        // Clone the rule handles so no rule runs while the lock is held.
        let rules: Vec<RequestRule> = self.rules().iter().map(|(_, r)| r.clone()).collect();
        let mut headers = headers.clone();
        for rule in rules {
            rule(&mut headers);
        }
        headers
    }
}

impl<C> std::fmt::Debug for InterceptingClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<InterceptorId> = self
            .rules
            .lock()
            .map(|rules| rules.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default();
        f.debug_struct("InterceptingClient")
            .field("rules", &ids)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> RequestInterceptors for InterceptingClient<C> {
    fn use_request(&self, rule: RequestRule) -> InterceptorId {
        let id = InterceptorId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.rules().push((id, rule));
        tracing::trace!(interceptor = %id, "Request rule registered");
        id
    }

    fn eject_request(&self, id: InterceptorId) -> bool {
        let mut rules = self.rules();
        let before = rules.len();
        rules.retain(|(existing, _)| *existing != id);
        before != rules.len()
    }

    fn active_request_rules(&self) -> usize {
        self.rules().len()
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for InterceptingClient<C> {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, TransportError> {
        let headers = self.intercept(headers);
        self.inner.get(url, &headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        let headers = self.intercept(headers);
        self.inner.post(url, body, &headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use bytes::Bytes;
    use std::sync::Arc;

    fn header_rule(name: &'static str, value: &'static str) -> RequestRule {
        Arc::new(move |headers: &mut Headers| {
            headers.insert(name.to_string(), value.to_string());
        })
    }

    fn client() -> InterceptingClient<MockHttpClient> {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        InterceptingClient::new(mock)
    }

    #[tokio::test]
    async fn test_rules_apply_to_requests() {
        let client = client();
        client.use_request(header_rule("x-trace", "abc"));

        client
            .get("https://example.com/a", &Headers::new())
            .await
            .unwrap();

        let requests = client.inner().get_requests();
        assert_eq!(requests[0].headers.get("x-trace"), Some(&"abc".to_string()));
    }

    #[tokio::test]
    async fn test_ejected_rule_no_longer_applies() {
        let client = client();
        let id = client.use_request(header_rule("x-trace", "abc"));
        assert!(client.eject_request(id));
        assert!(!client.eject_request(id));

        client
            .post("https://example.com/a", "{}", &Headers::new())
            .await
            .unwrap();

        let requests = client.inner().get_requests();
        assert!(!requests[0].headers.contains_key("x-trace"));
        assert_eq!(client.active_request_rules(), 0);
    }

    #[tokio::test]
    async fn test_rules_run_in_registration_order() {
        let client = client();
        client.use_request(header_rule("x-order", "first"));
        client.use_request(header_rule("x-order", "second"));

        client
            .get("https://example.com/a", &Headers::new())
            .await
            .unwrap();

        let requests = client.inner().get_requests();
        assert_eq!(requests[0].headers.get("x-order"), Some(&"second".to_string()));
    }

    #[test]
    fn test_ids_are_unique() {
        let client = client();
        let a = client.use_request(header_rule("a", "1"));
        let b = client.use_request(header_rule("b", "2"));
        assert_ne!(a, b);
        assert_eq!(client.active_request_rules(), 2);
    }

    #[tokio::test]
    async fn test_caller_headers_are_not_mutated() {
        let client = client();
        client.use_request(header_rule("x-trace", "abc"));

        let headers = Headers::new();
        client.get("https://example.com/a", &headers).await.unwrap();
        assert!(headers.is_empty());
    }
}
