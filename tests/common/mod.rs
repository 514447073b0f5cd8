//! Common test utilities for integration tests.

#![allow(dead_code)]

use frest::auth::token::encode_unsigned;
use frest::auth::HttpSession;
use frest::config::SessionConfig;
use serde_json::json;
use tempfile::TempDir;

/// A session talking to `base_url`, with storage in a fresh temp dir.
///
/// The temp dir must outlive the session.
pub fn http_session(base_url: &str) -> (HttpSession, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let config = SessionConfig::new()
        .with_api_base_url(base_url)
        .with_storage_path(dir.path().join("storage.json"));
    let session = HttpSession::from_config(&config).expect("session");
    (session, dir)
}

/// Current time in epoch seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Unsigned token expiring `secs` from now (negative for the past).
pub fn token_expiring_in(secs: i64) -> String {
    encode_unsigned(&json!({ "sub": "user-1", "exp": now() + secs }))
}
