//! Authentication endpoint payloads.
//!
//! POST /api/auth/login and POST /api/auth/signup take JSON credentials and
//! answer `{ "token": ..., ... }` on success or `{ "message": ... }` on
//! failure.

use serde::{Deserialize, Serialize};

use crate::error::AuthRequestError;
use crate::traits::Response;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Path of the signup endpoint.
pub const SIGNUP_PATH: &str = "/api/auth/signup";

/// Login form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl LoginPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Signup payload: the login fields plus any extra profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupPayload {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SignupPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add an extra field to the request body.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl From<LoginPayload> for SignupPayload {
    fn from(login: LoginPayload) -> Self {
        SignupPayload::new(login.email, login.password)
    }
}

/// Successful login/signup response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    /// Remaining response fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Error payload returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Build the error for a non-success response.
///
/// Prefers the `message` field of a JSON body, then the raw body text, then
/// `HTTP <status>`.
pub fn error_from_response(response: &Response) -> AuthRequestError {
    let from_json = response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.message);
    let message = from_json
        .or_else(|| {
            response
                .text()
                .ok()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status));

    AuthRequestError {
        status: response.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn test_login_payload_serialization() {
        let payload = LoginPayload::new("a@b.com", "x");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({ "email": "a@b.com", "password": "x" }));
    }

    #[test]
    fn test_signup_payload_flattens_extra() {
        let payload = SignupPayload::new("a@b.com", "x").with_field("name", json!("Ada"));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "email": "a@b.com", "password": "x", "name": "Ada" })
        );
    }

    #[test]
    fn test_auth_response_keeps_extra_fields() {
        let response: AuthResponse =
            serde_json::from_value(json!({ "token": "t1", "user": { "id": 3 } })).unwrap();
        assert_eq!(response.token, "t1");
        assert_eq!(response.extra["user"]["id"], 3);
    }

    #[test]
    fn test_auth_response_requires_token() {
        let result: Result<AuthResponse, _> = serde_json::from_value(json!({ "ok": true }));
        assert!(result.is_err());
    }

    #[test]
    fn test_error_from_json_message() {
        let response = Response::json_body(401, &json!({ "message": "bad credentials" }));
        let err = error_from_response(&response);
        assert_eq!(err.status, 401);
        assert_eq!(err.message, "bad credentials");
    }

    #[test]
    fn test_error_from_plain_text() {
        let response = Response::new(502, Bytes::from("Bad Gateway\n"));
        assert_eq!(error_from_response(&response).message, "Bad Gateway");
    }

    #[test]
    fn test_error_from_empty_body() {
        let response = Response::new(500, Bytes::new());
        assert_eq!(error_from_response(&response).message, "HTTP 500");
    }
}
