//! Handlers for the session commands.
//!
//! Each handler returns the line to print on stdout; errors are left for
//! `main` to report.

use color_eyre::eyre::{eyre, Report, Result, WrapErr};

use super::args::CredentialArgs;
use crate::auth::{LoginPayload, SessionManager, SignupPayload, ACCESS_TOKEN_KEY};
use crate::error::SessionError;
use crate::traits::{HttpClient, KeyValueStorage, RequestInterceptors};

/// `frest status`
pub fn handle_status<T, S>(session: &SessionManager<T, S>) -> String
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    if session.is_authenticated() {
        "authenticated".to_string()
    } else {
        "not authenticated".to_string()
    }
}

/// `frest login`
pub async fn handle_login<T, S>(
    session: &SessionManager<T, S>,
    args: CredentialArgs,
) -> Result<String>
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let password = resolve_password(args.password)?;
    let response = session
        .login(&LoginPayload::new(args.email.as_str(), password))
        .await
        .map_err(|e| request_failed("login", &e))?;
    persist_token(session, &response.token)?;
    Ok(format!("Logged in as {}", args.email))
}

/// `frest signup`
pub async fn handle_signup<T, S>(
    session: &SessionManager<T, S>,
    args: CredentialArgs,
) -> Result<String>
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let password = resolve_password(args.password)?;
    let response = session
        .signup(&SignupPayload::new(args.email.as_str(), password))
        .await
        .map_err(|e| request_failed("signup", &e))?;
    persist_token(session, &response.token)?;
    Ok(format!("Signed up as {}", args.email))
}

/// `frest logout`
pub fn handle_logout<T, S>(session: &SessionManager<T, S>) -> Result<String>
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    session.logout().wrap_err("failed to clear storage")?;
    Ok("Logged out".to_string())
}

/// Server or user-facing message, wrapped with the error code and a
/// recovery hint for the error's category.
fn request_failed(action: &str, err: &SessionError) -> Report {
    eyre!(err.user_message()).wrap_err(format!(
        "{} failed ({}). {}",
        action,
        err.error_code(),
        err.category().recovery_hint()
    ))
}

fn resolve_password(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ").wrap_err("failed to read password"),
    }
}

fn persist_token<T, S>(session: &SessionManager<T, S>, token: &str) -> Result<()>
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    session
        .storage()
        .set_item(ACCESS_TOKEN_KEY, token)
        .wrap_err("failed to store access token")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStorage, MockHttpClient, MockResponse};
    use crate::adapters::InterceptingClient;
    use crate::auth::token::encode_unsigned;
    use crate::traits::{Response, TransportError};
    use serde_json::json;
    use std::sync::Arc;

    type TestSession = SessionManager<InterceptingClient<MockHttpClient>, InMemoryStorage>;

    fn session(mock: &MockHttpClient, storage: &InMemoryStorage) -> TestSession {
        SessionManager::new(
            "https://api.test",
            Arc::new(InterceptingClient::new(mock.clone())),
            Arc::new(storage.clone()),
        )
    }

    fn credentials() -> CredentialArgs {
        CredentialArgs {
            email: "a@b.com".to_string(),
            password: Some("x".to_string()),
        }
    }

    #[test]
    fn test_status_reports_stored_token() {
        let storage = InMemoryStorage::new();
        let session = session(&MockHttpClient::new(), &storage);
        assert_eq!(handle_status(&session), "not authenticated");

        let token = encode_unsigned(&json!({ "exp": 4_102_444_800u64 }));
        storage.set_item(ACCESS_TOKEN_KEY, &token).unwrap();
        assert_eq!(handle_status(&session), "authenticated");
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/auth/login",
            MockResponse::Success(Response::json_body(200, &json!({ "token": "t1" }))),
        );
        let storage = InMemoryStorage::new();
        let session = session(&mock, &storage);

        let line = handle_login(&session, credentials()).await.unwrap();
        assert_eq!(line, "Logged in as a@b.com");
        assert_eq!(
            storage.get_item(ACCESS_TOKEN_KEY).unwrap(),
            Some("t1".to_string())
        );
    }

    #[tokio::test]
    async fn test_signup_failure_stores_nothing() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/api/auth/signup",
            MockResponse::Success(Response::json_body(409, &json!({ "message": "email taken" }))),
        );
        let storage = InMemoryStorage::new();
        let session = session(&mock, &storage);

        let err = handle_signup(&session, credentials()).await.unwrap_err();
        assert!(format!("{:?}", err).contains("email taken"));
        assert!(err
            .to_string()
            .contains("This may be a bug. Please report it if it persists"));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_login_transport_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(TransportError::ConnectionFailed(
            "refused".to_string(),
        )));
        let session = session(&mock, &InMemoryStorage::new());

        let err = handle_login(&session, credentials()).await.unwrap_err();
        assert!(err.to_string().contains("login failed (E_TRANSPORT)"));
        assert!(err
            .to_string()
            .contains("Check your internet connection and try again"));
        assert!(format!("{:?}", err).contains("Could not reach the server."));
    }

    #[test]
    fn test_logout_clears_storage() {
        let storage = InMemoryStorage::with_item("theme", "dark");
        let session = session(&MockHttpClient::new(), &storage);
        assert_eq!(handle_logout(&session).unwrap(), "Logged out");
        assert!(storage.is_empty());
    }
}
