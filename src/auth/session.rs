//! Session/auth manager.
//!
//! Orchestrates the token validator, the auth state store and the bearer
//! interceptor registry, and exposes login/signup/logout.
//!
//! Login and signup do not touch the auth state. They obtain a token and
//! attach it to the transport; the state flips to authenticated on the next
//! [`SessionManager::is_authenticated`] call, after the token has been
//! persisted by whoever owns storage writes. Authentication state is always
//! derived from storage content.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::api::{error_from_response, AuthResponse, LoginPayload, SignupPayload};
use super::api::{LOGIN_PATH, SIGNUP_PATH};
use super::interceptors::CredentialInterceptorRegistry;
use super::state::{AuthState, AuthStateStore};
use super::token::TokenValidator;
use crate::adapters::{FileStorage, InterceptingClient, ReqwestHttpClient};
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::traits::{Headers, HttpClient, KeyValueStorage, RequestInterceptors, TransportError};

/// Session manager wired to the production transport and file storage.
pub type HttpSession = SessionManager<InterceptingClient<ReqwestHttpClient>, FileStorage>;

/// Client-side session and authentication manager.
pub struct SessionManager<T: ?Sized, S: ?Sized> {
    base_url: String,
    transport: Arc<T>,
    storage: Arc<S>,
    validator: TokenValidator<S>,
    state: AuthStateStore,
    interceptors: CredentialInterceptorRegistry<T>,
}

impl<T, S> SessionManager<T, S>
where
    T: HttpClient + RequestInterceptors + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    /// Create a manager talking to the auth endpoints under `base_url`.
    ///
    /// The auth state starts out unauthenticated.
    pub fn new(base_url: impl Into<String>, transport: Arc<T>, storage: Arc<S>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            validator: TokenValidator::new(storage.clone()),
            interceptors: CredentialInterceptorRegistry::new(transport.clone()),
            state: AuthStateStore::new(),
            base_url,
            transport,
            storage,
        }
    }

    /// Validate the stored token, record the result, and return it.
    ///
    /// Decode and storage failures are returned as errors after the state
    /// has been set to unauthenticated.
    pub fn check_authentication(&self) -> SessionResult<bool> {
        match self.validator.validate() {
            Ok(valid) => {
                let state = self.state.replace(AuthState {
                    is_authenticated: valid,
                });
                Ok(state.is_authenticated)
            }
            Err(err) => {
                self.state.set(AuthState::unauthenticated());
                Err(err)
            }
        }
    }

    /// Whether the current user is authenticated.
    ///
    /// This is the form used by navigation guards: failures to read or
    /// decode the stored token are logged as errors and answered `false`.
    pub fn is_authenticated(&self) -> bool {
        match self.check_authentication() {
            Ok(valid) => valid,
            Err(err) => {
                error!(
                    error = %err,
                    code = err.error_code(),
                    "Stored credential could not be checked, treating as unauthenticated"
                );
                false
            }
        }
    }

    /// Snapshot of the last recorded auth state, without re-validating.
    pub fn auth_state(&self) -> AuthState {
        self.state.get()
    }

    /// Log in with email and password.
    ///
    /// On success the returned token is attached to all subsequent requests.
    /// Persisting the token is left to the caller.
    pub async fn login(&self, payload: &LoginPayload) -> SessionResult<AuthResponse> {
        self.authenticate(LOGIN_PATH, payload).await
    }

    /// Create an account. Same contract as [`login`](Self::login).
    pub async fn signup(&self, payload: &SignupPayload) -> SessionResult<AuthResponse> {
        self.authenticate(SIGNUP_PATH, payload).await
    }

    async fn authenticate<P>(&self, path: &str, payload: &P) -> SessionResult<AuthResponse>
    where
        P: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let body =
            serde_json::to_string(payload).map_err(|e| TransportError::Other(e.to_string()))?;
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = self.transport.post(&url, &body, &headers).await?;
        if !response.is_success() {
            let err = error_from_response(&response);
            warn!(
                endpoint = path,
                status = err.status,
                message = %err.message,
                "Authentication request rejected"
            );
            return Err(err.into());
        }

        let auth: AuthResponse = response
            .json()
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;
        self.interceptors.register_bearer(&auth.token);
        info!(endpoint = path, "Bearer credential attached");
        Ok(auth)
    }

    /// Re-attach a stored, still-valid token after a restart.
    ///
    /// Returns whether a bearer rule was registered.
    pub fn restore(&self) -> SessionResult<bool> {
        if !self.check_authentication()? {
            return Ok(false);
        }
        match self.validator.stored_token()? {
            Some(token) => {
                self.interceptors.register_bearer(&token);
                info!("Stored credential restored");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear all client storage and discard in-memory session state.
    ///
    /// The interceptor registry and auth state are reset even if clearing
    /// storage fails; the storage error is still returned.
    pub fn logout(&self) -> SessionResult<()> {
        let cleared = self.storage.clear();
        self.interceptors.clear();
        self.state.reset();
        info!("Logged out");
        cleared.map_err(Into::into)
    }

    /// The bearer interceptor registry.
    pub fn interceptors(&self) -> &CredentialInterceptorRegistry<T> {
        &self.interceptors
    }

    /// The client storage this manager validates against.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// The intercepting transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Base URL of the auth endpoints.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpSession {
    /// Build a manager from configuration, using reqwest and file storage.
    pub fn from_config(config: &SessionConfig) -> SessionResult<Self> {
        let http = match config.request_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout)?,
            None => ReqwestHttpClient::new(),
        };
        let transport = Arc::new(InterceptingClient::new(http));
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        Ok(SessionManager::new(
            config.api_base_url.clone(),
            transport,
            storage,
        ))
    }
}
