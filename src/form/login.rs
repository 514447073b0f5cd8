//! Login form state.
//!
//! Keystrokes for each field go through their own [`FieldPipeline`]; the
//! committed values are merged into a single [`LoginPayload`] snapshot that
//! submit reads from.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::pipeline::{FieldPipeline, FieldSubscription};
use crate::auth::{AuthResponse, LoginPayload, SessionManager};
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::traits::{HttpClient, KeyValueStorage, RequestInterceptors};

/// Field names used for the pipelines.
pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";

type SharedPayload = Arc<RwLock<LoginPayload>>;

/// Login form with debounced email and password fields.
#[derive(Debug)]
pub struct LoginForm {
    state: SharedPayload,
    quiet: Duration,
    email: Option<FieldSubscription>,
    password: Option<FieldSubscription>,
}

impl LoginForm {
    pub fn new(quiet: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoginPayload::default())),
            quiet,
            email: None,
            password: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.debounce)
    }

    /// Start both field streams. No-op if already mounted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        let state = self.state.clone();
        self.email = Some(FieldPipeline::spawn(EMAIL_FIELD, self.quiet, move |email| {
            commit(&state, |current| LoginPayload {
                email,
                ..current.clone()
            })
        }));
        let state = self.state.clone();
        self.password = Some(FieldPipeline::spawn(
            PASSWORD_FIELD,
            self.quiet,
            move |password| {
                commit(&state, |current| LoginPayload {
                    password,
                    ..current.clone()
                })
            },
        ));
    }

    /// Stop both field streams, dropping keystrokes still in their quiet
    /// period.
    pub fn unmount(&mut self) {
        if let Some(mut email) = self.email.take() {
            email.unsubscribe();
        }
        if let Some(mut password) = self.password.take() {
            password.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }

    /// Raw email keystroke. Ignored while unmounted.
    pub fn key_email(&self, value: impl Into<String>) {
        if let Some(email) = &self.email {
            email.push(value);
        }
    }

    /// Raw password keystroke. Ignored while unmounted.
    pub fn key_password(&self, value: impl Into<String>) {
        if let Some(password) = &self.password {
            password.push(value);
        }
    }

    /// Snapshot of the committed form state.
    pub fn state(&self) -> LoginPayload {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True when both fields hold a committed, non-empty value.
    pub fn can_submit(&self) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        !state.email.is_empty() && !state.password.is_empty()
    }

    /// Committed payload, or `None` while the form is incomplete.
    pub fn submit(&self) -> Option<LoginPayload> {
        let state = self.state();
        (!state.email.is_empty() && !state.password.is_empty()).then_some(state)
    }

    /// Submit the committed payload to `session`.
    ///
    /// Returns `None` without a request when the form is incomplete.
    pub async fn login_with<T, S>(
        &self,
        session: &SessionManager<T, S>,
    ) -> Option<SessionResult<AuthResponse>>
    where
        T: HttpClient + RequestInterceptors + ?Sized,
        S: KeyValueStorage + ?Sized,
    {
        let payload = self.submit()?;
        Some(session.login(&payload).await)
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn commit<F>(state: &SharedPayload, next: F)
where
    F: FnOnce(&LoginPayload) -> LoginPayload,
{
    let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
    let replacement = next(&guard);
    *guard = replacement;
}
