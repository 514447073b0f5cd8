//! Cached authentication state.
//!
//! The state is derived from storage content on every check and never
//! persisted. Readers get a snapshot; writers replace the whole value.

use serde::Serialize;
use std::sync::RwLock;

/// Last known authentication result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
        }
    }

    pub fn unauthenticated() -> Self {
        Self::default()
    }
}

/// Single-writer, multi-reader cell holding the current [`AuthState`].
#[derive(Debug, Default)]
pub struct AuthStateStore {
    state: RwLock<AuthState>,
}

impl AuthStateStore {
    /// Create a store initialized to unauthenticated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> AuthState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the current state wholesale.
    pub fn set(&self, state: AuthState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Replace the state and return the snapshot that is now current.
    ///
    /// Both happen under one write lock, so the returned value is never
    /// older than `state`.
    pub fn replace(&self, state: AuthState) -> AuthState {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        *guard = state;
        *guard
    }

    /// Back to the process-start value.
    pub fn reset(&self) {
        self.set(AuthState::default());
    }
}
