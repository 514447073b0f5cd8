//! frest - client-side session and authentication manager.
//!
//! Decides from a stored credential whether the user is authenticated,
//! attaches the bearer credential to outgoing requests after login or
//! signup, and debounces login form input.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod traits;
