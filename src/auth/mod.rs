//! Authentication for the frest client.
//!
//! - Token validation against the stored access token
//! - Observable auth state
//! - Bearer credential interceptor registry
//! - Session manager driving login, signup and logout

pub mod api;
pub mod interceptors;
pub mod session;
pub mod state;
pub mod token;

pub use api::{AuthResponse, LoginPayload, SignupPayload, LOGIN_PATH, SIGNUP_PATH};
pub use interceptors::{bearer_rule, CredentialInterceptorRegistry, BEARER_KEY};
pub use session::{HttpSession, SessionManager};
pub use state::{AuthState, AuthStateStore};
pub use token::{decode_claims, Claims, TokenStatus, TokenValidator, ACCESS_TOKEN_KEY};
