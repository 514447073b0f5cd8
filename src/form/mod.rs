//! Login form input handling.
//!
//! Raw keystrokes are debounced per field and de-duplicated before they
//! reach the form state.

pub mod debounce;
pub mod login;
pub mod pipeline;

pub use debounce::Debouncer;
pub use login::{LoginForm, EMAIL_FIELD, PASSWORD_FIELD};
pub use pipeline::{FieldPipeline, FieldSubscription};
