//! Request admission middleware: CORS policy and the authentication gate.

pub mod auth;
pub mod cors;

pub use auth::{require_auth, AuthUser};
pub use cors::{cors_layer, preflight_no_content};
