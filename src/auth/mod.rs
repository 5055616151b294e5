//! Authentication: HS256 tokens, exempt paths, and the per-request gate.

mod exempt;
mod gate;
mod jwt;

pub use exempt::ExemptPaths;
pub use gate::{AuthGate, GateDecision};
pub use jwt::{Claims, JwtSecret};

use thiserror::Error;

/// Why a request was refused by the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Malformed Authorization header, expected `Bearer <token>`")]
    MalformedHeader,

    #[error("Token has expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Invalid token")]
    InvalidToken,
}
