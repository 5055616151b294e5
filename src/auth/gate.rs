//! Admission decision for a single request.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use super::{AuthError, Claims, ExemptPaths, JwtSecret};

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of running a request through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Path is exempt; no header was looked at.
    Exempt,
    Authorized(Claims),
    Rejected(AuthError),
}

/// Exempt-path predicate plus token verification.
#[derive(Debug, Clone)]
pub struct AuthGate {
    jwt: JwtSecret,
    exempt: ExemptPaths,
    cookie_name: String,
}

impl AuthGate {
    pub fn new(jwt: JwtSecret, exempt: ExemptPaths, cookie_name: impl Into<String>) -> Self {
        Self {
            jwt,
            exempt,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn jwt(&self) -> &JwtSecret {
        &self.jwt
    }

    pub fn exempt(&self) -> &ExemptPaths {
        &self.exempt
    }

    pub fn evaluate(&self, path: &str, headers: &HeaderMap) -> GateDecision {
        if self.exempt.is_exempt(path) {
            return GateDecision::Exempt;
        }
        match self
            .extract_token(headers)
            .and_then(|token| self.jwt.validate(&token))
        {
            Ok(claims) => GateDecision::Authorized(claims),
            Err(e) => GateDecision::Rejected(e),
        }
    }

    /// The `Authorization` header wins when present, even if malformed; the
    /// cookie is only consulted when the header is absent.
    fn extract_token(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        if let Some(value) = headers.get(AUTHORIZATION) {
            let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
            return match value.strip_prefix(BEARER_PREFIX).map(str::trim) {
                Some(token) if !token.is_empty() => Ok(token.to_string()),
                _ => Err(AuthError::MalformedHeader),
            };
        }
        CookieJar::from_headers(headers)
            .get(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)
    }
}
