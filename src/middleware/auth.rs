//! Auth middleware: the gate in front of every route, and the claims extractor.

use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::auth::{AuthError, Claims, GateDecision};
use crate::error::AppError;
use crate::handlers::http::AppState;

/// Middleware: admit exempt paths, verify the token everywhere else.
/// Authorized requests carry their `Claims` in the request extensions.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match state.gate().evaluate(request.uri().path(), request.headers()) {
        GateDecision::Exempt => next.run(request).await,
        GateDecision::Authorized(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GateDecision::Rejected(reason) => {
            debug!(path = %request.uri().path(), %reason, "rejected request");
            AppError::Auth(reason).into_response()
        }
    }
}

/// Extractor: claims of the token that admitted this request.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Auth(AuthError::MissingToken))
    }
}
