//! HTTP handlers: health and the bearer diagnostic route.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde_json::json;
use tracing::warn;

use crate::auth::{AuthGate, ExemptPaths, JwtSecret};
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::error::{AppError, AppResult};

/// Shared application state. Built once from `Config` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    gate: AuthGate,
    db: Option<DbPool>,
    cors_origin: HeaderValue,
    upload_dir: Arc<PathBuf>,
    upload_max_bytes: usize,
}

impl AppState {
    /// `db` is `None` when the startup connection attempt failed and the
    /// deployment chose to keep serving.
    pub fn new(config: &Config, db: Option<DbPool>) -> Self {
        let gate = AuthGate::new(
            JwtSecret::new(&config.jwt_secret),
            ExemptPaths::new(&config.auth_exempt_paths),
            config.auth_cookie.clone(),
        );
        Self {
            gate,
            db,
            cors_origin: config.cors_origin.clone(),
            upload_dir: Arc::new(config.upload_dir.clone()),
            upload_max_bytes: config.upload_max_bytes,
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        self.gate.jwt()
    }
    pub fn db(&self) -> Option<&DbPool> {
        self.db.as_ref()
    }
    /// For handlers that cannot work without persistence.
    pub fn require_db(&self) -> AppResult<&DbPool> {
        self.db.as_ref().ok_or(AppError::DbUnavailable)
    }
    pub fn cors_origin(&self) -> &HeaderValue {
        &self.cors_origin
    }
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
    pub fn upload_max_bytes(&self) -> usize {
        self.upload_max_bytes
    }
}

/// GET /health — liveness probe with database reachability.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let database = match state.db() {
        Some(pool) => match db::ping(pool).await {
            Ok(()) => "connected",
            Err(e) => {
                warn!(error = %e, "database ping failed");
                "unavailable"
            }
        },
        None => "unavailable",
    };
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "blog-api", "database": database })),
    )
}

/// GET /api/protected-route — echoes the bearer token from `Authorization`.
pub async fn protected_route(
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Response {
    match bearer {
        Some(TypedHeader(Authorization(bearer))) => (
            StatusCode::OK,
            Json(json!({
                "message": "Protected route accessed",
                "token": bearer.token(),
            })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized: missing or malformed bearer token" })),
        )
            .into_response(),
    }
}
