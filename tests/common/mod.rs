//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Response;
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use blog_api::middleware::AuthUser;
use blog_api::{create_app, ApiRoutes, AppState, Config};

pub const SECRET: &str = "integration-test-secret";
pub const ORIGIN: &str = "https://blog.example.com";

pub fn test_config(upload_dir: &Path, extra: &[(&str, &str)]) -> Config {
    let upload_dir = upload_dir.display().to_string();
    Config::from_lookup(|key| {
        if let Some((_, v)) = extra.iter().find(|(k, _)| *k == key) {
            return Some(v.to_string());
        }
        match key {
            "JWT_SECRET" => Some(SECRET.to_string()),
            "CORS_ORIGIN" => Some(ORIGIN.to_string()),
            "UPLOAD_DIR" => Some(upload_dir.clone()),
            _ => None,
        }
    })
    .expect("test config")
}

/// Counts how many requests made it past the gate into a collaborator route.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn counting(hits: Hits, body: &'static str) -> MethodRouter<AppState> {
    get(move || {
        let hits = hits.clone();
        async move {
            hits.0.fetch_add(1, Ordering::SeqCst);
            body
        }
    })
    .post(|| async { "created" })
}

/// Collaborator stubs standing in for the auth/users/posts/comments routers.
pub fn stub_routes(hits: &Hits) -> ApiRoutes {
    ApiRoutes {
        auth: Router::new().route("/login", counting(hits.clone(), "auth")),
        users: Router::new()
            .route("/", counting(hits.clone(), "users"))
            .route(
                "/db",
                get(|State(state): State<AppState>| async move {
                    state.require_db().map(|_| "ok")
                }),
            )
            .route(
                "/me",
                get(|AuthUser(claims): AuthUser| async move { Json(claims) }),
            ),
        posts: Router::new().route("/", counting(hits.clone(), "posts")),
        comments: Router::new().route("/", counting(hits.clone(), "comments")),
    }
}

pub fn app(config: &Config, hits: &Hits) -> Router {
    create_app(AppState::new(config, None), stub_routes(hits))
}

pub fn bearer(config: &Config) -> String {
    let token = AppState::new(config, None)
        .jwt_secret()
        .issue("user-1", chrono::Duration::minutes(10))
        .expect("issue token");
    format!("Bearer {}", token)
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
