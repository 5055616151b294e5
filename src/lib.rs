//! Blog backend built with Rust.
//!
//! Owns the request admission pipeline (CORS, JWT gate, image upload) and
//! mounts caller-supplied routers for auth, users, posts and comments.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Routers for the blog resources, mounted under `/api/auth`, `/api/users`,
/// `/api/posts` and `/api/comments`.
#[derive(Default)]
pub struct ApiRoutes {
    pub auth: Router<AppState>,
    pub users: Router<AppState>,
    pub posts: Router<AppState>,
    pub comments: Router<AppState>,
}

/// Build the full application router. Used by main and by integration tests.
pub fn create_app(state: AppState, routes: ApiRoutes) -> Router {
    let upload = Router::new()
        .route("/upload", post(handlers::upload_image))
        .layer(DefaultBodyLimit::max(state.upload_max_bytes()));

    let api = Router::new()
        .nest("/auth", routes.auth)
        .nest("/users", routes.users)
        .nest("/posts", routes.posts)
        .nest("/comments", routes.comments)
        .route("/protected-route", get(handlers::protected_route))
        .merge(upload);

    // Outermost layer last: trace, preflight status, CORS, then the gate.
    Router::new()
        .nest("/api", api)
        .nest_service("/images", ServeDir::new(state.upload_dir()))
        .route("/health", get(handlers::health))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
        .layer(middleware::cors_layer(state.cors_origin().clone()))
        .layer(axum::middleware::from_fn(middleware::preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
