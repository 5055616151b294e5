//! CORS policy: one origin, a fixed method set, credentials allowed.

use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowCredentials, AllowHeaders, CorsLayer};

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Requests from any other origin get neither `Access-Control-Allow-Origin`
/// nor `Access-Control-Allow-Credentials`.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    let allowed = origin.clone();
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(AllowCredentials::predicate(move |request_origin, _| {
            *request_origin == allowed
        }))
}

/// Must wrap `cors_layer`: preflights it answers come back as 200 and are
/// turned into 204 No Content here.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
