use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET /health
///
/// Responds once the router is up.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
