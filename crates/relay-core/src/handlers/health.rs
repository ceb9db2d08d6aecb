use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
