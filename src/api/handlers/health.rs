/*
 * Responsibility
 * - GET /health (疎通用) と GET / のバナー
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn banner() -> &'static str {
    "Blog API is running..."
}
