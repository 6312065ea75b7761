/*
 * Responsibility
 * - URL 構造を定義
 * - /, /health, /posts, /posts/{post_id}
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::{banner, health},
    posts::{create_post, delete_post, get_post, list_posts, update_post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
