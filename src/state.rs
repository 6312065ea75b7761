/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - posts: PostStore (Postgres / in-memory), id_codec: IdCodec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::post_repo::PostStore;
use crate::services::id_codec::IdCodec;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostStore>, id_codec: IdCodec) -> Self {
        Self { posts, id_codec }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("posts", &self.posts.backend_name())
            .field("id_codec", &self.id_codec)
            .finish()
    }
}
