/*
 * Responsibility
 * - Path の String を公開 ID として受け、復号して内部 ID (i64) へ変換する
 * - 復号できない ID は「存在しない」と同じ扱い (404)
 * - リソース名はタグ型の PublicResource::NAME から取る
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{error::AppError, state::AppState};

/// Marker for a resource addressed by a public id.
pub trait PublicResource {
    /// Used in not-found messages.
    const NAME: &'static str;
}

pub struct PublicId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: PublicResource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NAME))?;

        let id = state.id_codec.decode(&public_id).map_err(|e| {
            if e.is_decode_failure() {
                AppError::not_found(T::NAME)
            } else {
                AppError::from(e)
            }
        })?;

        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId").field("id", &self.id).finish()
    }
}

pub enum PostTag {}

impl PublicResource for PostTag {
    const NAME: &'static str = "Post";
}

pub type PublicPostId = PublicId<PostTag>;
