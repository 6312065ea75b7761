/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - Path の {post_id} は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 * - 書き込み系に認可はない (admin gate は client 側のみ)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::{
        dto::posts::{MessageResponse, PostRequest, PostResponse},
        extractors::public_id::{PostTag, PublicPostId, PublicResource},
    },
    error::AppError,
    repos::post_repo::{PostDocument, PostRow},
    state::AppState,
};

fn row_to_response(state: &AppState, row: PostRow) -> Result<PostResponse, AppError> {
    let public_id = state.id_codec.encode(row.post_id)?;
    Ok(PostResponse::from_row(public_id, row))
}

fn document_from(
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<PostDocument, AppError> {
    let Json(req) = payload?;
    req.into_document().map_err(AppError::validation)
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = state.posts.list().await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let document = document_from(payload)?;

    let row = state.posts.create(&document).await?;
    tracing::info!(post_id = row.post_id, "post created");

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_post(
    State(state): State<AppState>,
    post_id: PublicPostId,
) -> Result<Json<PostResponse>, AppError> {
    let row = state
        .posts
        .get(post_id.id)
        .await?
        .ok_or(AppError::not_found(PostTag::NAME))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_post(
    State(state): State<AppState>,
    post_id: PublicPostId,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, AppError> {
    let document = document_from(payload)?;

    let row = state
        .posts
        .update(post_id.id, &document)
        .await?
        .ok_or(AppError::not_found(PostTag::NAME))?;
    tracing::info!(post_id = row.post_id, "post updated");

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    post_id: PublicPostId,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state.posts.delete(post_id.id).await?;

    if !deleted {
        return Err(AppError::not_found(PostTag::NAME));
    }
    tracing::info!(post_id = post_id.id, "post deleted");

    Ok(Json(MessageResponse {
        message: "Post deleted",
    }))
}
