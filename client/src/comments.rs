//! Per-post comments, kept only in client-local storage.
//!
//! Stored under `comments_<postId>` as a JSON array, newest first. They are
//! never sent to the API.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::storage::LocalStore;

pub const COMMENTS_KEY_PREFIX: &str = "comments_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Epoch milliseconds at creation.
    pub id: i64,
    pub name: String,
    pub text: String,
    /// Local time, human readable.
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct CommentBook {
    store: LocalStore,
    post_id: String,
    comments: Vec<Comment>,
}

pub fn storage_key(post_id: &str) -> String {
    format!("{COMMENTS_KEY_PREFIX}{post_id}")
}

impl CommentBook {
    pub async fn load(store: LocalStore, post_id: &str) -> ClientResult<Self> {
        let comments = match store.get_item(&storage_key(post_id)).await? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(post_id, error = %e, "discarding unreadable comments");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(Self {
            store,
            post_id: post_id.to_owned(),
            comments,
        })
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Adds a comment on top. Blank name or text is ignored (`Ok(false)`).
    pub async fn add(&mut self, name: &str, text: &str) -> ClientResult<bool> {
        if name.trim().is_empty() || text.trim().is_empty() {
            return Ok(false);
        }

        let comment = Comment {
            id: Utc::now().timestamp_millis(),
            name: name.to_owned(),
            text: text.to_owned(),
            date: Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        };
        self.comments.insert(0, comment);
        self.persist().await?;
        Ok(true)
    }

    async fn persist(&self) -> ClientResult<()> {
        let json = serde_json::to_string(&self.comments)
            .map_err(crate::storage::StorageError::from)?;
        self.store
            .set_item(&storage_key(&self.post_id), &json)
            .await?;
        Ok(())
    }
}
