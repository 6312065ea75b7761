//! Test double for [`PostsApi`].

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::PostsApi;
use crate::error::{ClientError, ClientResult};
use crate::form::PostPayload;

#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: AtomicUsize,
    posts: Vec<Value>,
    fail_deletes: bool,
}

impl RecordingApi {
    pub fn with_posts(posts: Vec<Value>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostsApi for RecordingApi {
    async fn list_posts(&self) -> ClientResult<Vec<Value>> {
        self.record();
        Ok(self.posts.clone())
    }

    async fn get_post(&self, id: &str) -> ClientResult<Value> {
        self.record();
        self.posts
            .iter()
            .find(|p| p["id"] == id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Post not found".into(),
            })
    }

    async fn create_post(&self, payload: &PostPayload) -> ClientResult<Value> {
        self.record();
        let mut doc = serde_json::to_value(payload).unwrap();
        doc["id"] = json!("new");
        Ok(doc)
    }

    async fn update_post(&self, id: &str, payload: &PostPayload) -> ClientResult<Value> {
        self.record();
        let mut doc = serde_json::to_value(payload).unwrap();
        doc["id"] = json!(id);
        Ok(doc)
    }

    async fn delete_post(&self, _id: &str) -> ClientResult<()> {
        self.record();
        if self.fail_deletes {
            return Err(ClientError::Api {
                status: 500,
                message: "internal server error".into(),
            });
        }
        Ok(())
    }
}
