//! In-memory PostStore, for `STORE_BACKEND=memory` and tests.
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::repos::error::RepoResult;
use crate::repos::post_repo::{PostDocument, PostRow, PostStore};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    // Keyed by post_id, so iteration order is insertion order.
    rows: BTreeMap<i64, PostRow>,
}

#[derive(Debug, Default)]
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> RepoResult<Vec<PostRow>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, post_id: i64) -> RepoResult<Option<PostRow>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&post_id).cloned())
    }

    async fn create(&self, document: &PostDocument) -> RepoResult<PostRow> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let row = PostRow {
            post_id: inner.last_id,
            document: document.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.post_id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        post_id: i64,
        document: &PostDocument,
    ) -> RepoResult<Option<PostRow>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&post_id) else {
            return Ok(None);
        };

        row.document = document.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, post_id: i64) -> RepoResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&post_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> PostDocument {
        PostDocument {
            title: BTreeMap::from([("en".to_string(), title.to_string())]),
            excerpt: None,
            content: "body".into(),
            author: None,
            publish_date: Utc::now(),
            categories: vec![],
            image_url: "https://img.test/x.png".into(),
            video_url: None,
        }
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryPostStore::new();
        for title in ["first", "second", "third"] {
            store.create(&doc(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.document.title["en"].clone())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryPostStore::new();
        let a = store.create(&doc("a")).await.unwrap();
        assert!(store.delete(a.post_id).await.unwrap());
        let b = store.create(&doc("b")).await.unwrap();
        assert!(b.post_id > a.post_id);
    }

    #[tokio::test]
    async fn update_replaces_document_and_keeps_created_at() {
        let store = MemoryPostStore::new();
        let created = store.create(&doc("old")).await.unwrap();

        let updated = store
            .update(created.post_id, &doc("new"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.document.title["en"], "new");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn missing_ids_resolve_to_nothing() {
        let store = MemoryPostStore::new();
        assert!(store.get(7).await.unwrap().is_none());
        assert!(store.update(7, &doc("x")).await.unwrap().is_none());
        assert!(!store.delete(7).await.unwrap());
    }
}
