/*
 * Responsibility
 * - posts document の保存形 (PostDocument) と store が返す行 (PostRow)
 * - PostStore trait: backend (Postgres / in-memory) 共通の CRUD 窓口
 * - 更新は document 丸ごとの置き換え (部分 merge はしない)
 */
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::error::RepoResult;

/// Structured author record. Every field is optional, as in the stored documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authors arrive either as a profile record or as a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Profile(AuthorProfile),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// The persisted body of a post. Language code → title text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub title: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    pub publish_date: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub post_id: i64,
    pub document: PostDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document store for posts.
///
/// `post_id` is assigned by the store on create, increases monotonically and
/// is never handed out twice, even after a delete.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// Backend name, for logs.
    fn backend_name(&self) -> &'static str;

    /// All posts in insertion order.
    async fn list(&self) -> RepoResult<Vec<PostRow>>;

    async fn get(&self, post_id: i64) -> RepoResult<Option<PostRow>>;

    async fn create(&self, document: &PostDocument) -> RepoResult<PostRow>;

    /// Replaces the whole document. `None` when `post_id` does not resolve.
    async fn update(&self, post_id: i64, document: &PostDocument)
    -> RepoResult<Option<PostRow>>;

    /// `true` when a post was removed.
    async fn delete(&self, post_id: i64) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_accepts_both_shapes() {
        let name: Author = serde_json::from_value(json!("Ada")).unwrap();
        assert_eq!(name, Author::Name("Ada".into()));

        let profile: Author =
            serde_json::from_value(json!({"id": "u1", "name": "Ada", "email": "ada@example.com"}))
                .unwrap();
        assert_eq!(
            profile,
            Author::Profile(AuthorProfile {
                id: Some("u1".into()),
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
            })
        );
    }

    #[test]
    fn document_serializes_with_camel_case_keys() {
        let doc = PostDocument {
            title: BTreeMap::from([("en".to_string(), "Hello".to_string())]),
            excerpt: None,
            content: "<p>hi</p>".into(),
            author: None,
            publish_date: "2024-03-01T00:00:00Z".parse().unwrap(),
            categories: vec![],
            image_url: "https://img.test/a.png".into(),
            video_url: None,
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["imageUrl"], "https://img.test/a.png");
        assert_eq!(value["publishDate"], "2024-03-01T00:00:00Z");
        assert!(value.get("excerpt").is_none());
        assert!(value.get("videoUrl").is_none());
    }
}
