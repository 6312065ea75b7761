//! Admin dashboard: the post table plus optimistic delete.

use crate::api::PostsApi;
use crate::error::ClientResult;
use crate::normalize::{DisplayPost, normalize_posts};

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    posts: Vec<DisplayPost>,
    error: Option<String>,
}

impl AdminDashboard {
    pub fn new(posts: Vec<DisplayPost>) -> Self {
        Self { posts, error: None }
    }

    /// Fetches and normalizes every post.
    pub async fn load<A: PostsApi + ?Sized>(api: &A) -> ClientResult<Self> {
        let raw = api.list_posts().await?;
        Ok(Self::new(normalize_posts(&raw)))
    }

    pub fn posts(&self) -> &[DisplayPost] {
        &self.posts
    }

    /// Message of the last failed action, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Removes the post from the table right away, then asks the API.
    /// On failure the table is restored to exactly what it was.
    pub async fn delete_post<A: PostsApi + ?Sized>(&mut self, api: &A, id: &str) -> ClientResult<()> {
        let snapshot = self.posts.clone();
        self.posts.retain(|p| p.id != id);

        match api.delete_post(id).await {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(post_id = id, error = %e, "delete failed, rolling back");
                self.posts = snapshot;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingApi;
    use serde_json::json;

    fn dashboard() -> AdminDashboard {
        let raw = vec![
            json!({"id": "a", "title": {"en": "A"}}),
            json!({"id": "b", "title": {"en": "B"}}),
            json!({"id": "c", "title": {"en": "C"}}),
        ];
        AdminDashboard::new(normalize_posts(&raw))
    }

    fn ids(d: &AdminDashboard) -> Vec<&str> {
        d.posts().iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn successful_delete_removes_the_row() {
        let api = RecordingApi::default();
        let mut d = dashboard();
        d.delete_post(&api, "b").await.unwrap();
        assert_eq!(ids(&d), vec!["a", "c"]);
        assert_eq!(d.error(), None);
    }

    #[tokio::test]
    async fn failed_delete_restores_the_exact_list() {
        let api = RecordingApi::failing_deletes();
        let mut d = dashboard();
        let before = d.posts().to_vec();

        let err = d.delete_post(&api, "b").await.unwrap_err();
        assert_eq!(d.posts(), before.as_slice());
        assert_eq!(d.error(), Some(err.to_string().as_str()));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn load_skips_posts_without_ids() {
        let api = RecordingApi::with_posts(vec![
            json!({"_id": "x", "title": "X", "author": "Ada"}),
            json!({"title": "no id"}),
        ]);
        let d = AdminDashboard::load(&api).await.unwrap();
        assert_eq!(ids(&d), vec!["x"]);
        assert_eq!(d.posts()[0].author, "Ada");
    }
}
