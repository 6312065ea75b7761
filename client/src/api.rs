//! HTTP access to the blog API.
//!
//! Reads come back as raw JSON documents; shaping them for display is the job
//! of [`crate::normalize`]. No caching and no retries: every call is a fresh
//! request.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::form::PostPayload;

/// The five post operations of the API.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> ClientResult<Vec<Value>>;

    async fn get_post(&self, id: &str) -> ClientResult<Value>;

    async fn create_post(&self, payload: &PostPayload) -> ClientResult<Value>;

    async fn update_post(&self, id: &str, payload: &PostPayload) -> ClientResult<Value>;

    async fn delete_post(&self, id: &str) -> ClientResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpPostsApi {
    http: Client,
    base: Url,
}

impl HttpPostsApi {
    pub fn new(base: Url) -> ClientResult<Self> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    /// `base` + path segments, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> ClientResult<Vec<Value>> {
        let url = self.endpoint(&["posts"])?;
        tracing::debug!(%url, "GET");
        let res = self.http.get(url).send().await?;
        into_post_list(read_json(res).await?)
    }

    async fn get_post(&self, id: &str) -> ClientResult<Value> {
        let url = self.endpoint(&["posts", id])?;
        tracing::debug!(%url, "GET");
        let res = self.http.get(url).send().await?;
        read_json(res).await
    }

    async fn create_post(&self, payload: &PostPayload) -> ClientResult<Value> {
        let url = self.endpoint(&["posts"])?;
        tracing::debug!(%url, "POST");
        let res = self.http.post(url).json(payload).send().await?;
        read_json(res).await
    }

    async fn update_post(&self, id: &str, payload: &PostPayload) -> ClientResult<Value> {
        let url = self.endpoint(&["posts", id])?;
        tracing::debug!(%url, "PUT");
        let res = self.http.put(url).json(payload).send().await?;
        read_json(res).await
    }

    async fn delete_post(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["posts", id])?;
        tracing::debug!(%url, "DELETE");
        let res = self.http.delete(url).send().await?;
        read_json(res).await.map(|_| ())
    }
}

async fn read_json(res: Response) -> ClientResult<Value> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<Value>().await?);
    }

    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    let message = error_message(&body)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    tracing::warn!(status = status.as_u16(), %message, "API error");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn into_post_list(body: Value) -> ClientResult<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        other => Err(ClientError::UnexpectedBody(format!(
            "expected a list of posts, got {}",
            kind_of(&other)
        ))),
    }
}

/// Pulls the message out of `{"error":{"message":..}}`, `{"error":".."}` or `{"message":..}`.
fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error");
    error
        .and_then(|e| e.get("message"))
        .or(error)
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_messages_in_all_known_shapes() {
        assert_eq!(
            error_message(&json!({"error": {"code": "NOT_FOUND", "message": "Post not found"}}))
                .as_deref(),
            Some("Post not found")
        );
        assert_eq!(
            error_message(&json!({"error": "boom"})).as_deref(),
            Some("boom")
        );
        assert_eq!(
            error_message(&json!({"message": "Post not found"})).as_deref(),
            Some("Post not found")
        );
        assert_eq!(error_message(&Value::Null), None);
    }

    #[test]
    fn non_list_bodies_are_a_shape_error() {
        assert_eq!(into_post_list(json!([{"id": "a"}])).unwrap().len(), 1);

        let err = into_post_list(json!({"posts": []})).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedBody(_)));
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "unexpected response from API: expected a list of posts, got an object"
        );
    }

    #[test]
    fn endpoints_keep_base_path_and_escape_ids() {
        let api = HttpPostsApi::new(Url::parse("http://localhost:3001/blog/").unwrap()).unwrap();
        assert_eq!(
            api.endpoint(&["posts"]).unwrap().as_str(),
            "http://localhost:3001/blog/posts"
        );
        assert_eq!(
            api.endpoint(&["posts", "a b/c"]).unwrap().as_str(),
            "http://localhost:3001/blog/posts/a%20b%2Fc"
        );

        let bare = HttpPostsApi::new(Url::parse("http://localhost:3001").unwrap()).unwrap();
        assert_eq!(
            bare.endpoint(&["posts"]).unwrap().as_str(),
            "http://localhost:3001/posts"
        );
    }

    #[test]
    fn non_base_urls_are_rejected() {
        assert!(HttpPostsApi::new(Url::parse("mailto:someone@example.com").unwrap()).is_err());
    }
}
