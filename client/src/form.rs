//! Create/edit post form.
//!
//! Required fields are checked here, before anything goes over the network.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::PostsApi;
use crate::categories::{Category, join_category_names, parse_category_list};
use crate::error::{ClientError, ClientResult};

pub const TITLE_AND_CONTENT_REQUIRED: &str = "English title and content are required.";
pub const PUBLISH_DATE_REQUIRED: &str = "Publish date is required.";

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: Map<String, Value>,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    pub publish_date: String,
    pub categories: Vec<Category>,
    pub image_url: String,
    pub video_url: String,
}

/// Form state as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForm {
    pub title_en: String,
    /// Titles in other languages, carried through an edit untouched.
    pub other_titles: Map<String, Value>,
    pub excerpt: String,
    pub content: String,
    /// Comma-separated category names.
    pub categories: String,
    pub image_url: String,
    /// `YYYY-MM-DD`.
    pub publish_date: String,
    pub video_url: String,
    /// Kept as the API sent it, so an edit does not drop the author.
    pub author: Option<Value>,
}

impl PostForm {
    /// Pre-fills an edit form from a fetched document.
    pub fn from_document(doc: &Value) -> Self {
        let text = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };

        let (title_en, other_titles) = match doc.get("title") {
            Some(Value::Object(map)) => {
                let mut others = map.clone();
                let en = others
                    .remove("en")
                    .and_then(|v| v.as_str().map(str::to_owned))
                    .unwrap_or_default();
                (en, others)
            }
            Some(Value::String(title)) => (title.clone(), Map::new()),
            _ => (String::new(), Map::new()),
        };

        let publish_date = text("publishDate")
            .split('T')
            .next()
            .unwrap_or_default()
            .to_owned();

        Self {
            title_en,
            other_titles,
            excerpt: text("excerpt"),
            content: text("content"),
            categories: join_category_names(doc.get("categories")),
            image_url: text("imageUrl"),
            publish_date,
            video_url: text("videoUrl"),
            author: doc.get("author").filter(|a| !a.is_null()).cloned(),
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.title_en.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ClientError::Validation(TITLE_AND_CONTENT_REQUIRED.into()));
        }
        if self.publish_date.trim().is_empty() {
            return Err(ClientError::Validation(PUBLISH_DATE_REQUIRED.into()));
        }
        Ok(())
    }

    /// Validates, then builds the request body. Categories get fresh ids.
    pub fn into_payload(self) -> ClientResult<PostPayload> {
        self.validate()?;

        let mut title = Map::new();
        title.insert("en".into(), Value::String(self.title_en));
        for (lang, text) in self.other_titles {
            title.entry(lang).or_insert(text);
        }

        Ok(PostPayload {
            title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            publish_date: self.publish_date.trim().to_owned(),
            categories: parse_category_list(&self.categories),
            image_url: self.image_url,
            video_url: self.video_url,
        })
    }
}

/// Submits a new post. Invalid forms never reach the API.
pub async fn submit_new_post<A: PostsApi + ?Sized>(api: &A, form: PostForm) -> ClientResult<Value> {
    let payload = form.into_payload()?;
    api.create_post(&payload).await
}

/// Submits an edited post (full replace). Invalid forms never reach the API.
pub async fn submit_post_update<A: PostsApi + ?Sized>(
    api: &A,
    id: &str,
    form: PostForm,
) -> ClientResult<Value> {
    let payload = form.into_payload()?;
    api.update_post(id, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingApi;
    use serde_json::json;

    fn filled() -> PostForm {
        PostForm {
            title_en: "Hello".into(),
            content: "<p>Body</p>".into(),
            publish_date: "2024-05-01".into(),
            categories: "Rust, Web".into(),
            image_url: "https://img.test/a.png".into(),
            ..PostForm::default()
        }
    }

    #[test]
    fn blank_title_or_content_is_rejected() {
        for form in [
            PostForm { title_en: "  ".into(), ..filled() },
            PostForm { content: String::new(), ..filled() },
        ] {
            let err = form.validate().unwrap_err();
            assert_eq!(err.to_string(), TITLE_AND_CONTENT_REQUIRED);
        }
    }

    #[test]
    fn missing_publish_date_is_rejected() {
        let form = PostForm { publish_date: String::new(), ..filled() };
        assert_eq!(form.validate().unwrap_err().to_string(), PUBLISH_DATE_REQUIRED);
    }

    #[test]
    fn payload_has_api_field_names() {
        let payload = filled().into_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["title"], json!({"en": "Hello"}));
        assert_eq!(value["publishDate"], "2024-05-01");
        assert_eq!(value["imageUrl"], "https://img.test/a.png");
        assert_eq!(value["videoUrl"], "");
        assert_eq!(value["categories"][0]["name"], "Rust");
        assert_eq!(value["categories"][1]["name"], "Web");
        assert!(value.get("author").is_none());
    }

    #[test]
    fn edit_form_is_prefilled_from_document() {
        let doc = json!({
            "id": "abc",
            "title": {"en": "Hello", "es": "Hola"},
            "content": "body",
            "author": {"name": "Ada"},
            "publishDate": "2024-05-01T00:00:00Z",
            "categories": [{"id": "1", "name": "Rust"}, {"id": "2", "name": "Web"}],
            "imageUrl": "https://img.test/a.png"
        });

        let form = PostForm::from_document(&doc);
        assert_eq!(form.title_en, "Hello");
        assert_eq!(form.publish_date, "2024-05-01");
        assert_eq!(form.categories, "Rust, Web");
        assert_eq!(form.excerpt, "");

        let payload = form.into_payload().unwrap();
        assert_eq!(
            Value::Object(payload.title),
            json!({"en": "Hello", "es": "Hola"})
        );
        assert_eq!(payload.author, Some(json!({"name": "Ada"})));
    }

    #[tokio::test]
    async fn empty_content_never_reaches_the_api() {
        let api = RecordingApi::default();
        let form = PostForm { content: "   ".into(), ..filled() };

        let err = submit_new_post(&api, form).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(api.calls(), 0);

        let form = PostForm { publish_date: String::new(), ..filled() };
        assert!(submit_post_update(&api, "abc", form).await.is_err());
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn valid_forms_are_sent() {
        let api = RecordingApi::default();
        submit_new_post(&api, filled()).await.unwrap();
        submit_post_update(&api, "abc", filled()).await.unwrap();
        assert_eq!(api.calls(), 2);
    }
}
