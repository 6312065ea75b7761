/*
 * Responsibility
 * - Posts の request/response DTO
 * - request は緩く受けて into_document() で必須項目を検証 (400 の理由を返すため)
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 */
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::post_repo::{Author, Category, PostDocument, PostRow};

/// Titles are normally a language map; a bare string is taken as the English title.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TitleInput {
    Localized(BTreeMap<String, Option<String>>),
    Plain(String),
}

impl TitleInput {
    fn into_map(self) -> BTreeMap<String, String> {
        match self {
            TitleInput::Localized(map) => map
                .into_iter()
                .filter_map(|(lang, text)| match text {
                    Some(text) if !text.trim().is_empty() => Some((lang, text)),
                    _ => None,
                })
                .collect(),
            TitleInput::Plain(text) if !text.trim().is_empty() => {
                BTreeMap::from([("en".to_string(), text)])
            }
            TitleInput::Plain(_) => BTreeMap::new(),
        }
    }
}

/// Body of `POST /posts` and `PUT /posts/{id}`. Both carry the full post.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<TitleInput>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    pub publish_date: Option<String>,
    pub categories: Option<Vec<Category>>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl PostRequest {
    /// Checks required fields and builds the document to persist.
    pub fn into_document(self) -> Result<PostDocument, &'static str> {
        let title = self.title.map(TitleInput::into_map).unwrap_or_default();
        if !title.contains_key("en") {
            return Err("title.en is required");
        }

        let content = required(self.content).ok_or("content is required")?;

        let publish_date = required(self.publish_date).ok_or("publishDate is required")?;
        let publish_date = parse_publish_date(&publish_date)
            .ok_or("publishDate must be an RFC 3339 timestamp or a YYYY-MM-DD date")?;

        let image_url = required(self.image_url).ok_or("imageUrl is required")?;

        Ok(PostDocument {
            title,
            excerpt: self.excerpt,
            content,
            author: self.author,
            publish_date,
            categories: self.categories.unwrap_or_default(),
            image_url,
            video_url: self.video_url.filter(|v| !v.trim().is_empty()),
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts a full timestamp, or the bare date an HTML date input produces
/// (stored as midnight UTC).
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String, // encoded
    #[serde(flatten)]
    pub document: PostDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_row(public_id: String, row: PostRow) -> Self {
        Self {
            id: public_id,
            document: row.document,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
