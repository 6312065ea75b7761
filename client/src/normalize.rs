//! Raw API document → display record.
//!
//! Post documents are loosely shaped: titles may be a language map or a
//! string, authors a record or a bare name, categories records or strings.
//! Each shape is classified once into a small tagged union and resolved here,
//! so the list view, the admin table and the detail view all show the same
//! thing for the same document.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const NO_DATE: &str = "-";

/// Render-ready post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Raw markup, shown unescaped.
    pub content: String,
    pub author: String,
    pub categories: Vec<String>,
    pub publish_date: Option<NaiveDate>,
    /// `MMM D, YYYY`, or `-` when the post has no date.
    pub published: String,
    pub image_url: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTitle<'a> {
    Localized(&'a Map<String, Value>),
    Text(&'a str),
    Scalar(&'a Value),
    Missing,
}

impl<'a> RawTitle<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) => RawTitle::Localized(map),
            Some(Value::String(text)) => RawTitle::Text(text),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => RawTitle::Scalar(v),
            _ => RawTitle::Missing,
        }
    }

    /// English first, then the first language that has text, then "Untitled".
    pub fn resolve(self) -> String {
        match self {
            RawTitle::Localized(map) => map
                .get("en")
                .and_then(non_blank)
                .or_else(|| map.values().find_map(non_blank))
                .unwrap_or(UNTITLED)
                .to_owned(),
            RawTitle::Text(text) if !text.trim().is_empty() => text.to_owned(),
            RawTitle::Scalar(value) => value.to_string(),
            RawTitle::Text(_) | RawTitle::Missing => UNTITLED.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAuthor<'a> {
    Profile { name: Option<&'a str> },
    Name(&'a str),
    Missing,
}

impl<'a> RawAuthor<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) => RawAuthor::Profile {
                name: map.get("name").and_then(Value::as_str),
            },
            Some(Value::String(name)) => RawAuthor::Name(name),
            _ => RawAuthor::Missing,
        }
    }

    pub fn resolve(self) -> String {
        let name = match self {
            RawAuthor::Profile { name } => name,
            RawAuthor::Name(name) => Some(name),
            RawAuthor::Missing => None,
        };
        name.filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawCategory<'a> {
    Record { name: Option<&'a str> },
    Name(&'a str),
    Other,
}

impl<'a> RawCategory<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => RawCategory::Record {
                name: map.get("name").and_then(Value::as_str),
            },
            Value::String(name) => RawCategory::Name(name),
            _ => RawCategory::Other,
        }
    }

    /// Entries without a name are dropped from display.
    pub fn resolve(self) -> Option<String> {
        match self {
            RawCategory::Record { name: Some(name) } | RawCategory::Name(name) => {
                Some(name.to_owned())
            }
            RawCategory::Record { name: None } | RawCategory::Other => None,
        }
    }
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// `id`, else `_id`. Accepts strings, numbers and `{"$oid": "..."}`.
pub fn resolve_id(raw: &Value) -> Option<String> {
    fn id_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map.get("$oid").and_then(id_text),
            _ => None,
        }
    }

    raw.get("id")
        .and_then(id_text)
        .or_else(|| raw.get("_id").and_then(id_text))
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn resolve_publish_date(value: Option<&Value>) -> (Option<NaiveDate>, String) {
    match value.and_then(Value::as_str).map(str::trim) {
        None | Some("") => (None, NO_DATE.to_owned()),
        Some(raw) => match parse_date(raw) {
            Some(date) => (Some(date), format_date(date)),
            // unparseable dates are shown as sent
            None => (None, raw.to_owned()),
        },
    }
}

fn text_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Normalizes one raw document. `None` when it has no usable identifier.
pub fn normalize_post(raw: &Value) -> Option<DisplayPost> {
    let id = resolve_id(raw)?;
    let (publish_date, published) = resolve_publish_date(raw.get("publishDate"));

    let categories = raw
        .get("categories")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|c| RawCategory::classify(c).resolve())
                .collect()
        })
        .unwrap_or_default();

    Some(DisplayPost {
        id,
        title: RawTitle::classify(raw.get("title")).resolve(),
        excerpt: text_field(raw, "excerpt"),
        content: text_field(raw, "content"),
        author: RawAuthor::classify(raw.get("author")).resolve(),
        categories,
        publish_date,
        published,
        image_url: text_field(raw, "imageUrl"),
        video_url: text_field(raw, "videoUrl"),
    })
}

/// Normalizes a list, skipping documents without an identifier.
pub fn normalize_posts(raw: &[Value]) -> Vec<DisplayPost> {
    raw.iter().filter_map(normalize_post).collect()
}
