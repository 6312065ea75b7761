//! Comma-separated category input → `{id, name}` records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// A category with a freshly synthesized id.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: format!("cat-{}", Uuid::new_v4().simple()),
            name: name.into(),
        }
    }
}

/// Splits on commas and trims each segment. Empty segments are dropped, so
/// empty input gives no categories.
pub fn parse_category_list(input: &str) -> Vec<Category> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Category::named)
        .collect()
}

/// Inverse direction for edit forms: the names of a document's categories,
/// joined with `", "`.
pub fn join_category_names(raw_categories: Option<&Value>) -> String {
    raw_categories
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|c| match c {
                    Value::String(name) => Some(name.as_str()),
                    other => other.get("name").and_then(Value::as_str),
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
