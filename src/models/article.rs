//! Article data structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::filter::Searchable;

/// A discussion post saved by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Backend identifier (8 characters)
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,

    /// Identifier on the source site
    #[serde(rename = "luoguId", alias = "luogu_id", default)]
    pub luogu_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Raw Markdown body
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,

    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,

    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Title for display, falling back to the identifier.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

impl Searchable for Article {
    fn search_fields(&self) -> [Option<&str>; 4] {
        [
            self.title.as_deref(),
            self.content.as_deref(),
            self.author.as_deref(),
            Some(self.id.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "id": "ABCD1234",
            "luoguId": "ABCD1234",
            "title": "Segment tree notes",
            "author": "alice",
            "content": "# Hello $x^2$",
            "updated_at": "2025-03-01T12:00:00Z",
            "views": 12
        }))
        .unwrap();

        assert_eq!(article.id, "ABCD1234");
        assert_eq!(article.luogu_id.as_deref(), Some("ABCD1234"));
        assert_eq!(article.display_title(), "Segment tree notes");
        assert_eq!(article.extra.get("views"), Some(&serde_json::json!(12)));
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let article: Article =
            serde_json::from_value(serde_json::json!({ "id": "ABCD1234", "title": " " })).unwrap();
        assert_eq!(article.display_title(), "ABCD1234");
    }
}
