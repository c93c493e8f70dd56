//! Paste data structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::filter::Searchable;

/// A code/text snippet saved by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paste {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(rename = "authorUid", alias = "author_uid", default)]
    pub author_uid: Option<Value>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub public: Option<bool>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,

    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paste {
    /// Author UID rendered as text, whichever JSON type the backend used.
    pub fn author_uid(&self) -> Option<String> {
        match self.author_uid.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Number of lines in the body.
    pub fn line_count(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.lines().count())
    }
}

impl Searchable for Paste {
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
    fn numeric_author_uid_is_rendered() {
        let paste: Paste = serde_json::from_value(serde_json::json!({
            "id": "tlke2okg",
            "authorUid": 123456,
            "content": "int main() {}\nreturn 0;"
        }))
        .unwrap();

        assert_eq!(paste.author_uid().as_deref(), Some("123456"));
        assert_eq!(paste.line_count(), 2);
    }
}
