//! Response envelopes returned by the backend.
//!
//! The backend does not wrap every endpoint the same way: lists arrive as
//! `{ data: { data: [...] } }`, `{ data: [...] }` or a bare array depending on
//! the route. Callers pick the unwrapping that matches their endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Task;

/// Result of a save request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<SaveData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Inner outcome reported by the scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SaveData {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveResponse {
    /// Whether both the request and the scrape succeeded.
    pub fn is_saved(&self) -> bool {
        self.success && self.data.as_ref().is_some_and(|d| d.success)
    }

    /// Turn a logical failure into [`AppError::Rejected`].
    ///
    /// On success returns the backend message, if any.
    pub fn into_result(self) -> Result<Option<String>> {
        if self.is_saved() {
            return Ok(self.data.and_then(|d| d.message).or(self.message));
        }
        let message = self
            .data
            .and_then(|d| d.message)
            .or(self.message)
            .unwrap_or_else(|| "unknown error".to_string());
        Err(AppError::rejected(message))
    }
}

/// Plain acknowledgement (delete).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckResponse {
    pub fn into_result(self) -> Result<Option<String>> {
        if self.success {
            Ok(self.message)
        } else {
            Err(AppError::rejected(
                self.message.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub total: Option<u64>,
    #[serde(alias = "totalPages", alias = "pages")]
    pub total_pages: Option<u64>,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

/// Locate the list inside a response: `data.data`, then `data`, then the body.
fn list_value(body: &Value) -> Option<&Value> {
    let data = body.get("data");
    match (data.and_then(|d| d.get("data")), data) {
        (Some(inner), _) if inner.is_array() => Some(inner),
        (_, Some(data)) if data.is_array() => Some(data),
        _ if body.is_array() => Some(body),
        _ => None,
    }
}

/// Extract a list, yielding an empty one when no array is found.
pub fn unwrap_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    match list_value(&body) {
        Some(list) => Ok(serde_json::from_value(list.clone())?),
        None => Ok(Vec::new()),
    }
}

/// Extract a list together with its pagination block.
pub fn unwrap_page<T: DeserializeOwned>(body: Value) -> Result<Page<T>> {
    let pagination = body
        .get("pagination")
        .or_else(|| body.get("data").and_then(|d| d.get("pagination")))
        .map(|p| serde_json::from_value(p.clone()))
        .transpose()?;
    Ok(Page {
        items: unwrap_list(body)?,
        pagination,
    })
}

/// Extract a single object from `data`, or the body itself.
pub fn unwrap_item<T: DeserializeOwned>(body: Value) -> Result<T> {
    let value = match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Extract `data.tasks` from a successful task listing.
pub fn unwrap_tasks(body: Value) -> Result<Vec<Task>> {
    let ok = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    match body.get("data").and_then(|d| d.get("tasks")) {
        Some(tasks) if ok => Ok(serde_json::from_value(tasks.clone())?),
        _ => Ok(Vec::new()),
    }
}
