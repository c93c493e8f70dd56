// src/models/mod.rs

//! Domain models for the archive client.
//!
//! This module contains the data structures exchanged with the backend and
//! the transient client-side state built from them.

mod article;
mod build_info;
mod config;
mod envelope;
mod locale;
mod paste;
mod saved;
mod statistics;
mod task;

// Re-export all public types
pub use article::Article;
pub use build_info::BuildInfo;
pub use config::{AboutConfig, ApiConfig, Config, HistoryConfig, MonitorConfig, SearchConfig};
pub use envelope::{
    AckResponse, Page, Pagination, SaveData, SaveResponse, unwrap_item, unwrap_list, unwrap_page,
    unwrap_tasks,
};
pub use locale::Messages;
pub use paste::Paste;
pub use saved::{RecentSaves, SavedItemRecord};
pub use statistics::{
    ArticleStats, CategoryCount, CounterStats, PerformanceStats, Statistics, StorageStats,
    TaskCounters, UserStats,
};
pub use task::{Task, TaskStats, TaskStatus};

/// Accept identifiers the backend may emit as either strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
