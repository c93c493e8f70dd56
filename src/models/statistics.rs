//! Backend statistics snapshot.
//!
//! Every counter is optional; the backend omits sections it does not track.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Statistics {
    pub articles: ArticleStats,
    pub users: UserStats,
    pub storage: StorageStats,
    pub tasks: TaskCounters,
    pub requests: CounterStats,
    pub errors: CounterStats,
    pub performance: PerformanceStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArticleStats {
    pub total: Option<u64>,
    pub today: Option<u64>,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryCount {
    pub name: String,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserStats {
    pub total: Option<u64>,
    pub active: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageStats {
    pub total_mb: Option<f64>,
    pub used_mb: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskCounters {
    pub total: Option<u64>,
    pub success: Option<u64>,
    pub failed: Option<u64>,
    pub pending: Option<u64>,
}

/// Daily and lifetime counters (requests, errors).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CounterStats {
    pub today: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceStats {
    /// Average response time in milliseconds
    pub response_time: Option<f64>,
    pub requests_per_second: Option<f64>,
    /// Uptime percentage (0-100)
    pub uptime: Option<f64>,
}
