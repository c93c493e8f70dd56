//! Backend task data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a backend scraping task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Short label shown in task listings.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "等待中",
            TaskStatus::Processing => "处理中",
            TaskStatus::Completed => "已完成",
            TaskStatus::Failed => "失败",
            TaskStatus::Unknown => "未知",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A unit of scraping work tracked by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    pub status: TaskStatus,

    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: Option<f64>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub attempts: Option<u32>,

    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,

    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Per-status task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl TaskStats {
    /// Count tasks by status.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(
            Self {
                total: tasks.len(),
                ..Self::default()
            },
            |mut stats, task| {
                match task.status {
                    TaskStatus::Pending => stats.pending += 1,
                    TaskStatus::Processing => stats.processing += 1,
                    TaskStatus::Completed => stats.completed += 1,
                    TaskStatus::Failed => stats.failed += 1,
                    TaskStatus::Unknown => {}
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": "article",
            "status": status,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn unknown_status_is_tolerated() {
        assert_eq!(task("1", "paused").status, TaskStatus::Unknown);
    }

    #[test]
    fn numeric_id_becomes_string() {
        let task: Task =
            serde_json::from_value(serde_json::json!({ "id": 42, "status": "pending" })).unwrap();
        assert_eq!(task.id, "42");
        assert!(task.kind.is_empty());
    }

    #[test]
    fn stats_count_each_status() {
        let tasks = vec![
            task("1", "pending"),
            task("2", "processing"),
            task("3", "completed"),
            task("4", "completed"),
            task("5", "failed"),
            task("6", "weird"),
        ];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(
            stats,
            TaskStats {
                total: 6,
                pending: 1,
                processing: 1,
                completed: 2,
                failed: 1,
            }
        );
    }
}
