//! Recent-saves history kept by the save screens.

use std::collections::VecDeque;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One save attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedItemRecord {
    pub id: String,
    /// Local wall-clock time of the attempt
    pub timestamp: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SavedItemRecord {
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: now(),
            success: true,
            error: None,
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: now(),
            success: false,
            error: Some(error.into()),
        }
    }
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Bounded history, most recent first.
#[derive(Debug, Clone)]
pub struct RecentSaves {
    entries: VecDeque<SavedItemRecord>,
    capacity: usize,
}

impl RecentSaves {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an attempt, evicting the oldest entry when full.
    pub fn push(&mut self, record: SavedItemRecord) {
        self.entries.push_front(record);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedItemRecord> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&SavedItemRecord> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentSaves {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleventh_save_evicts_oldest() {
        let mut saves = RecentSaves::default();
        for i in 0..11 {
            saves.push(SavedItemRecord::succeeded(format!("ID{i:06}")));
        }

        assert_eq!(saves.len(), 10);
        let ids: Vec<&str> = saves.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (1..11).rev().map(|i| format!("ID{i:06}")).collect();
        assert_eq!(ids, expected);
        assert!(!ids.contains(&"ID000000"));
    }

    #[test]
    fn failures_keep_error_text() {
        let mut saves = RecentSaves::new(3);
        saves.push(SavedItemRecord::failed("tlke2okg", "login required"));

        let latest = saves.latest().unwrap();
        assert!(!latest.success);
        assert_eq!(latest.error.as_deref(), Some("login required"));
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let mut saves = RecentSaves::new(0);
        saves.push(SavedItemRecord::succeeded("A"));
        saves.push(SavedItemRecord::succeeded("B"));
        assert_eq!(saves.len(), 1);
        assert_eq!(saves.latest().unwrap().id, "B");
    }
}
