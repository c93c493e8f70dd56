// src/services/mod.rs

//! Service layer for the saver application.
//!
//! - Backend access (`ArchiveApi`, `ApiClient`)
//! - Search throttling (`RateLimiter`, `SearchGate`, `Cooldown`)
//! - Screens: saving, article and paste lists, task monitor, statistics, about

pub mod about;
pub mod api;
pub mod articles;
pub mod dashboard;
pub mod limiter;
pub mod monitor;
pub mod pastes;
pub mod saver;

#[cfg(test)]
pub(crate) mod testing;

pub use about::{About, RevealGate};
pub use api::{ApiClient, ArchiveApi};
pub use articles::ArticleManager;
pub use dashboard::{ReportSection, StatisticsDashboard};
pub use limiter::{Cooldown, Decision, RateLimiter, SearchGate};
pub use monitor::{Poller, TaskMonitor};
pub use pastes::{PasteManager, PasteQuery};
pub use saver::{SaveKind, SaveOutcome, Saver};
