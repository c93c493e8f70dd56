//! Save screens: turn free-form input into save requests and keep a
//! recent-saves history.
//!
//! Input that does not resolve to an identifier is rejected before any
//! request is sent and is not recorded. Every request that is sent records
//! exactly one history entry, success or failure.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Messages, RecentSaves, SaveResponse, SavedItemRecord};
use crate::services::ArchiveApi;
use crate::utils::{extract_id, normalize_article_id};

/// What is being saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// Article via the public endpoint: upper-cased bare IDs only
    Article,
    /// Paste: bare IDs (case kept) or paste links
    Paste,
}

impl SaveKind {
    /// Resolve user input into an identifier.
    pub fn resolve(self, input: &str) -> Option<String> {
        let input = input.trim();
        match self {
            SaveKind::Article => normalize_article_id(input),
            SaveKind::Paste => extract_id(input),
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: String,
    /// Success text for display
    pub message: String,
    /// Message returned by the backend, if any
    pub detail: Option<String>,
}

/// Save form with its recent-saves history.
pub struct Saver {
    api: Arc<dyn ArchiveApi>,
    kind: SaveKind,
    cookie: Option<String>,
    history: RecentSaves,
    messages: Messages,
    max_concurrent: usize,
}

impl Saver {
    pub fn new(api: Arc<dyn ArchiveApi>, kind: SaveKind, messages: Messages) -> Self {
        Self {
            api,
            kind,
            cookie: None,
            history: RecentSaves::default(),
            messages,
            max_concurrent: 1,
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = RecentSaves::new(capacity);
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Attach a login cookie; blank cookies are ignored.
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn history(&self) -> &RecentSaves {
        &self.history
    }

    /// Resolve `input` or produce the validation error shown next to it.
    pub fn resolve(&self, input: &str) -> Result<String> {
        self.kind.resolve(input).ok_or_else(|| {
            AppError::validation(match self.kind {
                SaveKind::Article => &self.messages.invalid_article_id,
                SaveKind::Paste => &self.messages.invalid_paste_id,
            })
        })
    }

    /// Save one item.
    pub async fn save(&mut self, input: &str) -> Result<SaveOutcome> {
        let id = self.resolve(input)?;
        let result = self.request(&id).await;
        self.record(id, result)
    }

    /// Save several items concurrently.
    ///
    /// Inputs that fail validation are returned as errors without a
    /// request; the rest are recorded in completion order.
    pub async fn save_many(&mut self, inputs: &[String]) -> Vec<Result<SaveOutcome>> {
        let mut outcomes = Vec::with_capacity(inputs.len());
        let mut ids = Vec::new();
        for input in inputs {
            match self.resolve(input) {
                Ok(id) => ids.push(id),
                Err(e) => outcomes.push(Err(e)),
            }
        }

        let responses = {
            let this = &*self;
            stream::iter(ids)
                .map(|id| async move {
                    let result = this.request(&id).await;
                    (id, result)
                })
                .buffer_unordered(this.max_concurrent)
                .collect::<Vec<_>>()
                .await
        };

        for (id, result) in responses {
            outcomes.push(self.record(id, result));
        }
        outcomes
    }

    async fn request(&self, id: &str) -> Result<Option<String>> {
        let cookie = self.cookie.as_deref();
        let response: SaveResponse = match self.kind {
            SaveKind::Article => self.api.save_article_public(id, cookie).await?,
            SaveKind::Paste => self.api.save_paste(id, cookie).await?,
        };
        response.into_result()
    }

    fn record(&mut self, id: String, result: Result<Option<String>>) -> Result<SaveOutcome> {
        match result {
            Ok(detail) => {
                log::info!("Saved {:?} {}", self.kind, id);
                self.history.push(SavedItemRecord::succeeded(&id));
                let message = match self.kind {
                    SaveKind::Article => self.messages.article_saved(&id),
                    SaveKind::Paste => self.messages.paste_saved(&id),
                };
                Ok(SaveOutcome {
                    id,
                    message,
                    detail,
                })
            }
            Err(error) => {
                log::warn!("Save of {:?} {} failed: {}", self.kind, id, error);
                let text = self.messages.describe(&error);
                self.history.push(SavedItemRecord::failed(&id, text));
                Err(error)
            }
        }
    }
}
