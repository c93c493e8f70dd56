//! Paste browsing, saving and deletion.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Messages, Pagination, Paste};
use crate::services::ArchiveApi;
use crate::utils::{extract_id, filter_items};

/// Which page of pastes to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteQuery {
    pub page: u32,
    pub limit: u32,
    pub author_uid: Option<String>,
}

impl Default for PasteQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            author_uid: None,
        }
    }
}

/// State behind the paste list screen.
pub struct PasteManager {
    api: Arc<dyn ArchiveApi>,
    messages: Messages,
    query: PasteQuery,
    pastes: Vec<Paste>,
    pagination: Option<Pagination>,
    filter: String,
}

impl PasteManager {
    pub fn new(api: Arc<dyn ArchiveApi>, messages: Messages) -> Self {
        Self {
            api,
            messages,
            query: PasteQuery::default(),
            pastes: Vec::new(),
            pagination: None,
            filter: String::new(),
        }
    }

    pub fn with_query(mut self, query: PasteQuery) -> Self {
        self.query = query;
        self
    }

    /// Reload the current page. On failure the previous list is kept.
    pub async fn load(&mut self) -> Result<&[Paste]> {
        let page = self
            .api
            .pastes(
                self.query.page,
                self.query.limit,
                self.query.author_uid.as_deref(),
            )
            .await?;
        log::debug!("Loaded {} pastes (page {})", page.items.len(), self.query.page);
        self.pastes = page.items;
        self.pagination = page.pagination;
        Ok(&self.pastes)
    }

    pub async fn view(&self, input: &str) -> Result<Paste> {
        let id = self.resolve(input)?;
        self.api.paste(&id).await
    }

    /// Save a paste from an ID or link; refreshes the list on success.
    pub async fn save(&mut self, input: &str) -> Result<String> {
        let id = self.resolve(input)?;
        self.api.save_paste(&id, None).await?.into_result()?;
        self.refresh_after(&id).await;
        Ok(self.messages.paste_saved(&id))
    }

    /// Delete a paste; refreshes the list on success.
    pub async fn delete(&mut self, input: &str) -> Result<String> {
        let id = self.resolve(input)?;
        self.api.delete_paste(&id).await?.into_result()?;
        self.refresh_after(&id).await;
        Ok(self.messages.paste_deleted(&id))
    }

    async fn refresh_after(&mut self, id: &str) {
        if let Err(e) = self.load().await {
            log::warn!("Paste {} updated but the list could not be refreshed: {}", id, e);
        }
    }

    fn resolve(&self, input: &str) -> Result<String> {
        extract_id(input.trim()).ok_or_else(|| AppError::validation(&self.messages.invalid_paste_id))
    }

    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    pub fn pastes(&self) -> &[Paste] {
        &self.pastes
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Loaded pastes matching the current filter.
    pub fn visible(&self) -> Vec<&Paste> {
        filter_items(&self.pastes, &self.filter)
    }
}
