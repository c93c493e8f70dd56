//! Article browsing and authenticated saving.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Article, Messages, Page};
use crate::services::ArchiveApi;
use crate::utils::{filter_items, normalize_article_id};

/// Articles requested by [`ArticleManager::load_recent`].
pub const RECENT_COUNT: u32 = 20;

/// State behind the article list screen.
///
/// The visible list is always a filter of the last successfully loaded list.
pub struct ArticleManager {
    api: Arc<dyn ArchiveApi>,
    messages: Messages,
    cookie: Option<String>,
    articles: Vec<Article>,
    filter: String,
}

impl ArticleManager {
    pub fn new(api: Arc<dyn ArchiveApi>, messages: Messages) -> Self {
        Self {
            api,
            messages,
            cookie: None,
            articles: Vec::new(),
            filter: String::new(),
        }
    }

    /// Use a login cookie for saves; blank cookies are ignored.
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.trim().is_empty());
        self
    }

    /// Reload the most recently updated articles.
    ///
    /// On failure the previous list is kept.
    pub async fn load_recent(&mut self) -> Result<&[Article]> {
        let articles = self.api.recent_articles(RECENT_COUNT).await?;
        log::debug!("Loaded {} recent articles", articles.len());
        self.articles = articles;
        Ok(&self.articles)
    }

    pub async fn view(&self, id: &str) -> Result<Article> {
        self.api.article(id).await
    }

    pub async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Page<Article>> {
        self.api.search_articles(query, page, limit).await
    }

    /// Save an article through the authenticated endpoint.
    ///
    /// Only a logical success refreshes the list. Returns the success text.
    pub async fn save(&mut self, input: &str) -> Result<String> {
        let id = normalize_article_id(input.trim())
            .ok_or_else(|| AppError::validation(&self.messages.invalid_article_id))?;

        let response = self.api.save_article(&id, self.cookie.as_deref()).await?;
        log::debug!("Save response for {}: {:?}", id, response);
        response.into_result()?;

        if let Err(e) = self.load_recent().await {
            log::warn!("Article {} saved but the list could not be refreshed: {}", id, e);
        }
        Ok(self.messages.article_saved(&id))
    }

    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Loaded articles matching the current filter.
    pub fn visible(&self) -> Vec<&Article> {
        filter_items(&self.articles, &self.filter)
    }
}
