//! In-memory [`ArchiveApi`] used by the view-layer tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{
    AckResponse, Article, Page, Paste, SaveData, SaveResponse, Statistics, Task,
};
use crate::services::ArchiveApi;

#[derive(Default)]
pub struct FakeApi {
    offline: bool,
    reject: Option<String>,
    articles: Vec<Article>,
    pastes: Vec<Paste>,
    tasks: Mutex<Vec<Task>>,
    statistics: Statistics,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    /// Every call fails as if the backend were down.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Saves and deletes answer 200 with `success: false`.
    pub fn reject_saves(mut self, message: &str) -> Self {
        self.reject = Some(message.to_string());
        self
    }

    pub fn with_articles(mut self, articles: Vec<Article>) -> Self {
        self.articles = articles;
        self
    }

    pub fn with_pastes(mut self, pastes: Vec<Paste>) -> Self {
        self.pastes = pastes;
        self
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().unwrap() = tasks;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call(&self, entry: String) -> Result<()> {
        self.calls.lock().unwrap().push(entry);
        if self.offline {
            Err(AppError::Connectivity)
        } else {
            Ok(())
        }
    }

    fn save_response(&self) -> SaveResponse {
        SaveResponse {
            success: true,
            data: Some(SaveData {
                success: self.reject.is_none(),
                message: self.reject.clone(),
            }),
            message: None,
        }
    }

    fn page<T: Clone>(items: &[T]) -> Page<T> {
        Page {
            items: items.to_vec(),
            pagination: None,
        }
    }
}

fn with_cookie(entry: String, cookie: Option<&str>) -> String {
    match cookie {
        Some(cookie) => format!("{entry} cookie={cookie}"),
        None => entry,
    }
}

#[async_trait]
impl ArchiveApi for FakeApi {
    async fn recent_articles(&self, count: u32) -> Result<Vec<Article>> {
        self.call(format!("recent_articles {count}"))?;
        Ok(self.articles.iter().take(count as usize).cloned().collect())
    }

    async fn article(&self, id: &str) -> Result<Article> {
        self.call(format!("article {id}"))?;
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::server(404, Some("article not found")))
    }

    async fn save_article(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        self.call(with_cookie(format!("save_article {id}"), cookie))?;
        Ok(self.save_response())
    }

    async fn save_article_public(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        self.call(with_cookie(format!("save_article_public {id}"), cookie))?;
        Ok(self.save_response())
    }

    async fn search_articles(&self, query: &str, page: u32, limit: u32) -> Result<Page<Article>> {
        self.call(format!("search_articles {query} {page} {limit}"))?;
        Ok(Self::page(&self.articles))
    }

    async fn statistics(&self) -> Result<Statistics> {
        self.call("statistics".to_string())?;
        Ok(self.statistics.clone())
    }

    async fn tasks(&self, page: u32, limit: u32) -> Result<Vec<Task>> {
        self.call(format!("tasks {page} {limit}"))?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn task(&self, id: &str) -> Result<Task> {
        self.call(format!("task {id}"))?;
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::server(404, None::<String>))
    }

    async fn pastes(
        &self,
        page: u32,
        limit: u32,
        author_uid: Option<&str>,
    ) -> Result<Page<Paste>> {
        self.call(format!("pastes {page} {limit} {}", author_uid.unwrap_or("-")))?;
        Ok(Self::page(&self.pastes))
    }

    async fn paste(&self, id: &str) -> Result<Paste> {
        self.call(format!("paste {id}"))?;
        self.pastes
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::server(404, Some("paste not found")))
    }

    async fn save_paste(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        self.call(with_cookie(format!("save_paste {id}"), cookie))?;
        Ok(self.save_response())
    }

    async fn delete_paste(&self, id: &str) -> Result<AckResponse> {
        self.call(format!("delete_paste {id}"))?;
        Ok(AckResponse {
            success: self.reject.is_none(),
            message: self.reject.clone(),
        })
    }

    async fn search_pastes(&self, query: &str, page: u32, limit: u32) -> Result<Page<Paste>> {
        self.call(format!("search_pastes {query} {page} {limit}"))?;
        Ok(Self::page(&self.pastes))
    }
}

/// Build an article with the given id and title.
pub fn article(id: &str, title: &str) -> Article {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "author": "alice",
        "content": format!("body of {title}")
    }))
    .unwrap()
}

/// Build a paste with the given id and content.
pub fn paste(id: &str, content: &str) -> Paste {
    serde_json::from_value(serde_json::json!({ "id": id, "content": content })).unwrap()
}

/// Build a task with the given id and status.
pub fn task(id: &str, status: &str) -> Task {
    serde_json::from_value(serde_json::json!({ "id": id, "type": "article", "status": status }))
        .unwrap()
}
