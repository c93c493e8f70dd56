// src/services/api.rs

//! Backend API client.
//!
//! Every call is a single request with the client's fixed timeout: no
//! retries, no caching. Failures are normalized into three shapes:
//!
//! - no response at all → [`AppError::Connectivity`]
//! - error status → [`AppError::Server`] with the backend's `message`
//! - `success: false` in a 200 body → [`AppError::Rejected`] (left to the
//!   caller, see [`SaveResponse::into_result`])

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    AckResponse, ApiConfig, Article, Page, Paste, SaveResponse, Statistics, Task, unwrap_item,
    unwrap_list, unwrap_page, unwrap_tasks,
};
use crate::utils::{http, url::endpoint};

/// Operations offered by the archive backend.
#[async_trait]
pub trait ArchiveApi: Send + Sync {
    /// `GET /api/articles/recent?count=N`
    async fn recent_articles(&self, count: u32) -> Result<Vec<Article>>;

    /// `GET /api/articles/:id`
    async fn article(&self, id: &str) -> Result<Article>;

    /// `POST /api/articles/save`, authenticated with `cookie` when given.
    async fn save_article(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse>;

    /// `POST /api/articles/save-public`, no login required.
    async fn save_article_public(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse>;

    /// `GET /api/articles/search?q=&page=&limit=`
    async fn search_articles(&self, query: &str, page: u32, limit: u32) -> Result<Page<Article>>;

    /// `GET /api/statistics`
    async fn statistics(&self) -> Result<Statistics>;

    /// `GET /api/tasks?page=&limit=`
    async fn tasks(&self, page: u32, limit: u32) -> Result<Vec<Task>>;

    /// `GET /api/tasks/:id`
    async fn task(&self, id: &str) -> Result<Task>;

    /// `GET /api/pastes?page=&limit=&authorUid=`
    async fn pastes(&self, page: u32, limit: u32, author_uid: Option<&str>)
    -> Result<Page<Paste>>;

    /// `GET /api/pastes/:id`
    async fn paste(&self, id: &str) -> Result<Paste>;

    /// `POST /api/pastes/save`
    async fn save_paste(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse>;

    /// `DELETE /api/pastes/:id`
    async fn delete_paste(&self, id: &str) -> Result<AckResponse>;

    /// `GET /api/pastes/search?q=&page=&limit=`
    async fn search_pastes(&self, query: &str, page: u32, limit: u32) -> Result<Page<Paste>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveArticleBody<'a> {
    article_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cookie: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavePasteBody<'a> {
    paste_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cookie: Option<&'a str>,
}

/// HTTP implementation of [`ArchiveApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;
        Ok(Self {
            client: http::create_async_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of one resource inside a collection, with the id percent-encoded.
    fn resource_url(&self, collection: &str, id: &str) -> Result<Url> {
        let mut url = endpoint(&self.base_url, collection, &[])?;
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("base URL {} cannot hold a path", self.base_url)))?
            .push(id);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Value> {
        let request = self.client.get(url.clone());
        self.execute(Method::GET, url, request).await
    }

    async fn post<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<Value> {
        let request = self.client.post(url.clone()).json(body);
        self.execute(Method::POST, url, request).await
    }

    async fn delete(&self, url: Url) -> Result<Value> {
        let request = self.client.delete(url.clone());
        self.execute(Method::DELETE, url, request).await
    }

    /// Send a request and normalize its outcome.
    async fn execute(&self, method: Method, url: Url, request: RequestBuilder) -> Result<Value> {
        log::debug!("API request: {} {}", method, url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(e.into()),
            Err(e) => {
                log::error!("API request failed: {} {}: {}", method, url, e);
                return Err(AppError::Connectivity);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<Value>(&body).ok().and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
            });
            let error = AppError::server(status.as_u16(), message);
            log::error!("API error: {} {} -> {}: {}", method, url, status, error);
            return Err(error);
        }

        let body = response.bytes().await.map_err(|e| {
            log::error!("API response interrupted: {} {}: {}", method, url, e);
            if e.is_timeout() || e.is_body() {
                AppError::Connectivity
            } else {
                AppError::Http(e)
            }
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn paging(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("limit", limit.to_string())]
}

#[async_trait]
impl ArchiveApi for ApiClient {
    async fn recent_articles(&self, count: u32) -> Result<Vec<Article>> {
        let url = endpoint(
            &self.base_url,
            "/api/articles/recent",
            &[("count", count.to_string())],
        )?;
        unwrap_list(self.get(url).await?)
    }

    async fn article(&self, id: &str) -> Result<Article> {
        let url = self.resource_url("/api/articles", id)?;
        unwrap_item(self.get(url).await?)
    }

    async fn save_article(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        let url = endpoint(&self.base_url, "/api/articles/save", &[])?;
        let body = SaveArticleBody {
            article_id: id,
            cookie,
        };
        Ok(serde_json::from_value(self.post(url, &body).await?)?)
    }

    async fn save_article_public(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        let url = endpoint(&self.base_url, "/api/articles/save-public", &[])?;
        let body = SaveArticleBody {
            article_id: id,
            cookie: Some(cookie.unwrap_or("")),
        };
        Ok(serde_json::from_value(self.post(url, &body).await?)?)
    }

    async fn search_articles(&self, query: &str, page: u32, limit: u32) -> Result<Page<Article>> {
        let mut params = vec![("q", query.to_string())];
        params.extend(paging(page, limit));
        let url = endpoint(&self.base_url, "/api/articles/search", &params)?;
        unwrap_page(self.get(url).await?)
    }

    async fn statistics(&self) -> Result<Statistics> {
        let url = endpoint(&self.base_url, "/api/statistics", &[])?;
        unwrap_item(self.get(url).await?)
    }

    async fn tasks(&self, page: u32, limit: u32) -> Result<Vec<Task>> {
        let url = endpoint(&self.base_url, "/api/tasks", &paging(page, limit))?;
        unwrap_tasks(self.get(url).await?)
    }

    async fn task(&self, id: &str) -> Result<Task> {
        let url = self.resource_url("/api/tasks", id)?;
        unwrap_item(self.get(url).await?)
    }

    async fn pastes(
        &self,
        page: u32,
        limit: u32,
        author_uid: Option<&str>,
    ) -> Result<Page<Paste>> {
        let mut params = paging(page, limit);
        if let Some(uid) = author_uid.filter(|uid| !uid.is_empty()) {
            params.push(("authorUid", uid.to_string()));
        }
        let url = endpoint(&self.base_url, "/api/pastes", &params)?;
        unwrap_page(self.get(url).await?)
    }

    async fn paste(&self, id: &str) -> Result<Paste> {
        let url = self.resource_url("/api/pastes", id)?;
        unwrap_item(self.get(url).await?)
    }

    async fn save_paste(&self, id: &str, cookie: Option<&str>) -> Result<SaveResponse> {
        let url = endpoint(&self.base_url, "/api/pastes/save", &[])?;
        let body = SavePasteBody {
            paste_id: id,
            cookie,
        };
        Ok(serde_json::from_value(self.post(url, &body).await?)?)
    }

    async fn delete_paste(&self, id: &str) -> Result<AckResponse> {
        let url = self.resource_url("/api/pastes", id)?;
        Ok(serde_json::from_value(self.delete(url).await?)?)
    }

    async fn search_pastes(&self, query: &str, page: u32, limit: u32) -> Result<Page<Paste>> {
        let mut params = vec![("q", query.to_string())];
        params.extend(paging(page, limit));
        let url = endpoint(&self.base_url, "/api/pastes/search", &params)?;
        unwrap_page(self.get(url).await?)
    }
}
