//! User-facing message templates.
//!
//! Templates use `{id}`, `{error}`, `{seconds}` and `{count}` placeholders.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub article_saved: String,
    pub paste_saved: String,
    pub paste_deleted: String,
    pub save_failed: String,
    pub delete_failed: String,
    pub load_failed: String,
    pub invalid_article_id: String,
    pub invalid_paste_id: String,
    pub paste_id_resolved: String,
    pub rate_limited: String,
    pub no_articles: String,
    pub no_pastes: String,
    pub no_tasks: String,
    pub cookie_hint: String,
    pub connectivity: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            article_saved: "文章 {id} 保存成功".to_string(),
            paste_saved: "剪切板 {id} 保存成功".to_string(),
            paste_deleted: "剪切板 {id} 删除成功".to_string(),
            save_failed: "保存失败: {error}".to_string(),
            delete_failed: "删除失败: {error}".to_string(),
            load_failed: "加载失败: {error}".to_string(),
            invalid_article_id: "文章ID格式错误，应为8位字母数字组合".to_string(),
            invalid_paste_id: "剪切板ID格式错误，请输入8位字母数字组合或洛谷剪切板链接"
                .to_string(),
            paste_id_resolved: "将使用剪切板ID: {id}".to_string(),
            rate_limited: "搜索过于频繁，请在 {seconds} 秒后重试".to_string(),
            no_articles: "暂无文章数据，请先保存一些洛谷文章".to_string(),
            no_pastes: "暂无剪切板数据".to_string(),
            no_tasks: "暂无任务".to_string(),
            cookie_hint: "建议：尝试使用Cookie进行身份验证".to_string(),
            connectivity: "网络连接错误，请检查后端服务是否启动".to_string(),
        }
    }
}

impl Messages {
    pub fn article_saved(&self, id: &str) -> String {
        self.article_saved.replace("{id}", id)
    }

    pub fn paste_saved(&self, id: &str) -> String {
        self.paste_saved.replace("{id}", id)
    }

    pub fn paste_deleted(&self, id: &str) -> String {
        self.paste_deleted.replace("{id}", id)
    }

    pub fn save_failed(&self, error: impl std::fmt::Display) -> String {
        self.save_failed.replace("{error}", &error.to_string())
    }

    pub fn delete_failed(&self, error: impl std::fmt::Display) -> String {
        self.delete_failed.replace("{error}", &error.to_string())
    }

    pub fn load_failed(&self, error: impl std::fmt::Display) -> String {
        self.load_failed.replace("{error}", &error.to_string())
    }

    pub fn paste_id_resolved(&self, id: &str) -> String {
        self.paste_id_resolved.replace("{id}", id)
    }

    pub fn rate_limited(&self, seconds: u32) -> String {
        self.rate_limited.replace("{seconds}", &seconds.to_string())
    }

    /// User-facing text for an error; an unreachable backend gets the
    /// localized connectivity message.
    pub fn describe(&self, error: &AppError) -> String {
        match error {
            AppError::Connectivity => self.connectivity.clone(),
            other => other.to_string(),
        }
    }

    /// Whether a failure text suggests retrying with a login cookie.
    pub fn wants_cookie(error: &str) -> bool {
        error.contains("重定向") || error.contains("登录") || error.contains("login")
    }
}
