//! Statistics dashboard.

use std::sync::Arc;

use crate::error::Result;
use crate::models::Statistics;
use crate::services::ArchiveApi;
use crate::utils::{format_decimal, format_number, percentage};

/// One titled block of formatted counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    pub items: Vec<(&'static str, String)>,
}

impl ReportSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    fn item(mut self, key: &'static str, value: String) -> Self {
        self.items.push((key, value));
        self
    }

    /// Value of the item labelled `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn as_f64(value: Option<u64>) -> Option<f64> {
    value.map(|v| v as f64)
}

/// Format a statistics snapshot for display.
pub fn report(stats: &Statistics) -> Vec<ReportSection> {
    let tasks = &stats.tasks;
    let storage = &stats.storage;
    let perf = &stats.performance;

    let mut articles = ReportSection::new("文章")
        .item("总数", format_number(stats.articles.total))
        .item("今日新增", format_number(stats.articles.today));
    for category in &stats.articles.by_category {
        let share = percentage(as_f64(category.count), as_f64(stats.articles.total));
        articles.items.push((
            "分类",
            format!("{} {} ({}%)", category.name, format_number(category.count), share),
        ));
    }

    vec![
        articles,
        ReportSection::new("用户")
            .item("总数", format_number(stats.users.total))
            .item("活跃", format_number(stats.users.active)),
        ReportSection::new("存储")
            .item("已用 (MB)", format_decimal(storage.used_mb))
            .item("总量 (MB)", format_decimal(storage.total_mb))
            .item("使用率 (%)", percentage(storage.used_mb, storage.total_mb)),
        ReportSection::new("任务")
            .item("总数", format_number(tasks.total))
            .item("成功", format_number(tasks.success))
            .item("失败", format_number(tasks.failed))
            .item("等待", format_number(tasks.pending))
            .item("成功率 (%)", percentage(as_f64(tasks.success), as_f64(tasks.total))),
        ReportSection::new("请求")
            .item("今日", format_number(stats.requests.today))
            .item("累计", format_number(stats.requests.total))
            .item("今日错误", format_number(stats.errors.today))
            .item("累计错误", format_number(stats.errors.total))
            .item(
                "错误率 (%)",
                percentage(as_f64(stats.errors.total), as_f64(stats.requests.total)),
            ),
        ReportSection::new("性能")
            .item("平均响应 (ms)", format_decimal(perf.response_time))
            .item("每秒请求", format_decimal(perf.requests_per_second))
            .item("可用率 (%)", format_decimal(perf.uptime)),
    ]
}

/// Loads and formats backend statistics.
pub struct StatisticsDashboard {
    api: Arc<dyn ArchiveApi>,
    stats: Option<Statistics>,
}

impl StatisticsDashboard {
    pub fn new(api: Arc<dyn ArchiveApi>) -> Self {
        Self { api, stats: None }
    }

    /// Fetch a fresh snapshot. On failure the previous one is kept.
    pub async fn load(&mut self) -> Result<&Statistics> {
        let stats = self.api.statistics().await?;
        Ok(self.stats.insert(stats))
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }

    /// Sections for the last loaded snapshot; empty before the first load.
    pub fn sections(&self) -> Vec<ReportSection> {
        self.stats.as_ref().map(report).unwrap_or_default()
    }
}
