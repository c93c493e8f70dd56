//! Task monitor with optional background polling.
//!
//! Poll results travel over an `mpsc` channel and are applied by the owning
//! [`TaskMonitor`], so the task list has a single update path.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{MonitorConfig, Task, TaskStats};
use crate::services::ArchiveApi;

/// Repeating background job that stops when dropped.
pub struct Poller {
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Run `tick` every `period`, starting one period from now.
    ///
    /// The job ends early when `tick` resolves to `false`.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if !tick().await {
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fetch one page of tasks, treating any failure as an empty list.
async fn fetch_tasks(api: &dyn ArchiveApi, page: u32, limit: u32) -> Vec<Task> {
    match api.tasks(page, limit).await {
        Ok(tasks) => tasks,
        Err(e) => {
            log::error!("Failed to load tasks: {}", e);
            Vec::new()
        }
    }
}

pub struct TaskMonitor {
    api: Arc<dyn ArchiveApi>,
    config: MonitorConfig,
    tasks: Vec<Task>,
    expanded: HashSet<String>,
    poller: Option<Poller>,
}

impl TaskMonitor {
    pub fn new(api: Arc<dyn ArchiveApi>, config: MonitorConfig) -> Self {
        Self {
            api,
            config,
            tasks: Vec::new(),
            expanded: HashSet::new(),
            poller: None,
        }
    }

    /// Reload the task list now.
    pub async fn refresh(&mut self) -> &[Task] {
        let tasks = fetch_tasks(self.api.as_ref(), self.config.page, self.config.limit).await;
        self.apply(tasks);
        &self.tasks
    }

    /// Replace the task list with a polled snapshot.
    pub fn apply(&mut self, tasks: Vec<Task>) {
        log::debug!("Task list updated: {} tasks", tasks.len());
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Flip the detail view of one task. Returns whether it is now expanded.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(Poller::is_running)
    }

    /// Start or stop background polling.
    ///
    /// Enabling returns the receiver for polled snapshots; feed them to
    /// [`TaskMonitor::apply`]. Enabling while already polling restarts the
    /// poller. Dropping the receiver also ends polling.
    pub fn set_auto_refresh(&mut self, enabled: bool) -> Option<mpsc::Receiver<Vec<Task>>> {
        self.poller = None;
        if !enabled {
            log::debug!("Task polling stopped");
            return None;
        }

        let (tx, rx) = mpsc::channel(4);
        let api = Arc::clone(&self.api);
        let (page, limit) = (self.config.page, self.config.limit);
        let period = Duration::from_secs(self.config.poll_interval_secs.max(1));

        self.poller = Some(Poller::spawn(period, move || {
            let api = Arc::clone(&api);
            let tx = tx.clone();
            async move {
                let tasks = fetch_tasks(api.as_ref(), page, limit).await;
                tx.send(tasks).await.is_ok()
            }
        }));
        log::debug!("Task polling every {:?}", period);
        Some(rx)
    }
}
