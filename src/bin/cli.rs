//! Saver CLI
//!
//! Command-line front end for the archive backend.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use saver::{
    error::{AppError, Result},
    models::{Article, BuildInfo, Config, Messages, Pagination, Paste, RecentSaves, Task},
    services::{
        About, ApiClient, ArchiveApi, ArticleManager, Cooldown, Decision, PasteManager,
        PasteQuery, SaveKind, SaveOutcome, Saver, SearchGate, StatisticsDashboard, TaskMonitor,
    },
    utils::{
        console,
        url::{article_url, paste_url},
    },
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

/// Saver - Luogu article and paste archive client
#[derive(Parser, Debug)]
#[command(
    name = "saver",
    version,
    about = "Save and browse Luogu articles and pastes through the archive backend"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and save articles
    #[command(subcommand)]
    Articles(ArticleCommand),

    /// Browse, save and delete pastes
    #[command(subcommand)]
    Pastes(PasteCommand),

    /// Inspect backend scraping tasks
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Show backend statistics
    Stats,

    /// Interactive article search, one query per line
    Shell,

    /// Show version and build information
    About {
        /// Offer to reveal the donation link
        #[arg(long)]
        donate: bool,
    },

    /// Write build-info.json for the about screen
    BuildInfo {
        /// Output path (default: about.build_info_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Write the effective configuration as TOML
    InitConfig {
        /// Output path (default: the --config path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ArticleCommand {
    /// List recently updated articles
    Recent {
        /// Only show articles matching this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print one article
    Show { id: String },
    /// Save articles by ID
    Save {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Login cookie for the authenticated endpoint
        #[arg(long)]
        cookie: Option<String>,
        /// Use the public endpoint (no login required)
        #[arg(long)]
        public: bool,
    },
    /// Search saved articles
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum PasteCommand {
    /// List saved pastes
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Only pastes by this author UID
        #[arg(long)]
        author: Option<String>,
        /// Only show pastes matching this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print one paste
    Show { id: String },
    /// Save pastes by ID or link
    Save {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Delete a saved paste
    Delete { id: String },
    /// Search saved pastes
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// List tasks once
    List,
    /// Print one task
    Show { id: String },
    /// Keep refreshing until interrupted
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        rounds: Option<u32>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    console::init(if verbose {
        console::Level::Debug
    } else {
        console::Level::Info
    });
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    let messages = config.messages.clone();
    if let Err(e) = run(cli.command, config, cli.config).await {
        console::error(&messages.describe(&e));
        std::process::exit(1);
    }
}

async fn run(command: Command, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Command::Validate => {
            config.validate()?;
            console::success(&format!("Config OK (backend {})", config.api.base_url));
            Ok(())
        }
        Command::InitConfig { output, force } => {
            let path = output.unwrap_or(config_path);
            if path.exists() && !force {
                return Err(AppError::config(format!(
                    "{} already exists, pass --force to replace it",
                    path.display()
                )));
            }
            config.save(&path)?;
            console::success(&format!("Config written to {}", path.display()));
            Ok(())
        }
        Command::BuildInfo { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.about.build_info_path));
            let info = BuildInfo::generate(env!("CARGO_PKG_VERSION"));
            info.write(&path).await?;
            console::success(&format!("{} written to {}", info.label(), path.display()));
            Ok(())
        }
        Command::About { donate } => about(&config, donate).await,
        Command::Articles(cmd) => articles(cmd, connect(&config)?, &config).await,
        Command::Pastes(cmd) => pastes(cmd, connect(&config)?, &config).await,
        Command::Tasks(cmd) => tasks(cmd, connect(&config)?, &config).await,
        Command::Stats => stats(connect(&config)?).await,
        Command::Shell => shell(connect(&config)?, &config).await,
    }
}

/// Build the backend client after checking the configuration.
fn connect(config: &Config) -> Result<Arc<dyn ArchiveApi>> {
    config.validate()?;
    log::debug!("Using backend {}", config.api.base_url);
    Ok(Arc::new(ApiClient::new(&config.api)?))
}

async fn articles(cmd: ArticleCommand, api: Arc<dyn ArchiveApi>, config: &Config) -> Result<()> {
    let messages = config.messages.clone();
    match cmd {
        ArticleCommand::Recent { filter } => {
            let mut manager = ArticleManager::new(api, messages.clone());
            manager.load_recent().await?;
            manager.set_filter(filter.unwrap_or_default());
            print_articles(&manager.visible(), &messages);
        }
        ArticleCommand::Show { id } => {
            let manager = ArticleManager::new(api, messages);
            print_article(&manager.view(&id).await?);
        }
        ArticleCommand::Save {
            ids,
            cookie,
            public,
        } => {
            if public {
                let mut saver = Saver::new(api, SaveKind::Article, messages.clone())
                    .with_cookie(cookie)
                    .with_history_capacity(config.history.capacity)
                    .with_max_concurrent(config.api.max_concurrent);
                report_saves(saver.save_many(&ids).await, &messages);
                print_history(saver.history());
            } else {
                let mut manager = ArticleManager::new(api, messages.clone()).with_cookie(cookie);
                for id in &ids {
                    match manager.save(id).await {
                        Ok(message) => console::success(&message),
                        Err(e) => report_failure(&e, &messages),
                    }
                }
            }
        }
        ArticleCommand::Search { query, page, limit } => {
            let manager = ArticleManager::new(api, messages.clone());
            let limit = limit.unwrap_or(config.search.page_limit);
            let results = manager.search(&query, page, limit).await?;
            print_articles(&results.items.iter().collect::<Vec<_>>(), &messages);
            if let Some(p) = &results.pagination {
                print_pagination(p);
            }
        }
    }
    Ok(())
}

async fn pastes(cmd: PasteCommand, api: Arc<dyn ArchiveApi>, config: &Config) -> Result<()> {
    let messages = config.messages.clone();
    match cmd {
        PasteCommand::List {
            page,
            limit,
            author,
            filter,
        } => {
            let query = PasteQuery {
                page,
                limit,
                author_uid: author.filter(|a| !a.trim().is_empty()),
            };
            let mut manager = PasteManager::new(api, messages.clone()).with_query(query);
            manager.load().await?;
            manager.set_filter(filter.unwrap_or_default());
            print_pastes(&manager.visible(), &messages);
            if let Some(p) = manager.pagination() {
                print_pagination(p);
            }
        }
        PasteCommand::Show { id } => {
            let manager = PasteManager::new(api, messages);
            print_paste(&manager.view(&id).await?);
        }
        PasteCommand::Save { ids, cookie } => {
            let mut saver = Saver::new(api, SaveKind::Paste, messages.clone())
                .with_cookie(cookie)
                .with_history_capacity(config.history.capacity)
                .with_max_concurrent(config.api.max_concurrent);
            for input in &ids {
                if let Ok(id) = saver.resolve(input) {
                    if id != input.trim() {
                        console::info(&messages.paste_id_resolved(&id));
                    }
                }
            }
            report_saves(saver.save_many(&ids).await, &messages);
            print_history(saver.history());
        }
        PasteCommand::Delete { id } => {
            let mut manager = PasteManager::new(api, messages.clone());
            match manager.delete(&id).await {
                Ok(message) => console::success(&message),
                Err(e) => console::failure(&messages.delete_failed(messages.describe(&e))),
            }
        }
        PasteCommand::Search { query, page, limit } => {
            let limit = limit.unwrap_or(config.search.page_limit);
            let results = api.search_pastes(&query, page, limit).await?;
            print_pastes(&results.items.iter().collect::<Vec<_>>(), &messages);
        }
    }
    Ok(())
}

async fn tasks(cmd: TaskCommand, api: Arc<dyn ArchiveApi>, config: &Config) -> Result<()> {
    let messages = &config.messages;
    match cmd {
        TaskCommand::List => {
            let mut monitor = TaskMonitor::new(api, config.monitor.clone());
            monitor.refresh().await;
            print_tasks(&monitor, messages);
        }
        TaskCommand::Show { id } => {
            let task = api.task(&id).await?;
            let mut monitor = TaskMonitor::new(api, config.monitor.clone());
            monitor.toggle_expanded(&task.id);
            monitor.apply(vec![task]);
            print_tasks(&monitor, messages);
        }
        TaskCommand::Watch { rounds } => {
            let mut monitor = TaskMonitor::new(api, config.monitor.clone());
            monitor.refresh().await;
            print_tasks(&monitor, messages);

            let Some(mut updates) = monitor.set_auto_refresh(config.monitor.auto_refresh) else {
                console::warn("monitor.auto_refresh is disabled");
                return Ok(());
            };
            let mut seen = 1;
            while rounds.is_none_or(|max| seen < max) {
                tokio::select! {
                    snapshot = updates.recv() => {
                        let Some(snapshot) = snapshot else { break };
                        monitor.apply(snapshot);
                        print_tasks(&monitor, messages);
                        seen += 1;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        console::end_progress();
                        break;
                    }
                }
            }
            monitor.set_auto_refresh(false);
        }
    }
    Ok(())
}

async fn stats(api: Arc<dyn ArchiveApi>) -> Result<()> {
    let mut dashboard = StatisticsDashboard::new(api);
    dashboard.load().await?;
    console::header("统计");
    for section in dashboard.sections() {
        console::summary(section.title, &section.items);
    }
    Ok(())
}

async fn about(config: &Config, donate: bool) -> Result<()> {
    let mut about = About::load(&config.about);
    console::header("关于");
    console::summary("版本信息", &about.version_lines());

    if !donate {
        return Ok(());
    }
    if about.donation_url.is_none() {
        console::warn("No donation link configured");
        return Ok(());
    }

    about.gate.open();
    console::sub_item(&about.donation().unwrap_or_default());
    console::info("显示捐赠链接? [y/N]");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if let Some(answer) = lines.next_line().await? {
        if answer.trim().eq_ignore_ascii_case("y") {
            about.gate.reveal();
        }
    }
    console::sub_item(&about.donation().unwrap_or_default());
    about.gate.close();
    Ok(())
}

async fn shell(api: Arc<dyn ArchiveApi>, config: &Config) -> Result<()> {
    let messages = config.messages.clone();
    let manager = ArticleManager::new(api, messages.clone());
    let mut gate = SearchGate::from_config(&config.search);
    let mut countdown: Option<JoinHandle<()>> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    console::info("输入关键词搜索文章，Ctrl-C 退出");
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match gate.submit() {
            Decision::Allowed => match manager.search(query, 1, config.search.page_limit).await {
                Ok(results) => print_articles(&results.items.iter().collect::<Vec<_>>(), &messages),
                Err(e) => console::failure(&messages.load_failed(messages.describe(&e))),
            },
            Decision::Throttled { cooldown_secs } => {
                let messages = messages.clone();
                countdown = Some(tokio::spawn(Cooldown::new(cooldown_secs).run(
                    move |left| {
                        if left == 0 {
                            console::end_progress();
                        } else {
                            console::progress(&messages.rate_limited(left));
                        }
                    },
                )));
            }
            Decision::CoolingDown { remaining_secs } => {
                log::debug!("Ignoring search during cooldown ({}s left)", remaining_secs);
            }
        }
    }

    if let Some(handle) = countdown {
        handle.abort();
    }
    Ok(())
}

fn report_saves(outcomes: Vec<Result<SaveOutcome>>, messages: &Messages) {
    for outcome in outcomes {
        match outcome {
            Ok(outcome) => {
                console::success(&outcome.message);
                if let Some(detail) = outcome.detail {
                    console::sub_item(&detail);
                }
            }
            Err(e) => report_failure(&e, messages),
        }
    }
}

fn report_failure(error: &AppError, messages: &Messages) {
    match error {
        AppError::Validation(message) => console::failure(message),
        other => {
            let text = messages.describe(other);
            console::failure(&messages.save_failed(&text));
            if Messages::wants_cookie(&text) {
                console::sub_item(&messages.cookie_hint);
            }
        }
    }
}

fn print_pagination(p: &Pagination) {
    console::info(&format!(
        "第 {}/{} 页，共 {} 条",
        p.page.unwrap_or(1),
        p.total_pages.unwrap_or(1),
        p.total.unwrap_or(0)
    ));
}

fn print_history(history: &RecentSaves) {
    if history.is_empty() {
        return;
    }
    console::separator();
    for record in history.iter() {
        let status = if record.success { "✓" } else { "✗" };
        let error = record.error.as_deref().unwrap_or("");
        console::sub_item(&format!("{} {} {} {}", status, record.timestamp, record.id, error));
    }
}

fn print_articles(articles: &[&Article], messages: &Messages) {
    if articles.is_empty() {
        console::info(&messages.no_articles);
        return;
    }
    for article in articles {
        console::info(&format!("[{}] {}", article.id, article.display_title()));
        let author = article.author.as_deref().unwrap_or("-");
        let updated = article.updated_at.as_deref().unwrap_or("-");
        console::sub_item(&format!("{} · {}", author, updated));
    }
}

fn print_article(article: &Article) {
    console::header(article.display_title());
    let mut items = vec![("ID", article.id.clone()), ("链接", article_url(&article.id))];
    if let Some(author) = &article.author {
        items.push(("作者", author.clone()));
    }
    if let Some(category) = &article.category {
        items.push(("分类", category.clone()));
    }
    if let Some(updated) = &article.updated_at {
        items.push(("更新时间", updated.clone()));
    }
    console::summary("文章", &items);
    console::separator();
    console::raw(article.content.as_deref().unwrap_or(""));
}

fn print_pastes(pastes: &[&Paste], messages: &Messages) {
    if pastes.is_empty() {
        console::info(&messages.no_pastes);
        return;
    }
    for paste in pastes {
        let title = paste.title.as_deref().unwrap_or(&paste.id);
        console::info(&format!("[{}] {} ({} 行)", paste.id, title, paste.line_count()));
        let author = paste.author.as_deref().unwrap_or("-");
        let uid = paste.author_uid().unwrap_or_else(|| "-".to_string());
        console::sub_item(&format!("{} (uid {})", author, uid));
    }
}

fn print_paste(paste: &Paste) {
    console::header(paste.title.as_deref().unwrap_or(&paste.id));
    let mut items = vec![("ID", paste.id.clone()), ("链接", paste_url(&paste.id))];
    if let Some(author) = &paste.author {
        items.push(("作者", author.clone()));
    }
    if let Some(uid) = paste.author_uid() {
        items.push(("UID", uid));
    }
    console::summary("剪切板", &items);
    console::separator();
    console::raw(paste.content.as_deref().unwrap_or(""));
}

fn print_tasks(monitor: &TaskMonitor, messages: &Messages) {
    let stats = monitor.stats();
    console::summary(
        "任务",
        &[
            ("总数", stats.total.to_string()),
            ("等待中", stats.pending.to_string()),
            ("处理中", stats.processing.to_string()),
            ("已完成", stats.completed.to_string()),
            ("失败", stats.failed.to_string()),
        ],
    );
    if monitor.tasks().is_empty() {
        console::info(&messages.no_tasks);
        return;
    }
    for task in monitor.tasks() {
        print_task(task, monitor.is_expanded(&task.id));
    }
}

fn print_task(task: &Task, expanded: bool) {
    let progress = task
        .progress
        .map(|p| format!(" {:.0}%", p))
        .unwrap_or_default();
    console::info(&format!("[{}] {} {}{}", task.id, task.kind, task.status, progress));
    if !expanded {
        return;
    }
    for (key, value) in [
        ("url", &task.url),
        ("message", &task.message),
        ("error", &task.error),
        ("created", &task.created_at),
        ("updated", &task.updated_at),
    ] {
        if let Some(value) = value {
            console::sub_item(&format!("{}: {}", key, value));
        }
    }
    if let Some(attempts) = task.attempts {
        console::sub_item(&format!("attempts: {}", attempts));
    }
}
