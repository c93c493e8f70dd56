// src/utils/console.rs

//! Console output with server-style formatting.
//!
//! Diagnostics go through the `log` facade; this module renders the results
//! a user asked for (listings, summaries, save outcomes).

use std::io::Write;
use std::sync::OnceLock;

use chrono::Local;

/// Console verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }
}

static LEVEL: OnceLock<Level> = OnceLock::new();

/// Set the minimum level printed. Only the first call has an effect.
pub fn init(level: Level) {
    let _ = LEVEL.set(level);
}

fn enabled(level: Level) -> bool {
    level >= LEVEL.get().copied().unwrap_or(Level::Info)
}

fn format_line(level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

pub fn info(message: &str) {
    if enabled(Level::Info) {
        println!("{}", format_line(Level::Info, message));
    }
}

pub fn warn(message: &str) {
    if enabled(Level::Warn) {
        eprintln!("{}", format_line(Level::Warn, message));
    }
}

pub fn error(message: &str) {
    if enabled(Level::Error) {
        eprintln!("{}", format_line(Level::Error, message));
    }
}

/// Successful outcome (always shown)
pub fn success(message: &str) {
    println!("{}", format_line(Level::Info, &format!("✓ {}", message)));
}

/// Failed outcome (always shown)
pub fn failure(message: &str) {
    eprintln!("{}", format_line(Level::Error, &format!("✗ {}", message)));
}

/// Overwrite the current line, for countdowns.
pub fn progress(message: &str) {
    print!("\r{}", format_line(Level::Info, message));
    let _ = std::io::stdout().flush();
}

/// Terminate a run of [`progress`] lines.
pub fn end_progress() {
    println!();
}

pub fn separator() {
    if enabled(Level::Info) {
        println!("{}", "─".repeat(60));
    }
}

pub fn header(title: &str) {
    if enabled(Level::Info) {
        let border = "═".repeat(60);
        println!("{}", border);
        println!("  {}", title);
        println!("{}", border);
    }
}

/// Indented detail line
pub fn sub_item(message: &str) {
    if enabled(Level::Info) {
        println!("    {}", message);
    }
}

/// Key/value block
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled(Level::Info) {
        println!();
        println!("[{}] [SUMMARY] {}", Local::now().format("%H:%M:%S"), title);
        for (key, value) in items {
            println!("    {}: {}", key, value);
        }
    }
}

/// Print raw content (article/paste bodies) without decoration.
pub fn raw(content: &str) {
    println!("{}", content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn level_parse() {
        assert_eq!(Level::parse("debug"), Level::Debug);
        assert_eq!(Level::parse("WARN"), Level::Warn);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn line_has_level_tag() {
        let line = format_line(Level::Warn, "hello");
        assert!(line.ends_with("[WARN] hello"));
    }
}
