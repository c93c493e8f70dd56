//! Utility functions and helpers.

pub mod console;
pub mod filter;
pub mod format;
pub mod http;
pub mod id;
pub mod url;

pub use filter::{Searchable, filter_items};
pub use format::{format_decimal, format_number, percentage};
pub use id::{extract_id, normalize_article_id, validate_id};
