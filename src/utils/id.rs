// src/utils/id.rs

//! Identifier validation and extraction.
//!
//! Articles and pastes share the same identifier shape: exactly eight ASCII
//! letters or digits. Article input is upper-cased and must already be an
//! identifier; paste input may also be a link to the paste.

use std::sync::LazyLock;

use regex::Regex;

/// Length of every article and paste identifier.
pub const ID_LEN: usize = 8;

// ASCII-only case folding: Unicode folding would let `k`/`s` match U+212A/U+017F.
static PASTE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)luogu\.com\.?(?:cn)?/paste/([a-z0-9]{8})").expect("valid paste link pattern")
});

static ID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]{8}").expect("valid id pattern"));

/// Whether `input` is exactly eight ASCII alphanumerics.
pub fn validate_id(input: &str) -> bool {
    input.len() == ID_LEN && input.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Resolve a paste identifier from a bare ID or a URL.
///
/// Tries, in order: the input itself, a `luogu.com[.cn]/paste/<id>` link,
/// then the first run of eight alphanumerics anywhere in the input.
pub fn extract_id(input: &str) -> Option<String> {
    if validate_id(input) {
        return Some(input.to_string());
    }

    if let Some(id) = PASTE_LINK.captures(input).and_then(|caps| caps.get(1)) {
        return Some(id.as_str().to_string());
    }

    ID_RUN.find(input).map(|m| m.as_str().to_string())
}

/// Normalize article input: upper-case, then validate. No URL extraction.
pub fn normalize_article_id(input: &str) -> Option<String> {
    let id = input.to_uppercase();
    validate_id(&id).then_some(id)
}
