// src/utils/url.rs

//! URL construction for backend endpoints and source-site links.

use url::Url;

use crate::error::Result;

const SITE_ROOT: &str = "https://www.luogu.com";

/// Join an endpoint path onto the backend base URL.
///
/// The base may carry a path prefix (`https://host/prefix`), which is kept.
///
/// # Examples
/// ```
/// use saver::utils::url::endpoint;
///
/// let url = endpoint("http://localhost:3001", "/api/statistics", &[]).unwrap();
/// assert_eq!(url.as_str(), "http://localhost:3001/api/statistics");
/// ```
pub fn endpoint(base: &str, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    let mut url = base.join(path.trim_start_matches('/'))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Link to an article on the source site.
pub fn article_url(id: &str) -> String {
    format!("{SITE_ROOT}/article/{id}")
}

/// Link to a paste on the source site.
pub fn paste_url(id: &str) -> String {
    format!("{SITE_ROOT}/paste/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_path() {
        let url = endpoint("http://localhost:3001", "/api/articles/ABCD1234", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/articles/ABCD1234");
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let url = endpoint("https://example.com/backend", "/api/tasks", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/backend/api/tasks");
    }

    #[test]
    fn endpoint_encodes_query() {
        let url = endpoint(
            "http://localhost:3001/",
            "/api/articles/search",
            &[("q", "动态 规划&x".to_string()), ("page", "2".to_string())],
        )
        .unwrap();
        assert_eq!(url.path(), "/api/articles/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "动态 规划&x".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn endpoint_rejects_bad_base() {
        assert!(endpoint("not a url", "/api", &[]).is_err());
    }

    #[test]
    fn site_links() {
        assert_eq!(article_url("ABCD1234"), "https://www.luogu.com/article/ABCD1234");
        assert_eq!(paste_url("tlke2okg"), "https://www.luogu.com/paste/tlke2okg");
    }
}
