//! URL joining for REST endpoints.
//!
//! The API base is configured either as an absolute URL
//! (`http://host:12345/api`) or as a bare path (`/api`). Endpoint paths are
//! written the way the REST API documents them (`/api/cpu/`), so the API
//! prefix frequently appears twice when the two are naively concatenated.
//!
//! Convention: the returned URL never carries a trailing slash.

/// Join `base` with a relative endpoint `path`.
///
/// Trailing slashes are stripped from `base`, leading and trailing slashes
/// from `path`. When the first segment of `path` repeats the last segment
/// of `base` (the API prefix), that one occurrence is dropped.
pub fn build_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let mut path = path.trim_matches('/');

    if let Some(prefix) = api_prefix(base) {
        if path == prefix {
            path = "";
        } else if let Some(rest) = path.strip_prefix(prefix)
            && rest.starts_with('/')
        {
            path = rest.trim_start_matches('/');
        }
    }

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Append `key=value` query pairs to a URL.
pub fn with_query(url: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{query}")
}

/// The last path segment of `base`, ignoring the scheme and host.
fn api_prefix(base: &str) -> Option<&str> {
    let path = match base.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p)?,
        None => base,
    };
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_redundant_prefix() {
        assert_eq!(build_url("/api/", "/api/cpu/"), "/api/cpu");
        assert_eq!(
            build_url("http://localhost:12345/api", "api/gpu/brand/"),
            "http://localhost:12345/api/gpu/brand"
        );
    }

    #[test]
    fn only_one_prefix_is_dropped() {
        assert_eq!(build_url("/api", "/api/api/x"), "/api/api/x");
    }

    #[test]
    fn empty_path_returns_base() {
        assert_eq!(build_url("https://host/api", ""), "https://host/api");
        assert_eq!(build_url("https://host/api/", "///"), "https://host/api");
        assert_eq!(build_url("/api", "/api/"), "/api");
    }

    #[test]
    fn plain_join_without_prefix() {
        assert_eq!(build_url("http://host:12345", "/cpu/"), "http://host:12345/cpu");
        assert_eq!(build_url("http://host:12345/", "api/cpu"), "http://host:12345/api/cpu");
    }

    #[test]
    fn prefix_must_match_whole_segment() {
        assert_eq!(build_url("/api", "apis/cpu"), "/api/apis/cpu");
    }

    #[test]
    fn host_is_not_treated_as_prefix() {
        assert_eq!(build_url("http://api", "api/cpu"), "http://api/api/cpu");
    }

    #[test]
    fn query_pairs_are_appended() {
        assert_eq!(
            with_query("/api/x", &[("a", "1".to_string()), ("b", "2".to_string())]),
            "/api/x?a=1&b=2"
        );
        assert_eq!(with_query("/api/x", &[]), "/api/x");
    }
}
