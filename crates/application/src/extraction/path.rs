//! Path template normalization

use std::sync::LazyLock;

use regex::Regex;

/// Replacement for the first version-like segment.
pub const VERSION_TOKEN: &str = "v{version}";

/// Replacement for path parameters and unresolved placeholders.
pub const PARAM_TOKEN: &str = "{param}";

static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("valid regex"));

static TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]*\}\}").expect("valid regex"));

/// Normalizes a path into a template.
///
/// - the first `v<digits>` segment becomes [`VERSION_TOKEN`]
/// - `:name` segments become [`PARAM_TOKEN`]
/// - remaining `{{...}}` placeholders become [`PARAM_TOKEN`]
/// - empty segments collapse, and an empty result is `/`
///
/// A leading `/` is kept when the input had one.
///
/// # Examples
///
/// ```
/// use atlas_application::normalize_path;
///
/// assert_eq!(normalize_path("/users/:id/v2/orders"), "/users/{param}/v{version}/orders");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut version_seen = false;

    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if !version_seen && VERSION_SEGMENT.is_match(segment) {
                version_seen = true;
                VERSION_TOKEN.to_string()
            } else if segment.starts_with(':') {
                PARAM_TOKEN.to_string()
            } else {
                TEMPLATE.replace_all(segment, PARAM_TOKEN).into_owned()
            }
        })
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let joined = segments.join("/");
    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Returns the path component of a request URL, starting with `/`, or an
/// empty string when the URL has no path.
///
/// Query and fragment are dropped. With a scheme, the authority is
/// stripped. Without one, a leading `/` marks a bare path; otherwise the
/// first segment is taken to be the host (as in `{{baseUrl}}/users`).
#[must_use]
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None if url.starts_with('/') => return url,
        None => url,
    };

    rest.find('/').map_or("", |idx| &rest[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_version_and_param_rewrites() {
        assert_eq!(
            normalize_path("/users/:id/v2/orders"),
            "/users/{param}/v{version}/orders"
        );
    }

    #[test]
    fn test_only_first_version_segment_is_generalized() {
        assert_eq!(normalize_path("/v1/legacy/v2"), "/v{version}/legacy/v2");
    }

    #[test]
    fn test_version_must_be_whole_segment() {
        assert_eq!(normalize_path("/vendors/v1beta"), "/vendors/v1beta");
    }

    #[test]
    fn test_templates_become_params() {
        assert_eq!(
            normalize_path("Users/{{userId}}/files/{{fileId}}.json"),
            "Users/{param}/files/{param}.json"
        );
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(normalize_path("//users///list/"), "/users/list");
        assert_eq!(normalize_path("Folder//v3//items"), "Folder/v{version}/items");
    }

    #[test]
    fn test_empty_is_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("https://api.example.com/v1/users?page=2"), "/v1/users");
        assert_eq!(url_path("https://api.example.com"), "");
        assert_eq!(url_path("/v1/users/:id"), "/v1/users/:id");
        assert_eq!(url_path("{{baseUrl}}/orders#top"), "/orders");
        assert_eq!(url_path("api.example.com/health"), "/health");
        assert_eq!(url_path("localhost"), "");
    }
}
