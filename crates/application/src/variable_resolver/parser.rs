//! Template placeholder parser for `{{name}}` syntax
//!
//! Parses strings to extract placeholder references with their positions.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A placeholder is `{{`, one or more characters other than `}`, then `}}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("valid regex"));

/// Represents a parsed placeholder in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}), trimmed.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all placeholder references, left to right.
///
/// Placeholders whose name is blank are ignored.
///
/// # Examples
///
/// ```
/// use atlas_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{base_url}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "base_url");
/// assert_eq!(refs[1].name, "id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    PLACEHOLDER
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().trim();
            (!name.is_empty()).then(|| VariableReference::new(name, whole.range()))
        })
        .collect()
}

/// Returns true if the input may still contain a placeholder.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    input.contains("{{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{name}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..8);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ name }}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
    }

    #[test]
    fn test_no_variables() {
        assert!(parse_variables("https://api.example.com/users").is_empty());
    }

    #[test]
    fn test_unclosed_variable() {
        assert!(parse_variables("{{name").is_empty());
    }

    #[test]
    fn test_empty_and_blank_variables() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
    }

    #[test]
    fn test_variable_in_url() {
        let names: Vec<_> = parse_variables("{{scheme}}://{{host}}:{{port}}/{{path}}?key={{api_key}}")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["scheme", "host", "port", "path", "api_key"]);
    }

    #[test]
    fn test_adjacent_variables() {
        let names: Vec<_> = parse_variables("{{a}}{{b}}{{c}}")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_brace_and_path_params() {
        assert!(parse_variables("/users/{id}/:orderId").is_empty());
    }

    #[test]
    fn test_has_variables() {
        assert!(has_variables("{{name}}"));
        assert!(has_variables("{{incomplete"));
        assert!(!has_variables("Hello World!"));
    }

    #[test]
    fn test_span_positions() {
        let input = "https://{{host}}/v1";
        let refs = parse_variables(input);
        assert_eq!(&input[refs[0].span.clone()], "{{host}}");
    }
}
