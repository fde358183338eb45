//! URL normalization
//!
//! Reconciles the three request URL shapes into one resolved URL and one
//! unresolved "original" URL.

use atlas_domain::UrlField;

use crate::variable_resolver::VariableResolver;

/// Scheme used when a structured URL does not declare one.
const DEFAULT_PROTOCOL: &str = "https";

/// A request URL in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// Fully variable-resolved URL
    pub resolved: String,
    /// Literal pre-resolution form
    pub original: String,
}

/// Normalizes a request URL field.
///
/// Returns `None` when the field is absent or resolves to an empty string;
/// the caller skips such requests.
#[must_use]
pub fn normalize(url: Option<&UrlField>, resolver: &VariableResolver<'_>) -> Option<NormalizedUrl> {
    let normalized = match url? {
        UrlField::Plain(raw) | UrlField::Raw(raw) => NormalizedUrl {
            resolved: resolver.resolve(raw),
            original: raw.clone(),
        },
        UrlField::Structured {
            protocol,
            host,
            path,
        } => {
            let protocol = protocol
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PROTOCOL);
            let host = host.join(".");
            let path = path.join("/");
            NormalizedUrl {
                resolved: assemble(protocol, &resolver.resolve(&host), &resolver.resolve(&path)),
                original: assemble(protocol, &host, &path),
            }
        }
    };

    (!normalized.resolved.is_empty()).then_some(normalized)
}

fn assemble(protocol: &str, host: &str, path: &str) -> String {
    format!("{protocol}://{host}/{path}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use atlas_domain::{CollectionVariables, EnvironmentVariables, Variable};
    use pretty_assertions::assert_eq;

    fn with_resolver<R>(f: impl FnOnce(&VariableResolver<'_>) -> R) -> R {
        let collection = CollectionVariables::from(vec![
            Variable::new("baseUrl", "https://api.example.com"),
            Variable::new("domain", "example"),
        ]);
        let environment: EnvironmentVariables = [("version", "v2")].into_iter().collect();
        f(&VariableResolver::new(&collection, &environment))
    }

    #[test]
    fn test_structured_without_variables() {
        let url = UrlField::structured(Some("https"), ["api", "example", "com"], ["v1", "users"]);
        let normalized = with_resolver(|r| normalize(Some(&url), r)).unwrap();
        assert_eq!(normalized.resolved, "https://api.example.com/v1/users");
        assert_eq!(normalized.original, "https://api.example.com/v1/users");
    }

    #[test]
    fn test_structured_resolves_segments() {
        let url = UrlField::structured(None, ["api", "{{domain}}", "com"], ["{{version}}", "orders"]);
        let normalized = with_resolver(|r| normalize(Some(&url), r)).unwrap();
        assert_eq!(normalized.resolved, "https://api.example.com/v2/orders");
        assert_eq!(normalized.original, "https://api.{{domain}}.com/{{version}}/orders");
    }

    #[test]
    fn test_plain_and_raw_resolve_identically() {
        let plain = UrlField::plain("{{baseUrl}}/v1/users");
        let raw = UrlField::raw("{{baseUrl}}/v1/users");

        let (plain, raw) = with_resolver(|r| (normalize(Some(&plain), r), normalize(Some(&raw), r)));
        let plain = plain.unwrap();
        assert_eq!(plain.resolved, "https://api.example.com/v1/users");
        assert_eq!(plain.original, "{{baseUrl}}/v1/users");
        assert_eq!(Some(plain), raw);
    }

    #[test]
    fn test_absent_or_empty_url_is_skipped() {
        assert!(with_resolver(|r| normalize(None, r)).is_none());
        assert!(with_resolver(|r| normalize(Some(&UrlField::plain("")), r)).is_none());
    }
}
