//! # Address Normalization
//!
//! Turns either address representation (raw string or structured record)
//! into a canonical path template plus its declared query parameters and
//! path variables. Both placeholder syntaxes (`:name`, `{{name}}`) are
//! rewritten to the single `{name}` form, unconditionally, on the final
//! template string.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::collection::{Address, PathVariable, QueryParam};

/// The normalized outcome of address parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedAddress {
    /// Canonical path template, `{name}` placeholders only.
    pub path_template: String,
    /// Query parameters: declared ones for a structured address, extracted
    /// ones for a successfully parsed raw URL.
    pub query: Vec<QueryParam>,
    /// Declared path variables (structured addresses only).
    pub variables: Vec<PathVariable>,
}

/// Parses an optional address into its canonical form. A missing address
/// yields the root template `/`.
pub fn parse_address(address: Option<&Address>) -> ParsedAddress {
    let mut parsed = match address {
        None => ParsedAddress {
            path_template: "/".to_string(),
            ..ParsedAddress::default()
        },
        Some(Address::Raw(raw)) => {
            let (path, query) = split_raw_url(raw);
            ParsedAddress {
                path_template: path,
                query,
                variables: Vec::new(),
            }
        }
        Some(Address::Parts(parts)) => {
            let path = if !parts.path.is_empty() {
                format!("/{}", parts.path.join("/"))
            } else if let Some(raw) = parts.raw.as_deref() {
                split_raw_url(raw).0
            } else {
                "/".to_string()
            };
            // Declared parameters pass through unchanged; they are never
            // merged with raw-URL extraction for the same request.
            ParsedAddress {
                path_template: path,
                query: parts.query.clone(),
                variables: parts.variable.clone(),
            }
        }
    };

    parsed.path_template = normalize_placeholders(&parsed.path_template);
    parsed
}

/// Strict-parse-then-fallback for a raw URL string. On a successful parse
/// the path component and decoded query pairs are extracted; otherwise the
/// whole string is treated as an opaque path, `/`-prefixed if needed.
fn split_raw_url(raw: &str) -> (String, Vec<QueryParam>) {
    match Url::parse(raw) {
        Ok(parsed) => {
            let query = parsed
                .query_pairs()
                .map(|(key, value)| QueryParam {
                    key: key.into_owned(),
                    value: Some(value.into_owned()),
                    disabled: false,
                    description: None,
                })
                .collect();
            (parsed.path().to_string(), query)
        }
        Err(_) => {
            let path = if raw.starts_with('/') {
                raw.to_string()
            } else {
                format!("/{}", raw)
            };
            (path, Vec::new())
        }
    }
}

/// Rewrites `:name` and `{{name}}` placeholders into `{name}`.
pub fn normalize_placeholders(path: &str) -> String {
    static COLON_RE: OnceLock<Regex> = OnceLock::new();
    let colon_re =
        COLON_RE.get_or_init(|| Regex::new(r":(\w+)").expect("Invalid placeholder regex"));

    static BRACES_RE: OnceLock<Regex> = OnceLock::new();
    let braces_re =
        BRACES_RE.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid placeholder regex"));

    let path = colon_re.replace_all(path, "{${1}}");
    braces_re.replace_all(&path, "{${1}}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::UrlParts;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_url_strict_parse() {
        let addr = Address::Raw("https://api.example.com/users?page=2&sort=asc".into());
        let parsed = parse_address(Some(&addr));
        assert_eq!(parsed.path_template, "/users");
        assert_eq!(parsed.query.len(), 2);
        assert_eq!(parsed.query[0].key, "page");
        assert_eq!(parsed.query[0].value.as_deref(), Some("2"));
        assert!(!parsed.query[0].disabled);
        assert!(parsed.query[0].description.is_none());
        assert!(parsed.variables.is_empty());
    }

    #[test]
    fn test_raw_url_fallback_is_opaque_path() {
        let parsed = parse_address(Some(&Address::Raw("/health".into())));
        assert_eq!(parsed.path_template, "/health");
        assert!(parsed.query.is_empty());

        // No scheme and not path-like: prefixed, never rejected.
        let parsed = parse_address(Some(&Address::Raw("users/list".into())));
        assert_eq!(parsed.path_template, "/users/list");
    }

    #[test]
    fn test_structured_path_segments() {
        let parts = UrlParts {
            path: vec!["users".into(), ":id".into()],
            ..UrlParts::default()
        };
        let parsed = parse_address(Some(&Address::Parts(parts)));
        assert_eq!(parsed.path_template, "/users/{id}");
    }

    #[test]
    fn test_structured_raw_fallback() {
        let parts = UrlParts {
            raw: Some("https://api.example.com/v2/items?limit=5".into()),
            ..UrlParts::default()
        };
        let parsed = parse_address(Some(&Address::Parts(parts)));
        assert_eq!(parsed.path_template, "/v2/items");
        // Extracted query is dropped for structured addresses; only the
        // declared list passes through.
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn test_structured_empty_defaults_to_root() {
        let parsed = parse_address(Some(&Address::Parts(UrlParts::default())));
        assert_eq!(parsed.path_template, "/");

        let parsed = parse_address(None);
        assert_eq!(parsed.path_template, "/");
    }

    #[test]
    fn test_placeholder_normalization_both_syntaxes() {
        assert_eq!(normalize_placeholders("/users/:id"), "/users/{id}");
        assert_eq!(normalize_placeholders("/users/{{id}}"), "/users/{id}");
        assert_eq!(
            normalize_placeholders("/a/:x/b/{{y}}/c"),
            "/a/{x}/b/{y}/c"
        );
        assert_eq!(normalize_placeholders("/plain/path"), "/plain/path");
    }

    #[test]
    fn test_normalization_applies_after_raw_fallback() {
        // `{{baseUrl}}` is not a valid scheme, so strict parsing fails and
        // the opaque-path fallback feeds the normalizer.
        let addr = Address::Raw("{{baseUrl}}/users/{{id}}".into());
        let parsed = parse_address(Some(&addr));
        assert_eq!(parsed.path_template, "/{baseUrl}/users/{id}");
    }

    #[test]
    fn test_declared_parameters_pass_through() {
        let parts = UrlParts {
            path: vec!["things".into()],
            query: vec![QueryParam {
                key: "q".into(),
                value: Some("x".into()),
                disabled: true,
                description: Some("filter".into()),
            }],
            variable: vec![PathVariable {
                key: "id".into(),
                value: Some("7".into()),
                description: None,
            }],
            ..UrlParts::default()
        };
        let parsed = parse_address(Some(&Address::Parts(parts)));
        assert!(parsed.query[0].disabled);
        assert_eq!(parsed.query[0].description.as_deref(), Some("filter"));
        assert_eq!(parsed.variables[0].key, "id");
    }
}
