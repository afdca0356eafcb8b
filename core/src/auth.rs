//! # Auth Mapping
//!
//! Maps collection-level auth descriptors onto named, reusable security
//! schemes plus a document-level security requirement. Only bearer, basic,
//! and apikey translate; the remaining modes are recognized and ignored,
//! a known limitation of the target subset.

use indexmap::IndexMap;

use crate::collection::{Auth, AuthKind};
use crate::openapi::{Document, SecurityRequirement, SecurityScheme};

/// Registers the security scheme for `auth` on `document` and points the
/// document-level security requirement at it.
pub fn apply_auth(auth: &Auth, document: &mut Document) {
    match auth.parsed_kind() {
        AuthKind::Bearer => {
            register(
                document,
                "BearerAuth",
                SecurityScheme::Http {
                    scheme: "bearer".to_string(),
                    bearer_format: Some("JWT".to_string()),
                },
            );
        }
        AuthKind::Basic => {
            register(
                document,
                "BasicAuth",
                SecurityScheme::Http {
                    scheme: "basic".to_string(),
                    bearer_format: None,
                },
            );
        }
        AuthKind::Apikey => {
            // The first declared triple names the key; location defaults
            // to a header.
            if let Some(param) = auth.apikey.first() {
                let name = param
                    .key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .unwrap_or_else(|| "X-API-Key".to_string());
                let location = param
                    .location
                    .clone()
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| "header".to_string());
                register(
                    document,
                    "ApiKeyAuth",
                    SecurityScheme::ApiKey { location, name },
                );
            }
        }
        AuthKind::Oauth1
        | AuthKind::Oauth2
        | AuthKind::Hawk
        | AuthKind::Digest
        | AuthKind::Ntlm
        | AuthKind::Unknown => {}
    }
}

fn register(document: &mut Document, name: &str, scheme: SecurityScheme) {
    document
        .components
        .security_schemes
        .insert(name.to_string(), scheme);

    let mut requirement = SecurityRequirement::new();
    requirement.insert(name.to_string(), Vec::new());
    document.security = Some(vec![requirement]);
}
