//! # Collection Translation
//!
//! The walker and per-request translator. Traverses the collection tree
//! depth-first in authored order, accumulating a folder path for grouping,
//! and assembles the output document one operation at a time. Per-node
//! problems become diagnostics, never fatal errors: one malformed request
//! cannot invalidate the rest of the document.

use indexmap::IndexMap;

use crate::address::{self, ParsedAddress};
use crate::auth;
use crate::body;
use crate::collection::{Collection, Header, Item, RequestSpec};
use crate::error::AppResult;
use crate::openapi::{
    Components, Document, Info, MediaType, Method, Operation, Parameter, ParameterLocation,
    Response, Schema, SchemaType, Server, OPENAPI_VERSION,
};
use crate::schema_infer;

/// Folder nesting beyond this bound is skipped with a diagnostic instead
/// of risking the call stack. Far above anything a real export contains.
const MAX_FOLDER_DEPTH: usize = 512;

/// Headers assumed to be transport-level noise rather than API surface.
/// Matched case-insensitively and never emitted as operation parameters.
const COMMON_HEADERS: &[&str] = &[
    "content-type",
    "authorization",
    "accept",
    "user-agent",
    "content-length",
    "host",
    "connection",
    "cache-control",
];

/// Summary used for leaves without a name.
const DEFAULT_SUMMARY: &str = "No summary";

/// The outcome of a translation: the document plus everything that was
/// skipped or degraded along the way, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The assembled output document.
    pub document: Document,
    /// Ordered per-node diagnostics; empty for a fully clean conversion.
    pub diagnostics: Vec<Diagnostic>,
}

/// One advisory record about a skipped or degraded node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Folder-qualified node name.
    pub node: String,
    /// Human-readable detail.
    pub message: String,
}

/// The closed set of per-node diagnostic conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A leaf node with no request descriptor.
    MissingRequest,
    /// A method token outside the fixed eight.
    UnsupportedMethod,
    /// The normalized path template came out empty.
    EmptyPath,
    /// Folder nesting exceeded the depth bound; subtree skipped.
    FolderTooDeep,
}

/// Why a single request was skipped. Surfaced as a diagnostic by the
/// walker; never aborts the traversal.
enum Skip {
    UnsupportedMethod(String),
    EmptyPath,
}

/// Translates raw collection JSON. Decode failure is the only fatal error;
/// everything downstream degrades per-node into diagnostics.
pub fn translate_str(input: &str) -> AppResult<Translation> {
    let collection = Collection::from_json(input)?;
    Ok(translate(&collection))
}

/// Translates a decoded collection into an OpenAPI document. Pure and
/// total: the input is never mutated and every call with the same input
/// produces a structurally identical document, key order included.
pub fn translate(collection: &Collection) -> Translation {
    let info = collection.info.as_ref();
    let mut document = Document {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: info
                .and_then(|i| i.name.clone())
                .unwrap_or_else(|| "Converted API".to_string()),
            version: info
                .and_then(|i| i.version.clone())
                .unwrap_or_else(|| "1.0.0".to_string()),
            description: info
                .and_then(|i| i.description.clone())
                .unwrap_or_else(|| "API converted from Postman Collection".to_string()),
        },
        servers: extract_servers(collection),
        paths: IndexMap::new(),
        components: Components::default(),
        security: None,
    };

    if let Some(descriptor) = &collection.auth {
        auth::apply_auth(descriptor, &mut document);
    }

    let mut diagnostics = Vec::new();
    walk_items(
        &collection.item,
        "",
        0,
        &mut document,
        &mut diagnostics,
    );

    Translation {
        document,
        diagnostics,
    }
}

/// A server list from the conventional base-URL variable, if declared.
fn extract_servers(collection: &Collection) -> Option<Vec<Server>> {
    let base = collection
        .variable
        .iter()
        .find(|v| matches!(v.key.as_str(), "baseUrl" | "base_url" | "host"))?;
    let url = base.value.clone().filter(|v| !v.is_empty())?;
    Some(vec![Server {
        url,
        description: Some(
            base.description
                .clone()
                .unwrap_or_else(|| "Base server".to_string()),
        ),
    }])
}

fn walk_items(
    items: &[Item],
    folder_path: &str,
    depth: usize,
    document: &mut Document,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for item in items {
        let node = qualified_name(folder_path, item);

        if item.is_folder() {
            if depth >= MAX_FOLDER_DEPTH {
                push_diagnostic(
                    diagnostics,
                    DiagnosticKind::FolderTooDeep,
                    node,
                    format!("folder nesting exceeds {} levels, subtree skipped", MAX_FOLDER_DEPTH),
                );
                continue;
            }
            let name = item.name.as_deref().unwrap_or_default();
            let child_path = if folder_path.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", folder_path, name)
            };
            walk_items(&item.item, &child_path, depth + 1, document, diagnostics);
            continue;
        }

        let Some(request) = &item.request else {
            push_diagnostic(
                diagnostics,
                DiagnosticKind::MissingRequest,
                node,
                "leaf has no request descriptor".to_string(),
            );
            continue;
        };

        match translate_request(item, request, folder_path) {
            Ok(translated) => {
                // Last write wins on duplicate (path, method) pairs, the
                // same merge the source format exhibits.
                document
                    .paths
                    .entry(translated.path)
                    .or_default()
                    .set(translated.method, translated.operation);
            }
            Err(Skip::UnsupportedMethod(token)) => {
                push_diagnostic(
                    diagnostics,
                    DiagnosticKind::UnsupportedMethod,
                    node,
                    format!("unsupported HTTP method: {}", token),
                );
            }
            Err(Skip::EmptyPath) => {
                push_diagnostic(
                    diagnostics,
                    DiagnosticKind::EmptyPath,
                    node,
                    "no path could be derived from the request address".to_string(),
                );
            }
        }
    }
}

fn qualified_name(folder_path: &str, item: &Item) -> String {
    let name = item.name.as_deref().unwrap_or("(unnamed)");
    if folder_path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder_path, name)
    }
}

fn push_diagnostic(
    diagnostics: &mut Vec<Diagnostic>,
    kind: DiagnosticKind,
    node: String,
    message: String,
) {
    tracing::warn!(node = %node, "{}", message);
    diagnostics.push(Diagnostic {
        kind,
        node,
        message,
    });
}

/// One translated request, ready to install into the paths map.
struct TranslatedRequest {
    path: String,
    method: Method,
    operation: Operation,
}

fn translate_request(
    item: &Item,
    request: &RequestSpec,
    folder_path: &str,
) -> Result<TranslatedRequest, Skip> {
    let token = request.method.as_deref().unwrap_or("GET");
    let method =
        Method::from_token(token).ok_or_else(|| Skip::UnsupportedMethod(token.to_string()))?;

    let parsed = address::parse_address(request.url.as_ref());
    if parsed.path_template.is_empty() {
        return Err(Skip::EmptyPath);
    }

    let mut operation = Operation {
        tags: if folder_path.is_empty() {
            None
        } else {
            Some(vec![folder_path.to_string()])
        },
        summary: item
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        description: item
            .description
            .clone()
            .or_else(|| request.description.clone())
            .unwrap_or_default(),
        parameters: collect_parameters(&parsed, &request.header),
        request_body: None,
        responses: build_responses(item),
    };

    if method.takes_body() {
        if let Some(descriptor) = &request.body {
            operation.request_body = body::map_body(descriptor);
        }
    }

    Ok(TranslatedRequest {
        path: parsed.path_template,
        method,
        operation,
    })
}

/// Query, path, and header parameters in that order; `None` when empty so
/// the list is omitted from serialization entirely.
fn collect_parameters(parsed: &ParsedAddress, headers: &[Header]) -> Option<Vec<Parameter>> {
    let mut parameters = Vec::new();

    for param in &parsed.query {
        if param.disabled {
            continue;
        }
        parameters.push(Parameter {
            name: param.key.clone(),
            location: ParameterLocation::Query,
            description: param.description.clone().unwrap_or_default(),
            required: false,
            schema: string_schema(param.value.as_deref()),
        });
    }

    for variable in &parsed.variables {
        parameters.push(Parameter {
            name: variable.key.clone(),
            location: ParameterLocation::Path,
            description: variable.description.clone().unwrap_or_default(),
            required: true,
            schema: string_schema(variable.value.as_deref()),
        });
    }

    for header in headers {
        if header.disabled || is_common_header(&header.key) {
            continue;
        }
        parameters.push(Parameter {
            name: header.key.clone(),
            location: ParameterLocation::Header,
            description: header.description.clone().unwrap_or_default(),
            required: false,
            schema: string_schema(header.value.as_deref()),
        });
    }

    if parameters.is_empty() {
        None
    } else {
        Some(parameters)
    }
}

fn string_schema(example: Option<&str>) -> Schema {
    Schema::of(SchemaType::String)
        .with_example_opt(example.map(|v| serde_json::Value::String(v.to_string())))
}

fn is_common_header(name: &str) -> bool {
    COMMON_HEADERS
        .iter()
        .any(|common| name.eq_ignore_ascii_case(common))
}

/// Response entries for an operation. Saved examples fully replace the
/// default placeholder; without any, the operation gets a single bare
/// `200`.
fn build_responses(item: &Item) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();

    if item.response.is_empty() {
        let mut content = IndexMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Schema::empty_object(),
            },
        );
        responses.insert(
            "200".to_string(),
            Response {
                description: "Successful response".to_string(),
                content,
            },
        );
        return responses;
    }

    for example in &item.response {
        let status = example
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "200".to_string());
        let content_type = response_content_type(example.header.as_deref());

        let schema = match example.body.as_deref().filter(|b| !b.is_empty()) {
            Some(text) if content_type.contains("json") => schema_infer::infer_from_text(text),
            Some(text) => Schema::of(SchemaType::String)
                .with_example(serde_json::Value::String(text.to_string())),
            None => Schema::empty_object(),
        };

        let description = example
            .name
            .clone()
            .unwrap_or_else(|| format!("Response {}", status));

        let mut content = IndexMap::new();
        content.insert(content_type, MediaType { schema });
        responses.insert(
            status,
            Response {
                description,
                content,
            },
        );
    }

    responses
}

/// The example's declared content type, from its `Content-Type` header;
/// defaults to JSON like the majority of saved examples.
fn response_content_type(headers: Option<&[Header]>) -> String {
    headers
        .unwrap_or_default()
        .iter()
        .find(|h| h.key.eq_ignore_ascii_case("content-type"))
        .and_then(|h| h.value.clone())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "application/json".to_string())
}
