//! # Body Mode Mapping
//!
//! Maps a request body descriptor onto media-type-keyed request body
//! content, dispatching exhaustively on the encoding mode. File references
//! and unrecognized modes produce no request body at all.

use indexmap::IndexMap;
use serde_json::Value;

use crate::collection::{Body, BodyMode, FormField};
use crate::openapi::{MediaType, RequestBody, Schema, SchemaType};
use crate::schema_infer;

/// Maps a body descriptor to a request body. `None` means the mode carries
/// nothing translatable (`file`, unknown, or absent).
pub fn map_body(body: &Body) -> Option<RequestBody> {
    let (media_type, schema) = match body.parsed_mode() {
        BodyMode::Raw => {
            let language = body.raw_language();
            let media_type = media_type_for_language(language);
            let schema = match (language, body.raw.as_deref()) {
                ("json", Some(raw)) => schema_infer::infer_from_text(raw),
                (_, raw) => Schema::of(SchemaType::String)
                    .with_example_opt(raw.map(|r| Value::String(r.to_string()))),
            };
            (media_type, schema)
        }
        BodyMode::Formdata => (
            "multipart/form-data",
            form_schema(&body.formdata, true),
        ),
        BodyMode::Urlencoded => (
            "application/x-www-form-urlencoded",
            form_schema(&body.urlencoded, false),
        ),
        BodyMode::Binary => (
            "application/octet-stream",
            Schema::of(SchemaType::String).with_format("binary"),
        ),
        BodyMode::Graphql => ("application/json", graphql_schema(body)),
        BodyMode::File | BodyMode::Unknown => return None,
    };

    let mut content = IndexMap::new();
    content.insert(media_type.to_string(), MediaType { schema });
    Some(RequestBody {
        required: true,
        content,
    })
}

/// Media type for a declared raw-body content language.
fn media_type_for_language(language: &str) -> &'static str {
    match language {
        "json" => "application/json",
        "xml" => "application/xml",
        "html" => "text/html",
        "javascript" => "application/javascript",
        _ => "text/plain",
    }
}

/// Object schema over the non-disabled form fields. File-typed fields get
/// the binary format hint when `binary_hint` is set (multipart only).
fn form_schema(fields: &[FormField], binary_hint: bool) -> Schema {
    let mut properties = IndexMap::new();
    for field in fields {
        if field.disabled {
            continue;
        }
        let mut schema = Schema::of(SchemaType::String)
            .with_example_opt(field.value.as_ref().map(|v| Value::String(v.clone())));
        if binary_hint && field.is_file() {
            schema = schema.with_format("binary");
        }
        schema.description = field.description.clone();
        properties.insert(field.key.clone(), schema);
    }
    Schema::object(properties)
}

/// The fixed two-property GraphQL schema: a string query and an object of
/// variables, both carrying the authored text verbatim as examples.
fn graphql_schema(body: &Body) -> Schema {
    let graphql = body.graphql.as_ref();
    let query = graphql.and_then(|g| g.query.clone());
    let variables = graphql.and_then(|g| g.variables.clone());

    let mut properties = IndexMap::new();
    properties.insert(
        "query".to_string(),
        Schema::of(SchemaType::String).with_example_opt(query.map(Value::String)),
    );
    properties.insert(
        "variables".to_string(),
        Schema::of(SchemaType::Object).with_example_opt(variables.map(Value::String)),
    );
    Schema::object(properties)
}
