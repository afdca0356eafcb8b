//! # Output Document Model
//!
//! Serde model of the produced OpenAPI 3.0 document. Every map is an
//! `IndexMap` so serialization order is construction order, which keeps
//! repeated conversions byte-identical and diffs meaningful. The model is
//! the pragmatic subset the translator emits, not the full OpenAPI
//! meta-schema.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// The version tag written into every produced document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// A produced OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Fixed version tag, [`OPENAPI_VERSION`].
    pub openapi: String,
    /// The info block.
    pub info: Info,
    /// Optional server list extracted from collection variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// Path template -> path item, in first-seen order.
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components (security schemes).
    pub components: Components,
    /// Document-level security requirement, set by the auth mapper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// A security requirement: scheme name -> required scopes (always empty
/// for the schemes this translator emits).
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// The document info block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    /// Document title.
    pub title: String,
    /// Document version string.
    pub version: String,
    /// Document description.
    pub description: String,
}

/// One server entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    /// Base URL.
    pub url: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The eight HTTP methods a path item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// TRACE
    Trace,
}

impl Method {
    /// Parses a case-insensitive method token. Anything outside the fixed
    /// eight returns `None` and is reported upstream as a diagnostic.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "delete" => Some(Method::Delete),
            "patch" => Some(Method::Patch),
            "options" => Some(Method::Options),
            "head" => Some(Method::Head),
            "trace" => Some(Method::Trace),
            _ => None,
        }
    }

    /// The lowercase path-item key for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
            Method::Options => "options",
            Method::Head => "head",
            Method::Trace => "trace",
        }
    }

    /// True for the methods that may carry a request body.
    pub fn takes_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One path template's operations, keyed by method.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Installs `operation` under `method`, replacing any previous entry.
    /// Last write wins; duplicate (path, method) pairs are a property of
    /// the source, not an error here.
    pub fn set(&mut self, method: Method, operation: Operation) {
        let slot = match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Patch => &mut self.patch,
            Method::Trace => &mut self.trace,
        };
        *slot = Some(operation);
    }

    /// Reads the operation under `method`, if any.
    pub fn get(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }
}

/// One HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Single grouping tag derived from the folder path, omitted for
    /// top-level requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Short summary, from the leaf name.
    pub summary: String,
    /// Longer description, possibly empty.
    pub description: String,
    /// Query/header/path parameters; omitted entirely when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body, only for body-carrying methods.
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status-code string -> response.
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Query string parameter.
    Query,
    /// Header parameter.
    Header,
    /// Path template parameter, always required.
    Path,
}

/// One operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Required flag; true only for path parameters.
    pub required: bool,
    /// Parameter value schema (always string-typed, example carried).
    pub schema: Schema,
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// All produced request bodies are required.
    pub required: bool,
    /// Media type -> content entry.
    pub content: IndexMap<String, MediaType>,
}

/// One media-type entry of a request body or response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    /// The content schema.
    pub schema: Schema,
}

/// One response entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Human-readable description.
    pub description: String,
    /// Media type -> content entry.
    pub content: IndexMap<String, MediaType>,
}

/// The components block. `schemas` is always serialized (the translator
/// inlines every schema, so it stays empty) to keep the section layout
/// stable across documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Components {
    /// Named schema definitions; intentionally left empty.
    pub schemas: IndexMap<String, Schema>,
    /// Named security schemes registered by the auth mapper.
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// A reusable security scheme, internally tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    /// An HTTP authentication scheme (`bearer` or `basic`).
    #[serde(rename = "http")]
    Http {
        /// The HTTP auth scheme name.
        scheme: String,
        /// Bearer token format hint.
        #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    /// An API key in a header or query parameter.
    #[serde(rename = "apiKey")]
    ApiKey {
        /// Key location, `header` or `query`.
        #[serde(rename = "in")]
        location: String,
        /// Key parameter name.
        name: String,
    },
}

/// The closed set of structural schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// A string value.
    String,
    /// A numeric value.
    Number,
    /// A boolean value.
    Boolean,
    /// The null value.
    Null,
    /// An object with named properties.
    Object,
    /// An array with a single item schema.
    Array,
}

/// A recursive structural schema with an optional verbatim example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// The structural type tag.
    #[serde(rename = "type")]
    pub kind: SchemaType,
    /// Format hint, e.g. `binary` for file fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Free-form description, passed through from form fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value, copied verbatim from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Named properties (object schemas only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Item schema (array schemas only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// A bare schema of the given type.
    pub fn of(kind: SchemaType) -> Self {
        Schema {
            kind,
            format: None,
            description: None,
            example: None,
            properties: None,
            items: None,
        }
    }

    /// A bare object schema with no properties, used as the default
    /// response schema.
    pub fn empty_object() -> Self {
        Schema::of(SchemaType::Object)
    }

    /// An object schema over the given properties.
    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        let mut s = Schema::of(SchemaType::Object);
        s.properties = Some(properties);
        s
    }

    /// An array schema with the given item schema.
    pub fn array(items: Schema) -> Self {
        let mut s = Schema::of(SchemaType::Array);
        s.items = Some(Box::new(items));
        s
    }

    /// Attaches an example value.
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Attaches an optional example value; `None` leaves the schema as-is.
    pub fn with_example_opt(mut self, example: Option<Value>) -> Self {
        self.example = example;
        self
    }

    /// Attaches a format hint.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_method_tokens() {
        assert_eq!(Method::from_token("GET"), Some(Method::Get));
        assert_eq!(Method::from_token("Patch"), Some(Method::Patch));
        assert_eq!(Method::from_token("PROPFIND"), None);
        assert!(Method::Post.takes_body());
        assert!(!Method::Delete.takes_body());
    }

    #[test]
    fn test_path_item_set_overwrites() {
        let mut item = PathItem::default();
        let mut op = Operation {
            tags: None,
            summary: "first".into(),
            description: String::new(),
            parameters: None,
            request_body: None,
            responses: IndexMap::new(),
        };
        item.set(Method::Get, op.clone());
        op.summary = "second".into();
        item.set(Method::Get, op);
        assert_eq!(item.get(Method::Get).unwrap().summary, "second");
    }

    #[test]
    fn test_schema_serialization_shape() {
        let schema = Schema::of(SchemaType::String).with_example(json!("a"));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "example": "a"})
        );

        let empty = Schema::empty_object();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"type": "object"}));
    }

    #[test]
    fn test_security_scheme_tagging() {
        let bearer = SecurityScheme::Http {
            scheme: "bearer".into(),
            bearer_format: Some("JWT".into()),
        };
        assert_eq!(
            serde_json::to_value(&bearer).unwrap(),
            json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"})
        );

        let key = SecurityScheme::ApiKey {
            location: "header".into(),
            name: "X-API-Key".into(),
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({"type": "apiKey", "in": "header", "name": "X-API-Key"})
        );
    }

    #[test]
    fn test_empty_parameter_list_is_not_serialized() {
        let op = Operation {
            tags: None,
            summary: "s".into(),
            description: String::new(),
            parameters: None,
            request_body: None,
            responses: IndexMap::new(),
        };
        let v = serde_json::to_value(&op).unwrap();
        assert!(v.get("parameters").is_none());
        assert!(v.get("tags").is_none());
        assert!(v.get("requestBody").is_none());
    }
}
