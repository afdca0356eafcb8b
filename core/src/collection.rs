//! # Source Collection Model
//!
//! Serde model of a Postman collection export. Decoding is deliberately
//! tolerant: every field is optional or defaulted so that incomplete or
//! partially malformed exports still decode. Only the top-level document
//! shape is enforced; per-node problems surface later as diagnostics.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// A decoded Postman collection.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Collection {
    /// Collection metadata (name, version, description).
    #[serde(default)]
    pub info: Option<Info>,
    /// Top-level folder/request nodes, in authored order.
    #[serde(default)]
    pub item: Vec<Item>,
    /// Collection-scoped key/value variables.
    #[serde(default)]
    pub variable: Vec<Variable>,
    /// Collection-level auth descriptor.
    #[serde(default)]
    pub auth: Option<Auth>,
}

impl Collection {
    /// Decodes a collection from raw JSON text.
    ///
    /// This is the fatal error boundary: an undecodable document is the
    /// only failure that propagates to the caller.
    pub fn from_json(input: &str) -> AppResult<Self> {
        serde_json::from_str(input).map_err(AppError::Decode)
    }
}

/// The collection `info` block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Info {
    /// Display name; becomes the document title.
    pub name: Option<String>,
    /// Free-form description text.
    pub description: Option<String>,
    /// Declared collection version.
    pub version: Option<String>,
    /// The Postman schema URL, carried but unused.
    pub schema: Option<String>,
}

/// One node in the collection tree: a folder (non-empty `item`) or a
/// request leaf. A node with children is always treated as a folder
/// regardless of any other fields present.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Item {
    /// Node display name.
    pub name: Option<String>,
    /// Leaf-level description; wins over the request description.
    pub description: Option<String>,
    /// The request descriptor; a leaf without one is skipped with a warning.
    #[serde(default)]
    pub request: Option<RequestSpec>,
    /// Saved example responses.
    #[serde(default)]
    pub response: Vec<ExampleResponse>,
    /// Child nodes (folders recurse).
    #[serde(default)]
    pub item: Vec<Item>,
}

impl Item {
    /// True when this node is a folder (has children).
    pub fn is_folder(&self) -> bool {
        !self.item.is_empty()
    }
}

/// A request descriptor attached to a leaf node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RequestSpec {
    /// HTTP method token, case-insensitive. Absent means GET.
    pub method: Option<String>,
    /// The request address.
    pub url: Option<Address>,
    /// Request headers, in authored order.
    #[serde(default)]
    pub header: Vec<Header>,
    /// The body descriptor, if any.
    pub body: Option<Body>,
    /// Request-level auth descriptor, carried but unused (the collection
    /// level descriptor drives the security section).
    pub auth: Option<Auth>,
    /// Request-level description, a fallback for the leaf description.
    pub description: Option<String>,
}

/// A request address: either a free-form string or a structured record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// A raw URL string, parsed strictly with an opaque-path fallback.
    Raw(String),
    /// The structured host/path/query/variable form.
    Parts(UrlParts),
}

/// The structured address form.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UrlParts {
    /// Raw fallback string, used when `path` is empty.
    pub raw: Option<String>,
    /// URL scheme, unused for path templates.
    pub protocol: Option<String>,
    /// Host segments, unused for path templates.
    #[serde(default)]
    pub host: Vec<String>,
    /// Port string, unused for path templates.
    pub port: Option<String>,
    /// Path segments; may contain `:name` placeholders.
    #[serde(default)]
    pub path: Vec<String>,
    /// Declared query parameters.
    #[serde(default)]
    pub query: Vec<QueryParam>,
    /// Declared path variables.
    #[serde(default)]
    pub variable: Vec<PathVariable>,
}

/// A declared query parameter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct QueryParam {
    /// Parameter name.
    #[serde(default)]
    pub key: String,
    /// Example value.
    pub value: Option<String>,
    /// Disabled parameters are excluded from the output.
    #[serde(default)]
    pub disabled: bool,
    /// Free-form description.
    pub description: Option<String>,
}

/// A declared path variable (`:name` segment value).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathVariable {
    /// Variable name, matching a `:name` segment.
    #[serde(default)]
    pub key: String,
    /// Example value.
    pub value: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// A request or response header.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Header {
    /// Header name.
    #[serde(default)]
    pub key: String,
    /// Header value.
    pub value: Option<String>,
    /// Disabled headers are excluded from the output.
    #[serde(default)]
    pub disabled: bool,
    /// Free-form description.
    pub description: Option<String>,
}

/// A collection-scoped variable.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Variable {
    /// Variable name.
    #[serde(default)]
    pub key: String,
    /// Variable value.
    pub value: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// A request body descriptor.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Body {
    /// The encoding mode tag; parsed into [`BodyMode`] at use sites.
    pub mode: Option<String>,
    /// Raw body text (mode `raw`).
    pub raw: Option<String>,
    /// Raw-body options (declared content language).
    pub options: Option<BodyOptions>,
    /// Multipart form fields (mode `formdata`).
    #[serde(default)]
    pub formdata: Vec<FormField>,
    /// URL-encoded form fields (mode `urlencoded`).
    #[serde(default)]
    pub urlencoded: Vec<FormField>,
    /// GraphQL payload (mode `graphql`).
    pub graphql: Option<GraphqlBody>,
}

impl Body {
    /// The closed body-mode variant for this descriptor.
    pub fn parsed_mode(&self) -> BodyMode {
        self.mode
            .as_deref()
            .map_or(BodyMode::Unknown, BodyMode::from_tag)
    }

    /// The declared raw-body content language, defaulting to json.
    pub fn raw_language(&self) -> &str {
        self.options
            .as_ref()
            .and_then(|o| o.raw.as_ref())
            .and_then(|r| r.language.as_deref())
            .unwrap_or("json")
    }
}

/// The closed set of body encoding modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Raw text with a declared content language.
    Raw,
    /// Multipart form data.
    Formdata,
    /// URL-encoded form data.
    Urlencoded,
    /// An opaque binary payload.
    Binary,
    /// A GraphQL query/variables pair.
    Graphql,
    /// A file reference; carries no translatable payload.
    File,
    /// Any unrecognized tag.
    Unknown,
}

impl BodyMode {
    /// Maps a loose mode tag onto the closed variant set.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "raw" => BodyMode::Raw,
            "formdata" => BodyMode::Formdata,
            "urlencoded" => BodyMode::Urlencoded,
            "binary" => BodyMode::Binary,
            "graphql" => BodyMode::Graphql,
            "file" => BodyMode::File,
            _ => BodyMode::Unknown,
        }
    }
}

/// Raw-body options wrapper (`options.raw.language`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BodyOptions {
    /// Options for the raw mode.
    pub raw: Option<RawOptions>,
}

/// Declared content language of a raw body.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawOptions {
    /// Language tag, e.g. `json` or `xml`.
    pub language: Option<String>,
}

/// One multipart/urlencoded form field.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FormField {
    /// Field name.
    #[serde(default)]
    pub key: String,
    /// Example value.
    pub value: Option<String>,
    /// Field kind tag: `text` or `file`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Disabled fields are excluded from the output.
    #[serde(default)]
    pub disabled: bool,
    /// Free-form description.
    pub description: Option<String>,
}

impl FormField {
    /// True for file-upload fields, which get a binary format hint.
    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }
}

/// A GraphQL body payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GraphqlBody {
    /// The query document text.
    pub query: Option<String>,
    /// Variables are carried as raw text, exactly as authored.
    pub variables: Option<String>,
}

/// An authentication descriptor.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Auth {
    /// The auth mode tag; parsed into [`AuthKind`] at use sites.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Parameters for the `apikey` mode.
    #[serde(default)]
    pub apikey: Vec<AuthParam>,
}

impl Auth {
    /// The closed auth-kind variant for this descriptor.
    pub fn parsed_kind(&self) -> AuthKind {
        AuthKind::from_tag(&self.kind)
    }
}

/// The closed set of auth modes. Only the first three translate; the rest
/// are recognized so that ignoring them is an explicit, exhaustive-match
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    /// HTTP bearer token.
    Bearer,
    /// HTTP basic credentials.
    Basic,
    /// API key in a header or query parameter.
    Apikey,
    /// OAuth 1, not translated.
    Oauth1,
    /// OAuth 2, not translated.
    Oauth2,
    /// Hawk, not translated.
    Hawk,
    /// Digest, not translated.
    Digest,
    /// NTLM, not translated.
    Ntlm,
    /// Any unrecognized tag, not translated.
    Unknown,
}

impl AuthKind {
    /// Maps a loose auth tag onto the closed variant set.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bearer" => AuthKind::Bearer,
            "basic" => AuthKind::Basic,
            "apikey" => AuthKind::Apikey,
            "oauth1" => AuthKind::Oauth1,
            "oauth2" => AuthKind::Oauth2,
            "hawk" => AuthKind::Hawk,
            "digest" => AuthKind::Digest,
            "ntlm" => AuthKind::Ntlm,
            _ => AuthKind::Unknown,
        }
    }
}

/// One key/value/location triple inside an auth descriptor.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthParam {
    /// Parameter name (the API key name for `apikey`).
    pub key: Option<String>,
    /// Parameter value, never copied into the output.
    pub value: Option<String>,
    /// Parameter location, `header` or `query`.
    #[serde(rename = "in")]
    pub location: Option<String>,
}

/// A saved example response attached to a request leaf.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExampleResponse {
    /// Example display name; becomes the response description.
    pub name: Option<String>,
    /// Numeric status code; absent defaults to 200 downstream.
    pub code: Option<u16>,
    /// Response headers; Postman exports sometimes write `null` here.
    #[serde(default)]
    pub header: Option<Vec<Header>>,
    /// Raw body text.
    pub body: Option<String>,
}
