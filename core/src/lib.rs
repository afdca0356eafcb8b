#![deny(missing_docs)]

//! # P2O Core
//!
//! Core library for the Postman Collection -> OpenAPI 3.0 translator.
//!
//! The entry point is [`translate`] (or [`translate_str`] for raw JSON):
//! a single synchronous pass over the collection tree that returns the
//! assembled document together with the diagnostics for every node that
//! was skipped or degraded along the way.

/// Shared error types.
pub mod error;

/// Source collection model (serde, tolerant decode).
pub mod collection;

/// Output OpenAPI document model (serde, order-preserving).
pub mod openapi;

/// Address parsing and path template normalization.
pub mod address;

/// Structural schema inference from example JSON.
pub mod schema_infer;

/// Request body mode mapping.
pub mod body;

/// Auth descriptor mapping.
pub mod auth;

/// The collection walker and request translator.
pub mod translate;

pub use address::{normalize_placeholders, parse_address, ParsedAddress};
pub use auth::apply_auth;
pub use body::map_body;
pub use collection::{Auth, AuthKind, Body, BodyMode, Collection, Item, RequestSpec};
pub use error::{AppError, AppResult};
pub use openapi::{Document, Method, Operation, PathItem, Schema, SchemaType};
pub use schema_infer::{infer, infer_from_text};
pub use translate::{translate, translate_str, Diagnostic, DiagnosticKind, Translation};
