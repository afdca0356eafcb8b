//! # Structural Schema Inference
//!
//! Infers a structural schema from an arbitrary decoded JSON value. Total
//! and pure: any input yields a schema, never an error. Text that fails to
//! decode as JSON degrades to a string schema carrying the raw text as its
//! example.

use serde_json::Value;

use crate::openapi::{Schema, SchemaType};

/// Values nested deeper than this degrade to a string schema. The JSON
/// decoder refuses deeper documents long before this bound, so it only
/// guards values constructed in memory.
const MAX_DEPTH: usize = 64;

/// Infers a structural schema for `value`. The returned schema's type
/// matches the value's kind and, except for `null`, carries the whole
/// value as its top-level example.
pub fn infer(value: &Value) -> Schema {
    let mut schema = infer_at(value, 0);
    if schema.example.is_none() && !value.is_null() {
        schema.example = Some(value.clone());
    }
    schema
}

/// Infers a schema for raw body text: JSON text is decoded and inferred
/// structurally, anything else degrades to a string schema with the text
/// as its example.
pub fn infer_from_text(text: &str) -> Schema {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => infer(&value),
        Err(_) => Schema::of(SchemaType::String).with_example(Value::String(text.to_string())),
    }
}

fn infer_at(value: &Value, depth: usize) -> Schema {
    if depth >= MAX_DEPTH {
        return Schema::of(SchemaType::String).with_example(value.clone());
    }

    match value {
        Value::Null => Schema::of(SchemaType::Null),
        Value::Bool(_) => Schema::of(SchemaType::Boolean).with_example(value.clone()),
        Value::Number(_) => Schema::of(SchemaType::Number).with_example(value.clone()),
        Value::String(_) => Schema::of(SchemaType::String).with_example(value.clone()),
        Value::Array(items) => {
            // Item typing comes from the first element; an empty array has
            // nothing to sample, so it defaults to string items.
            let item_schema = items
                .first()
                .map(|v| infer_at(v, depth + 1))
                .unwrap_or_else(|| Schema::of(SchemaType::String));
            Schema::array(item_schema)
        }
        Value::Object(map) => {
            let properties = map
                .iter()
                .map(|(key, v)| (key.clone(), infer_at(v, depth + 1)))
                .collect();
            Schema::object(properties)
        }
    }
}
