//! Schema description types

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Description of the shape a JSON value must take.
///
/// A closed enumeration covering what route inputs and outputs need.
/// Conversion to an OpenAPI-compatible object is via
/// [`to_json_schema`](Schema::to_json_schema).
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// JSON `null`.
    Null,
    /// Any value; documents as an empty schema.
    Any,
    /// A homogeneous array.
    Array { items: Box<Schema> },
    /// An object with declared properties. Properties are ordered by name
    /// so generated documents are stable.
    Object {
        properties: BTreeMap<String, Schema>,
        required: Vec<String>,
    },
    /// One of a fixed set of values.
    Enum { values: Vec<Value> },
}

impl Schema {
    /// Array schema with the given item schema.
    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }

    /// Object schema from property pairs and required field names.
    pub fn object<P, R, K, N>(properties: P, required: R) -> Self
    where
        P: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
        R: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Schema::Object {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Enum schema over the given values.
    pub fn one_of<V: IntoIterator<Item = Value>>(values: V) -> Self {
        Schema::Enum {
            values: values.into_iter().collect(),
        }
    }

    /// The JSON type name used in issue messages ("string", "number", ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::String => "string",
            Schema::Number => "number",
            Schema::Integer => "integer",
            Schema::Boolean => "boolean",
            Schema::Null => "null",
            Schema::Any => "any",
            Schema::Array { .. } => "array",
            Schema::Object { .. } => "object",
            Schema::Enum { .. } => "enum",
        }
    }

    /// Convert into a JSON-Schema-compatible object for OpenAPI documents.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::String => json!({"type": "string"}),
            Schema::Number => json!({"type": "number"}),
            Schema::Integer => json!({"type": "integer"}),
            Schema::Boolean => json!({"type": "boolean"}),
            Schema::Null => json!({"type": "null"}),
            Schema::Any => Value::Object(Map::new()),
            Schema::Array { items } => json!({
                "type": "array",
                "items": items.to_json_schema(),
            }),
            Schema::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
                    .collect();
                let mut obj = Map::new();
                obj.insert("type".to_string(), json!("object"));
                obj.insert("properties".to_string(), Value::Object(props));
                if !required.is_empty() {
                    obj.insert("required".to_string(), json!(required));
                }
                Value::Object(obj)
            }
            Schema::Enum { values } => json!({"enum": values}),
        }
    }
}

/// The JSON type name of a value, as it appears in issue messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
