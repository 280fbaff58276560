//! OpenAPI 3.0.1 document types
//!
//! Maps are BTreeMap-keyed so serialization is deterministic: two
//! generations from the same route set and overrides are byte-identical.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const OPENAPI_VERSION: &str = "3.0.1";

/// The generated OpenAPI document.
///
/// `info`, `components`, and path items are raw values because user
/// overrides are deep-merged into them; the typed structs below are used
/// only while synthesizing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,
    pub info: Value,
    pub components: Value,
    pub paths: BTreeMap<String, Value>,
}

impl OpenApiSpec {
    pub fn new(info: Value) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            components: Value::Object(Map::new()),
            paths: BTreeMap::new(),
        }
    }
}

/// API information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new("Trellis API", "0.1.0")
    }
}

/// Operation (endpoint), as synthesized from a route declaration.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, ResponseObject>,
}

/// Parameter
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Value,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
}

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub content: BTreeMap<String, MediaTypeObject>,
}

/// Media type entry
#[derive(Debug, Clone, Serialize)]
pub struct MediaTypeObject {
    pub schema: Value,
}

/// Response
#[derive(Debug, Clone, Serialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub content: BTreeMap<String, MediaTypeObject>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_spec_serializes_with_version() {
        let spec = OpenApiSpec::new(json!({"title": "T", "version": "1"}));
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["openapi"], "3.0.1");
        assert_eq!(value["paths"], json!({}));
    }

    #[test]
    fn operation_omits_empty_fields() {
        let op = Operation::default();
        let value = serde_json::to_value(&op).unwrap();
        assert!(value.get("parameters").is_none());
        assert!(value.get("requestBody").is_none());
    }

    #[test]
    fn parameter_location_renames() {
        let param = Parameter {
            name: "id".to_string(),
            location: ParameterLocation::Path,
            required: true,
            schema: json!({"type": "string"}),
        };
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["in"], "path");
    }

    #[test]
    fn spec_round_trips_through_serde() {
        let mut spec = OpenApiSpec::new(json!({"title": "T", "version": "1"}));
        spec.paths
            .insert("/users".to_string(), json!({"get": {"responses": {}}}));
        let text = serde_json::to_string(&spec).unwrap();
        let back: OpenApiSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
