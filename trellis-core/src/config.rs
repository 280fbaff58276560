// Configuration for the documentation layer
//
// ApiConfig is serde-serializable so the spec orchestrator can fingerprint
// it: a changed fingerprint on an inbound request triggers regeneration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Where the application's route modules live. Informational only.
    pub api_routes_path: String,
    /// Deep-merged into the generated document, overrides winning.
    pub openapi_spec_overrides: Option<Value>,
    /// Docs endpoint serving the JSON document.
    pub openapi_json_path: String,
    /// Docs endpoint serving the YAML document.
    pub openapi_yaml_path: String,
    /// Docs endpoint serving the Swagger UI page.
    pub swagger_ui_path: String,
    /// When false, generation is skipped and the docs endpoints are off.
    pub expose_openapi_spec: bool,
    /// Templating-only settings for the Swagger UI page.
    pub swagger_ui: SwaggerUiConfig,
    /// Where the generated document is persisted. A `.yaml`/`.yml`
    /// extension selects YAML, anything else pretty JSON.
    pub spec_file_path: String,
    /// When false, an existing persisted document is served without
    /// rebuilding.
    pub regenerate: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_routes_path: "src/routes".to_string(),
            openapi_spec_overrides: None,
            openapi_json_path: "/api/openapi.json".to_string(),
            openapi_yaml_path: "/api/openapi.yaml".to_string(),
            swagger_ui_path: "/api".to_string(),
            expose_openapi_spec: true,
            swagger_ui: SwaggerUiConfig::default(),
            spec_file_path: "openapi.json".to_string(),
            regenerate: true,
        }
    }
}

impl ApiConfig {
    /// Deep structural fingerprint of the active configuration.
    /// serde_json maps are ordered, so equal configs fingerprint equally.
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Swagger UI page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerUiConfig {
    pub title: String,
    pub description: String,
    pub favicon_href: String,
    pub logo_href: Option<String>,
}

impl Default for SwaggerUiConfig {
    fn default() -> Self {
        Self {
            title: "Trellis | API docs".to_string(),
            description: "Interactive API documentation".to_string(),
            favicon_href: "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5.10.0/favicon-32x32.png"
                .to_string(),
            logo_href: None,
        }
    }
}

/// Default error messages, returned verbatim in `{ "message": … }` bodies
/// unless a configured error handler takes over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub method_not_allowed: String,
    pub not_found: String,
    pub invalid_media_type: String,
    pub unexpected_error: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            method_not_allowed: "Method not allowed.".to_string(),
            not_found: "Not found.".to_string(),
            invalid_media_type: "Invalid media type.".to_string(),
            unexpected_error: "An unknown error occurred, trying again might help.".to_string(),
        }
    }
}
