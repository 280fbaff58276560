//! Swagger UI integration

use crate::spec::OpenApiSpec;
use crate::store::OpenApiError;
use trellis_core::{HttpResponse, SwaggerUiConfig};

const SWAGGER_UI_CDN: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5.10.0";

/// Render the Swagger UI page, loading the spec from the JSON endpoint.
pub fn swagger_html(config: &SwaggerUiConfig, spec_url: &str) -> String {
    let logo = config
        .logo_href
        .as_deref()
        .map(|href| format!(r#"<img src="{href}" alt="logo" height="40">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <title>{title}</title>
    <link rel="icon" type="image/png" href="{favicon}">
    <link rel="stylesheet" href="{cdn}/swagger-ui.css">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    {logo}
    <div id="swagger-ui"></div>
    <script src="{cdn}/swagger-ui-bundle.js"></script>
    <script src="{cdn}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{
                url: '{spec_url}',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"#,
        title = config.title,
        description = config.description,
        favicon = config.favicon_href,
        cdn = SWAGGER_UI_CDN,
        logo = logo,
        spec_url = spec_url,
    )
}

/// HTML response for the documentation page.
pub fn html_response(html: String) -> HttpResponse {
    HttpResponse::ok()
        .with_header("content-type", "text/html")
        .with_body(html.into_bytes())
}

/// JSON response for the spec endpoint.
pub fn spec_json_response(spec: &OpenApiSpec) -> Result<HttpResponse, OpenApiError> {
    let text = serde_json::to_string_pretty(spec)?;
    Ok(HttpResponse::ok()
        .with_header("content-type", "application/json")
        .with_body(text.into_bytes()))
}

/// YAML response for the spec endpoint.
pub fn spec_yaml_response(spec: &OpenApiSpec) -> Result<HttpResponse, OpenApiError> {
    let text = serde_yaml::to_string(spec)?;
    Ok(HttpResponse::ok()
        .with_header("content-type", "application/x-yaml")
        .with_body(text.into_bytes()))
}
