//! Catch-all composition: docs endpoints plus application routes
//!
//! `DocsRouter` is the single entry point a host framework mounts beneath
//! a prefix. Every inbound request first lets the orchestrator check
//! whether the document must be (re)generated, then either serves a
//! documentation endpoint or dispatches to the matching route definition.

use crate::orchestrator::SpecOrchestrator;
use crate::spec::Info;
use crate::store::{FsSpecStore, SpecStore};
use crate::swagger::{html_response, spec_json_response, spec_yaml_response, swagger_html};
use std::collections::BTreeMap;
use std::sync::Arc;
use trellis_core::{
    ApiConfig, Dispatcher, Error, HttpRequest, HttpResponse, RouteDefinition,
};
use trellis_schema::SchemaValidator;

pub struct DocsRouter {
    config: ApiConfig,
    info: Info,
    routes: Vec<(String, RouteDefinition)>,
    dispatcher: Dispatcher,
    orchestrator: Arc<SpecOrchestrator>,
}

impl Default for DocsRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsRouter {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            info: Info::default(),
            routes: Vec::new(),
            dispatcher: Dispatcher::new(),
            orchestrator: Arc::new(SpecOrchestrator::new(Arc::new(FsSpecStore))),
        }
    }

    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Register a route. Paths may embed `[param]` or `:param` segments.
    pub fn route(mut self, path: impl Into<String>, definition: RouteDefinition) -> Self {
        self.routes.push((path.into(), definition));
        self
    }

    pub fn validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.dispatcher = self.dispatcher.validator(validator);
        self
    }

    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Error, &HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        self.dispatcher = self.dispatcher.error_handler(handler);
        self
    }

    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.dispatcher = self.dispatcher.suppress_errors(suppress);
        self
    }

    /// Replace the persistence collaborator (and reset cached state).
    pub fn store(mut self, store: Arc<dyn SpecStore>) -> Self {
        self.orchestrator = Arc::new(SpecOrchestrator::new(store));
        self
    }

    pub fn orchestrator(&self) -> Arc<SpecOrchestrator> {
        self.orchestrator.clone()
    }

    /// Handle one inbound request end to end.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        if let Err(error) = self
            .orchestrator
            .poll(&self.config, &self.routes, &self.info)
        {
            tracing::warn!(error = %error, "OpenAPI document generation failed");
        }

        let mut request = request;
        let (path, query) = match request.path.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (request.path.clone(), None),
        };
        if let Some(query) = query {
            request.query_params.extend(parse_query_string(&query));
            request.path = path.clone();
        }

        if let Some(response) = self.docs_response(&request, &path) {
            return response;
        }

        for (pattern, definition) in &self.routes {
            if let Some(params) = match_path(pattern, &path) {
                request.path_params = params;
                return self.dispatcher.dispatch(definition, request).await;
            }
        }

        // No route matched: catch-all semantics, so a plain 404.
        self.dispatcher
            .dispatch(&RouteDefinition::new().catch_all(), request)
            .await
    }

    fn docs_response(&self, request: &HttpRequest, path: &str) -> Option<HttpResponse> {
        if !self.config.expose_openapi_spec || request.method != "GET" {
            return None;
        }
        if path == self.config.swagger_ui_path {
            let html = swagger_html(&self.config.swagger_ui, &self.config.openapi_json_path);
            return Some(html_response(html));
        }
        if path == self.config.openapi_json_path {
            return Some(self.spec_response(spec_json_response));
        }
        if path == self.config.openapi_yaml_path {
            return Some(self.spec_response(spec_yaml_response));
        }
        None
    }

    fn spec_response(
        &self,
        render: fn(&crate::spec::OpenApiSpec) -> Result<HttpResponse, crate::store::OpenApiError>,
    ) -> HttpResponse {
        let Some(spec) = self.orchestrator.cached_spec() else {
            return HttpResponse::not_found();
        };
        match render(&spec) {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = %error, "failed to serialize the OpenAPI document");
                HttpResponse::new(500)
            }
        }
    }
}

/// Match a route path pattern against a request path, extracting
/// `[param]`/`:param` segment values.
fn match_path(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (pattern_part, path_part) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(name) = param_name(pattern_part) {
            params.insert(name.to_string(), path_part.to_string());
        } else if pattern_part != path_part {
            return None;
        }
    }
    Some(params)
}

fn param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| segment.strip_prefix(':'))
}

/// Parse a query string into a map of parameters. Repeated keys keep
/// every value in arrival order.
fn parse_query_string(query: &str) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for part in query.split('&').filter(|part| !part.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        params
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySpecStore;
    use serde_json::{json, Value};
    use trellis_core::{Input, Operation, Output};
    use trellis_schema::Schema;

    fn body_json(response: &HttpResponse) -> Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    fn router() -> DocsRouter {
        DocsRouter::new()
            .store(Arc::new(MemorySpecStore::new()))
            .route(
                "/todos",
                RouteDefinition::new().get(
                    Operation::builder()
                        .output(Output::json(Schema::array(Schema::String), 200))
                        .handler(|_req| async {
                            HttpResponse::ok().with_json(&json!(["a", "b"]))
                        }),
                ),
            )
            .route(
                "/todos/[id]",
                RouteDefinition::new().get(
                    Operation::builder()
                        .input(Input::new().query(Schema::object(
                            [("verbose", Schema::String)],
                            Vec::<String>::new(),
                        )))
                        .handler(|req| async move {
                            let id = req.request.param("id").cloned().unwrap_or_default();
                            HttpResponse::ok().with_json(&json!({"id": id}))
                        }),
                ),
            )
    }

    #[test]
    fn match_path_handles_bracket_and_colon_params() {
        let params = match_path("/todos/[id]", "/todos/42").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
        let params = match_path("/todos/:id", "/todos/42").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
        assert!(match_path("/todos/[id]", "/other/42").is_none());
        assert!(match_path("/todos", "/todos/42").is_none());
    }

    #[test]
    fn query_string_parsing() {
        let params = parse_query_string("a=1&b=&c&a=2");
        assert_eq!(params.get("a"), Some(&vec!["1".to_string(), "2".to_string()]));
        assert_eq!(params.get("b"), Some(&vec!["".to_string()]));
        assert_eq!(params.get("c"), Some(&vec!["".to_string()]));
    }

    #[tokio::test]
    async fn dispatches_matching_route() {
        let response = router().handle(HttpRequest::new("GET", "/todos")).await;
        assert_eq!(response.status, 200);
        assert_eq!(body_json(&response), json!(["a", "b"]));
    }

    #[tokio::test]
    async fn extracts_path_params_and_query() {
        let response = router()
            .handle(HttpRequest::new("GET", "/todos/42?verbose=yes"))
            .await;
        assert_eq!(body_json(&response), json!({"id": "42"}));
    }

    #[tokio::test]
    async fn repeated_query_values_reach_the_handler() {
        let router = DocsRouter::new()
            .store(Arc::new(MemorySpecStore::new()))
            .route(
                "/filter",
                RouteDefinition::new().get(
                    Operation::builder()
                        .input(Input::new().query(Schema::object(
                            [("tag", Schema::array(Schema::String))],
                            ["tag"],
                        )))
                        .handler(|req| async move {
                            HttpResponse::ok().with_json(&req.query)
                        }),
                ),
            );
        let response = router
            .handle(HttpRequest::new("GET", "/filter?tag=a&tag=b"))
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(body_json(&response), json!({"tag": ["a", "b"]}));
    }

    #[tokio::test]
    async fn unmatched_path_is_404_with_catalog_message() {
        let response = router().handle(HttpRequest::new("GET", "/missing")).await;
        assert_eq!(response.status, 404);
        assert_eq!(body_json(&response), json!({"message": "Not found."}));
    }

    #[tokio::test]
    async fn serves_swagger_ui_html() {
        let response = router().handle(HttpRequest::new("GET", "/api")).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert!(String::from_utf8(response.body).unwrap().contains("swagger-ui"));
    }

    #[tokio::test]
    async fn serves_openapi_json_with_registered_paths() {
        let response = router()
            .handle(HttpRequest::new("GET", "/api/openapi.json"))
            .await;
        assert_eq!(response.status, 200);
        let spec = body_json(&response);
        assert_eq!(spec["openapi"], "3.0.1");
        assert!(spec["paths"]["/todos"]["get"].is_object());
        assert!(spec["paths"]["/todos/{id}"]["get"].is_object());
    }

    #[tokio::test]
    async fn serves_openapi_yaml() {
        let response = router()
            .handle(HttpRequest::new("GET", "/api/openapi.yaml"))
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("application/x-yaml"));
    }

    #[tokio::test]
    async fn docs_endpoints_are_get_only() {
        let response = router().handle(HttpRequest::new("POST", "/api")).await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn disabled_exposure_hides_docs_endpoints() {
        let mut config = ApiConfig::default();
        config.expose_openapi_spec = false;
        let router = router().config(config);
        let response = router.handle(HttpRequest::new("GET", "/api/openapi.json")).await;
        assert_eq!(response.status, 404);
        // Application routes still work.
        let response = router.handle(HttpRequest::new("GET", "/todos")).await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn custom_docs_paths_are_honored() {
        let mut config = ApiConfig::default();
        config.swagger_ui_path = "/docs".to_string();
        config.openapi_json_path = "/docs/spec.json".to_string();
        let router = router().config(config);
        let response = router.handle(HttpRequest::new("GET", "/docs/spec.json")).await;
        assert_eq!(response.status, 200);
        let response = router.handle(HttpRequest::new("GET", "/api/openapi.json")).await;
        assert_eq!(response.status, 404);
    }
}
