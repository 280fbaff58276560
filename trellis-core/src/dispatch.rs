// Per-request dispatch
//
// The dispatcher is the error boundary: every rejection and every handler
// failure is converted into a well-formed response here. No error kind
// propagates past dispatch.

use crate::{
    validate_request, Error, HttpRequest, HttpResponse, MessageCatalog, RequestError,
    RouteDefinition,
};
use serde_json::json;
use std::sync::Arc;
use trellis_schema::{SchemaValidator, StructuralValidator};

/// User-supplied error handler. When configured it fully controls the
/// response to a failed middleware/handler; the default body is not
/// written.
pub type ErrorHandler = Arc<dyn Fn(&Error, &HttpRequest) -> HttpResponse + Send + Sync>;

/// Dispatches one request against one route definition.
pub struct Dispatcher {
    validator: Arc<dyn SchemaValidator>,
    catalog: MessageCatalog,
    error_handler: Option<ErrorHandler>,
    suppress_errors: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            validator: Arc::new(StructuralValidator),
            catalog: MessageCatalog::default(),
            error_handler: None,
            suppress_errors: false,
        }
    }

    /// Replace the schema-validation capability.
    pub fn validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Error, &HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Suppress handler-error logging (production mode). A fixed notice is
    /// logged instead of the error itself.
    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Single entry point, invoked once per inbound request.
    pub async fn dispatch(&self, definition: &RouteDefinition, request: HttpRequest) -> HttpResponse {
        let (validated, method) =
            match validate_request(definition, self.validator.as_ref(), request) {
                Ok(outcome) => outcome,
                Err(rejection) => return self.reject(rejection),
            };

        // The operation exists; validate_request already rejected
        // undeclared methods.
        let Some(operation) = definition.operation(method) else {
            return self.not_found();
        };

        if let Some(middleware) = &operation.middleware {
            match middleware(validated.clone()).await {
                Ok(Some(response)) => return response,
                Ok(None) => {}
                Err(error) => return self.handler_error(error, &validated.request),
            }
        }

        // Declared but unimplemented methods fall back to not-found.
        let Some(handler) = &operation.handler else {
            return self.not_found();
        };

        let transport = validated.request.clone();
        match handler(validated).await {
            Ok(response) => response,
            Err(error) => self.handler_error(error, &transport),
        }
    }

    fn reject(&self, rejection: RequestError) -> HttpResponse {
        match rejection {
            RequestError::MethodNotAllowed { allowed } => {
                let allow = allowed
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                message_response(405, &self.catalog.method_not_allowed)
                    .with_header("allow", allow)
            }
            RequestError::NotFound => self.not_found(),
            RequestError::UnsupportedMediaType => {
                message_response(415, &self.catalog.invalid_media_type)
            }
            RequestError::InvalidBody(message) | RequestError::InvalidQuery(message) => {
                message_response(400, &message)
            }
        }
    }

    fn not_found(&self) -> HttpResponse {
        message_response(404, &self.catalog.not_found)
    }

    fn handler_error(&self, error: Error, request: &HttpRequest) -> HttpResponse {
        if let Some(handler) = &self.error_handler {
            return handler(&error, request);
        }
        if self.suppress_errors {
            tracing::error!("A handler error occurred; detail suppressed in production mode");
        } else {
            tracing::error!(error = %error, method = %request.method, path = %request.path, "handler error");
        }
        message_response(error.status_code(), &self.catalog.unexpected_error)
    }
}

/// `{ "message": … }` JSON body with the given status.
fn message_response(status: u16, message: &str) -> HttpResponse {
    let body = json!({ "message": message });
    HttpResponse::new(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string().into_bytes())
}
