// Route definition model
//
// A RouteDefinition maps HTTP methods to Operations. Declarations are
// built once at registration time through the fluent builders below and
// are immutable afterwards; the dispatcher reads them on every matching
// request.

use crate::{Error, HttpRequest, HttpResponse, Method};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A request that passed validation, carrying the parsed body and query.
///
/// The transport request is exposed unchanged; `body` and `query` are only
/// populated when the operation declared the corresponding schema.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub request: HttpRequest,
    pub body: Option<Value>,
    pub query: Option<Value>,
}

impl ValidatedRequest {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            body: None,
            query: None,
        }
    }
}

/// A route handler function type
pub type Handler = Arc<
    dyn Fn(
            ValidatedRequest,
        )
            -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>
        + Send
        + Sync,
>;

/// Middleware runs before the handler; returning `Some(response)`
/// terminates dispatch without invoking the handler.
pub type Middleware = Arc<
    dyn Fn(
            ValidatedRequest,
        ) -> Pin<
            Box<dyn Future<Output = Result<Option<HttpResponse>, Error>> + Send>,
        > + Send
        + Sync,
>;

/// Declared input for one operation: expected content type, body schema,
/// and query schema, each optional.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub content_type: Option<String>,
    pub body: Option<trellis_schema::Schema>,
    pub query: Option<trellis_schema::Schema>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, schema: trellis_schema::Schema) -> Self {
        self.body = Some(schema);
        self
    }

    pub fn query(mut self, schema: trellis_schema::Schema) -> Self {
        self.query = Some(schema);
        self
    }
}

/// One documented response shape.
///
/// Outputs are documentation-only: they feed the generated spec and are
/// never used to validate outgoing responses.
#[derive(Debug, Clone)]
pub struct Output {
    pub schema: trellis_schema::Schema,
    pub status: u16,
    pub content_type: String,
}

impl Output {
    pub fn new(schema: trellis_schema::Schema, status: u16, content_type: impl Into<String>) -> Self {
        Self {
            schema,
            status,
            content_type: content_type.into(),
        }
    }

    /// `application/json` output shortcut.
    pub fn json(schema: trellis_schema::Schema, status: u16) -> Self {
        Self::new(schema, status, "application/json")
    }
}

/// The full declaration of one method on a route.
#[derive(Clone)]
pub struct Operation {
    pub input: Option<Input>,
    pub outputs: Vec<Output>,
    pub middleware: Option<Middleware>,
    pub handler: Option<Handler>,
    /// Raw OpenAPI operation-object override, deep-merged over the
    /// inferred operation with these fields winning.
    pub openapi_operation: Option<Value>,
}

impl Operation {
    pub fn builder() -> OperationBuilder {
        OperationBuilder::new()
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("input", &self.input)
            .field("outputs", &self.outputs)
            .field("middleware", &self.middleware.is_some())
            .field("handler", &self.handler.is_some())
            .field("openapi_operation", &self.openapi_operation)
            .finish()
    }
}

/// Fluent builder for [`Operation`].
///
/// Stages are input → output → middleware → handler; each is optional and
/// order-flexible.
#[derive(Default)]
pub struct OperationBuilder {
    input: Option<Input>,
    outputs: Vec<Output>,
    middleware: Option<Middleware>,
    handler: Option<Handler>,
    openapi_operation: Option<Value>,
}

impl OperationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }

    /// Append one documented response.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn outputs<O: IntoIterator<Item = Output>>(mut self, outputs: O) -> Self {
        self.outputs.extend(outputs);
        self
    }

    pub fn middleware<F, Fut>(mut self, middleware: F) -> Self
    where
        F: Fn(ValidatedRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<HttpResponse>, Error>> + Send + 'static,
    {
        self.middleware = Some(Arc::new(move |req| Box::pin(middleware(req))));
        self
    }

    pub fn handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(ValidatedRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |req| Box::pin(handler(req))));
        self
    }

    /// Raw OpenAPI operation override merged over the inferred operation.
    pub fn openapi(mut self, operation: Value) -> Self {
        self.openapi_operation = Some(operation);
        self
    }

    pub fn build(self) -> Operation {
        Operation {
            input: self.input,
            outputs: self.outputs,
            middleware: self.middleware,
            handler: self.handler,
            openapi_operation: self.openapi_operation,
        }
    }
}

/// Per-path mapping from HTTP method to operation.
#[derive(Clone, Debug, Default)]
pub struct RouteDefinition {
    operations: BTreeMap<Method, Operation>,
    /// Raw OpenAPI path-item override merged over the synthesized item.
    pub openapi_path: Option<Value>,
    catch_all: bool,
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation for a method. At most one operation per
    /// method: a later registration replaces the earlier one.
    pub fn method(mut self, method: Method, operation: OperationBuilder) -> Self {
        self.operations.insert(method, operation.build());
        self
    }

    pub fn get(self, operation: OperationBuilder) -> Self {
        self.method(Method::GET, operation)
    }

    pub fn put(self, operation: OperationBuilder) -> Self {
        self.method(Method::PUT, operation)
    }

    pub fn post(self, operation: OperationBuilder) -> Self {
        self.method(Method::POST, operation)
    }

    pub fn delete(self, operation: OperationBuilder) -> Self {
        self.method(Method::DELETE, operation)
    }

    pub fn options(self, operation: OperationBuilder) -> Self {
        self.method(Method::OPTIONS, operation)
    }

    pub fn head(self, operation: OperationBuilder) -> Self {
        self.method(Method::HEAD, operation)
    }

    pub fn patch(self, operation: OperationBuilder) -> Self {
        self.method(Method::PATCH, operation)
    }

    /// Raw OpenAPI path-item override.
    pub fn openapi_path(mut self, path_item: Value) -> Self {
        self.openapi_path = Some(path_item);
        self
    }

    /// Mark this definition as a catch-all route. Catch-all routes answer
    /// undeclared methods with 404 instead of 405.
    pub fn catch_all(mut self) -> Self {
        self.catch_all = true;
        self
    }

    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    pub fn operation(&self, method: Method) -> Option<&Operation> {
        self.operations.get(&method)
    }

    /// Declared methods in canonical order.
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.operations.contains_key(m))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
