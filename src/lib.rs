// Trellis - typed route definitions with auto-generated OpenAPI docs
//
// Declare a route's input and output schemas once: requests are validated
// against them at runtime, and the same declarations produce an OpenAPI
// 3.0.1 document and a Swagger UI.

// Re-export core functionality
pub use trellis_core::*;
pub use trellis_schema::{Schema, SchemaIssue, SchemaValidator, StructuralValidator};

// Re-export optional crates
#[cfg(feature = "openapi")]
pub use trellis_openapi;

#[cfg(feature = "testing")]
pub use trellis_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ApiConfig, Dispatcher, Error, HttpRequest, HttpResponse, Input, MessageCatalog, Method,
        Operation, Output, RouteDefinition, Schema, SwaggerUiConfig, ValidatedRequest,
    };

    #[cfg(feature = "openapi")]
    pub use trellis_openapi::{DocsRouter, Info, OpenApiSpec};
}
