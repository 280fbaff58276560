//! OpenAPI 3.0.1 generation and Swagger UI integration for Trellis
//!
//! Route definitions declared through `trellis-core` are turned into an
//! OpenAPI document here: [`build_spec`] synthesizes path items from the
//! declared inputs and outputs, the [`SpecOrchestrator`] caches the result
//! against a fingerprint of the active configuration, and [`DocsRouter`]
//! serves the document (JSON, YAML, and a Swagger UI page) next to the
//! application's own routes from a single catch-all entry point.
//!
//! ## Quick start
//!
//! ```
//! use trellis_core::{HttpRequest, HttpResponse, Operation, Output, RouteDefinition};
//! use trellis_openapi::{DocsRouter, Info, MemorySpecStore};
//! use trellis_schema::Schema;
//! use std::sync::Arc;
//!
//! let router = DocsRouter::new()
//!     .info(Info::new("Todo API", "1.0.0"))
//!     .store(Arc::new(MemorySpecStore::new()))
//!     .route(
//!         "/todos",
//!         RouteDefinition::new().get(
//!             Operation::builder()
//!                 .output(Output::json(Schema::array(Schema::String), 200))
//!                 .handler(|_req| async {
//!                     HttpResponse::ok().with_json(&vec!["walk the dog"])
//!                 }),
//!         ),
//!     );
//!
//! # tokio_test::block_on(async {
//! let spec = router.handle(HttpRequest::new("GET", "/api/openapi.json")).await;
//! assert_eq!(spec.status, 200);
//! # });
//! ```

pub mod builder;
pub mod merge;
pub mod orchestrator;
pub mod router;
pub mod spec;
pub mod store;
pub mod swagger;

pub use builder::*;
pub use merge::*;
pub use orchestrator::*;
pub use router::*;
pub use spec::*;
pub use store::*;
pub use swagger::*;
