//! Core library for Trellis: typed route definitions, request validation,
//! and dispatch.
//!
//! Routes are declared as immutable [`RouteDefinition`] values mapping
//! HTTP methods to [`Operation`]s, each carrying optional input schemas
//! (content type, body, query), documented outputs, middleware, and a
//! handler. The [`Dispatcher`] validates inbound requests against those
//! declarations and invokes the handler, converting every rejection and
//! handler failure into a well-formed response.
//!
//! The transport is abstract: the host framework supplies
//! [`HttpRequest`]/[`HttpResponse`] values; Trellis never touches sockets.
//!
//! # Example
//!
//! ```
//! use trellis_core::{Dispatcher, HttpRequest, HttpResponse, Input, Operation, Output, RouteDefinition};
//! use trellis_schema::Schema;
//!
//! let route = RouteDefinition::new().post(
//!     Operation::builder()
//!         .input(
//!             Input::new()
//!                 .content_type("application/json")
//!                 .body(Schema::object([("name", Schema::String)], ["name"])),
//!         )
//!         .output(Output::json(Schema::String, 201))
//!         .handler(|req| async move {
//!             let name = req.body.unwrap()["name"].clone();
//!             HttpResponse::created().with_json(&name)
//!         }),
//! );
//!
//! # tokio_test::block_on(async {
//! let response = Dispatcher::new()
//!     .dispatch(&route, HttpRequest::new("POST", "/users")
//!         .with_json(&serde_json::json!({"name": "ada"}))
//!         .unwrap())
//!     .await;
//! assert_eq!(response.status, 201);
//! # });
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod method;
pub mod route;
pub mod validate;

pub use config::*;
pub use dispatch::*;
pub use error::*;
pub use http::*;
pub use method::*;
pub use route::*;
pub use validate::*;
