//! Schema descriptions and validation for Trellis
//!
//! Route declarations carry [`Schema`] values describing their request
//! bodies, query parameters, and documented responses. The same value is
//! used two ways: the [`SchemaValidator`] adapter checks incoming data
//! against it at runtime, and [`Schema::to_json_schema`] converts it into
//! a JSON-Schema-compatible object for OpenAPI generation.
//!
//! Validation is pluggable: the core only depends on the
//! [`SchemaValidator`] trait. The built-in [`StructuralValidator`] performs
//! structural (non-coercing) checks and reports issues in the
//! `Expected {type}, received {type}` form.
//!
//! # Examples
//!
//! ```
//! use trellis_schema::{Schema, SchemaValidator, StructuralValidator};
//! use serde_json::json;
//!
//! let schema = Schema::object([("foo", Schema::Number)], ["foo"]);
//! let validator = StructuralValidator;
//!
//! assert!(validator.parse(&schema, &json!({"foo": 1.5})).is_ok());
//!
//! let issues = validator.parse(&schema, &json!({"foo": "bar"})).unwrap_err();
//! assert_eq!(issues[0].message, "Expected number, received string");
//! assert_eq!(issues[0].path, vec!["foo".to_string()]);
//! ```

mod schema;
mod validate;

pub use schema::*;
pub use validate::*;
