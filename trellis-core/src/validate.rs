// Request matching and validation
//
// Check order is fixed: method existence, content type, body, query.
// Each failure short-circuits; later checks never run.

use crate::{HttpRequest, Method, RequestError, RouteDefinition, ValidatedRequest};
use serde_json::{Map, Value};
use trellis_schema::SchemaValidator;

/// Match a request against a route definition and validate its declared
/// inputs, producing the context handed to middleware and handlers.
pub fn validate_request(
    definition: &RouteDefinition,
    validator: &dyn SchemaValidator,
    request: HttpRequest,
) -> Result<(ValidatedRequest, Method), RequestError> {
    let method = Method::from_str(&request.method).ok_or_else(|| undeclared(definition))?;
    let operation = definition
        .operation(method)
        .ok_or_else(|| undeclared(definition))?;

    let mut validated = ValidatedRequest::new(request);

    if let Some(input) = &operation.input {
        if let Some(declared) = &input.content_type {
            let actual = validated.request.content_type().unwrap_or("");
            if !media_type_matches(declared, actual) {
                return Err(RequestError::UnsupportedMediaType);
            }
        }

        if let Some(schema) = &input.body {
            let raw: Value = serde_json::from_slice(&validated.request.body)
                .map_err(|e| RequestError::InvalidBody(format!("Invalid request body: {e}")))?;
            let parsed = validator.parse(schema, &raw).map_err(|issues| {
                RequestError::InvalidBody(format!(
                    "Invalid request body: {}",
                    first_message(&issues)
                ))
            })?;
            validated.body = Some(parsed);
        }

        if let Some(schema) = &input.query {
            let raw = query_object(&validated.request);
            let parsed = validator.parse(schema, &raw).map_err(|issues| {
                RequestError::InvalidQuery(format!(
                    "Invalid query parameters: {}",
                    first_message(&issues)
                ))
            })?;
            validated.query = Some(parsed);
        }
    }

    Ok((validated, method))
}

fn undeclared(definition: &RouteDefinition) -> RequestError {
    if definition.is_catch_all() {
        RequestError::NotFound
    } else {
        RequestError::MethodNotAllowed {
            allowed: definition.methods(),
        }
    }
}

fn first_message(issues: &[trellis_schema::SchemaIssue]) -> &str {
    issues.first().map(|i| i.message.as_str()).unwrap_or("invalid")
}

/// Query parameters as a JSON object. A singly-occurring key maps to a
/// string, a repeated key to an array of strings. Values are not coerced;
/// whether `"42"` satisfies a number schema is the validator's call.
fn query_object(request: &HttpRequest) -> Value {
    let fields: Map<String, Value> = request
        .query_params
        .iter()
        .map(|(k, values)| {
            let value = match values.as_slice() {
                [single] => Value::String(single.clone()),
                many => Value::Array(
                    many.iter().cloned().map(Value::String).collect(),
                ),
            };
            (k.clone(), value)
        })
        .collect();
    Value::Object(fields)
}

/// Media-type comparison: exact match, match ignoring a trailing
/// `;`-parameter list (`application/json; charset=utf-8`), or prefix match
/// for multipart types whose boundary parameter varies per request.
pub fn media_type_matches(declared: &str, actual: &str) -> bool {
    let declared = declared.trim();
    let actual_base = actual.split(';').next().unwrap_or("").trim();
    if actual_base.eq_ignore_ascii_case(declared) {
        return true;
    }
    declared.eq_ignore_ascii_case("multipart/form-data")
        && actual_base
            .to_ascii_lowercase()
            .starts_with("multipart/")
}
