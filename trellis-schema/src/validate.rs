//! The validation adapter and the built-in structural validator

use crate::schema::{json_type_name, Schema};
use serde_json::{Map, Value};

/// A single validation failure, with the path to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub message: String,
    pub path: Vec<String>,
}

impl SchemaIssue {
    pub fn new(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

/// Result of parsing a value against a schema: the accepted value, or the
/// full list of issues found.
pub type ParseOutcome = Result<Value, Vec<SchemaIssue>>;

/// The pluggable schema-validation capability.
///
/// Trellis depends only on this contract; any schema library can sit
/// behind it. Implementations return the parsed value on success so they
/// may filter or transform the input (the built-in validator drops
/// undeclared object keys).
pub trait SchemaValidator: Send + Sync {
    fn parse(&self, schema: &Schema, value: &Value) -> ParseOutcome;
}

/// Built-in structural validator.
///
/// Checks shape only, without coercion: a `Number` schema rejects the
/// string `"42"`. Type mismatches report
/// `Expected {expected}, received {actual}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl SchemaValidator for StructuralValidator {
    fn parse(&self, schema: &Schema, value: &Value) -> ParseOutcome {
        let mut issues = Vec::new();
        let parsed = check(schema, value, &mut Vec::new(), &mut issues);
        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(issues)
        }
    }
}

fn mismatch(schema: &Schema, value: &Value, path: &[String]) -> SchemaIssue {
    SchemaIssue::new(
        format!(
            "Expected {}, received {}",
            schema.type_name(),
            json_type_name(value)
        ),
        path.to_vec(),
    )
}

fn check(
    schema: &Schema,
    value: &Value,
    path: &mut Vec<String>,
    issues: &mut Vec<SchemaIssue>,
) -> Value {
    match schema {
        Schema::Any => value.clone(),
        Schema::String if value.is_string() => value.clone(),
        Schema::Number if value.is_number() => value.clone(),
        Schema::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => value.clone(),
            Value::Number(_) => {
                issues.push(SchemaIssue::new(
                    "Expected integer, received number",
                    path.clone(),
                ));
                Value::Null
            }
            _ => {
                issues.push(mismatch(schema, value, path));
                Value::Null
            }
        },
        Schema::Boolean if value.is_boolean() => value.clone(),
        Schema::Null if value.is_null() => Value::Null,
        Schema::Array { items } => match value {
            Value::Array(elements) => {
                let mut out = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(index.to_string());
                    out.push(check(items, element, path, issues));
                    path.pop();
                }
                Value::Array(out)
            }
            _ => {
                issues.push(mismatch(schema, value, path));
                Value::Null
            }
        },
        Schema::Object {
            properties,
            required,
        } => match value {
            Value::Object(fields) => {
                let mut out = Map::new();
                for (name, property) in properties {
                    match fields.get(name) {
                        Some(field) => {
                            path.push(name.clone());
                            let parsed = check(property, field, path, issues);
                            path.pop();
                            out.insert(name.clone(), parsed);
                        }
                        None if required.contains(name) => {
                            let mut field_path = path.clone();
                            field_path.push(name.clone());
                            issues.push(SchemaIssue::new("Required", field_path));
                        }
                        None => {}
                    }
                }
                Value::Object(out)
            }
            _ => {
                issues.push(mismatch(schema, value, path));
                Value::Null
            }
        },
        Schema::Enum { values } => {
            if values.contains(value) {
                value.clone()
            } else {
                issues.push(SchemaIssue::new("Invalid enum value", path.clone()));
                Value::Null
            }
        }
        _ => {
            issues.push(mismatch(schema, value, path));
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(schema: &Schema, value: Value) -> ParseOutcome {
        StructuralValidator.parse(schema, &value)
    }

    #[test]
    fn accepts_matching_scalars() {
        assert_eq!(parse(&Schema::String, json!("x")), Ok(json!("x")));
        assert_eq!(parse(&Schema::Number, json!(1.5)), Ok(json!(1.5)));
        assert_eq!(parse(&Schema::Integer, json!(3)), Ok(json!(3)));
        assert_eq!(parse(&Schema::Boolean, json!(true)), Ok(json!(true)));
        assert_eq!(parse(&Schema::Null, Value::Null), Ok(Value::Null));
    }

    #[test]
    fn number_rejects_string_with_expected_received_message() {
        let issues = parse(&Schema::Number, json!("bar")).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Expected number, received string");
    }

    #[test]
    fn does_not_coerce_numeric_strings() {
        assert!(parse(&Schema::Number, json!("42")).is_err());
    }

    #[test]
    fn integer_rejects_fractional_number() {
        let issues = parse(&Schema::Integer, json!(1.5)).unwrap_err();
        assert_eq!(issues[0].message, "Expected integer, received number");
    }

    #[test]
    fn object_reports_path_to_failing_field() {
        let schema = Schema::object([("foo", Schema::Number)], ["foo"]);
        let issues = parse(&schema, json!({"foo": "bar"})).unwrap_err();
        assert_eq!(issues[0].path, vec!["foo".to_string()]);
        assert_eq!(issues[0].message, "Expected number, received string");
    }

    #[test]
    fn object_missing_required_field() {
        let schema = Schema::object([("foo", Schema::Number)], ["foo"]);
        let issues = parse(&schema, json!({})).unwrap_err();
        assert_eq!(issues[0].message, "Required");
        assert_eq!(issues[0].path, vec!["foo".to_string()]);
    }

    #[test]
    fn object_optional_field_may_be_absent() {
        let schema = Schema::object([("foo", Schema::Number)], Vec::<String>::new());
        assert_eq!(parse(&schema, json!({})), Ok(json!({})));
    }

    #[test]
    fn object_drops_undeclared_keys() {
        let schema = Schema::object([("foo", Schema::Number)], ["foo"]);
        let parsed = parse(&schema, json!({"foo": 1, "extra": true})).unwrap();
        assert_eq!(parsed, json!({"foo": 1}));
    }

    #[test]
    fn array_reports_index_path() {
        let schema = Schema::array(Schema::Number);
        let issues = parse(&schema, json!([1, "x", 3])).unwrap_err();
        assert_eq!(issues[0].path, vec!["1".to_string()]);
    }

    #[test]
    fn nested_object_path() {
        let schema = Schema::object(
            [("outer", Schema::object([("inner", Schema::String)], ["inner"]))],
            ["outer"],
        );
        let issues = parse(&schema, json!({"outer": {"inner": 7}})).unwrap_err();
        assert_eq!(issues[0].path, vec!["outer".to_string(), "inner".to_string()]);
        assert_eq!(issues[0].message, "Expected string, received number");
    }

    #[test]
    fn collects_multiple_issues() {
        let schema = Schema::object(
            [("a", Schema::Number), ("b", Schema::String)],
            ["a", "b"],
        );
        let issues = parse(&schema, json!({"a": "x", "b": 2})).unwrap_err();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn enum_accepts_member_rejects_other() {
        let schema = Schema::one_of([json!("a"), json!("b")]);
        assert!(parse(&schema, json!("a")).is_ok());
        let issues = parse(&schema, json!("c")).unwrap_err();
        assert_eq!(issues[0].message, "Invalid enum value");
    }

    #[test]
    fn any_accepts_everything() {
        assert!(parse(&Schema::Any, json!({"x": [1, "y"]})).is_ok());
    }
}
