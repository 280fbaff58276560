//! Spec synthesis from route definitions

use crate::merge::{deep_merge, empty_object, merge_path_items};
use crate::spec::{
    Info, MediaTypeObject, OpenApiSpec, Operation, Parameter, ParameterLocation, RequestBody,
    ResponseObject,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use trellis_core::RouteDefinition;
use trellis_schema::Schema;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Build the OpenAPI document for a set of registered routes.
///
/// Deterministic: the same routes and overrides always produce a
/// structurally identical document, with sorted keys throughout.
pub fn build_spec(
    routes: &[(String, RouteDefinition)],
    info: &Info,
    overrides: Option<&Value>,
) -> OpenApiSpec {
    let overrides = overrides.cloned().unwrap_or_else(empty_object);

    let mut info_value = serde_json::to_value(info).unwrap_or_else(|_| empty_object());
    if let Some(info_override) = overrides.get("info") {
        info_value = deep_merge(info_value, info_override);
    }

    let mut spec = OpenApiSpec::new(info_value);
    if let Some(components) = overrides.get("components") {
        spec.components = components.clone();
    }

    for (path, definition) in routes {
        let normalized = normalize_path(path);
        let item = build_path_item(&normalized, definition);
        let merged = match spec.paths.remove(&normalized) {
            Some(existing) => merge_path_items(existing, &item),
            None => item,
        };
        spec.paths.insert(normalized, merged);
    }

    if let Some(Value::Object(path_overrides)) = overrides.get("paths") {
        for (path, item_override) in path_overrides {
            let merged = match spec.paths.remove(path) {
                Some(existing) => merge_path_items(existing, item_override),
                None => item_override.clone(),
            };
            spec.paths.insert(path.clone(), merged);
        }
    }

    spec
}

fn build_path_item(path: &str, definition: &RouteDefinition) -> Value {
    let params = path_parameters(path);

    let mut item = Map::new();
    for method in definition.methods() {
        let Some(operation) = definition.operation(method) else {
            continue;
        };
        let mut inferred = synthesize_operation(operation);

        let override_params = operation
            .openapi_operation
            .as_ref()
            .map(declared_parameter_names)
            .unwrap_or_default();
        for param in &params {
            let declared = override_params.contains(param)
                || inferred.parameters.iter().any(|p| &p.name == param);
            if !declared {
                inferred.parameters.push(Parameter {
                    name: param.clone(),
                    location: ParameterLocation::Path,
                    required: true,
                    schema: Schema::String.to_json_schema(),
                });
            }
        }

        let mut value = serde_json::to_value(&inferred).unwrap_or_else(|_| empty_object());
        if let Some(op_override) = &operation.openapi_operation {
            value = deep_merge(value, op_override);
        }
        item.insert(method.as_lower().to_string(), value);
    }

    let mut item = Value::Object(item);
    if let Some(path_override) = &definition.openapi_path {
        item = merge_path_items(item, path_override);
    }
    item
}

fn synthesize_operation(operation: &trellis_core::Operation) -> Operation {
    let mut inferred = Operation::default();

    if let Some(input) = &operation.input {
        if let Some(body) = &input.body {
            let content_type = input
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let mut content = BTreeMap::new();
            content.insert(
                content_type,
                MediaTypeObject {
                    schema: body.to_json_schema(),
                },
            );
            inferred.request_body = Some(RequestBody { content });
        }

        if let Some(Schema::Object {
            properties,
            required,
        }) = &input.query
        {
            for (name, schema) in properties {
                inferred.parameters.push(Parameter {
                    name: name.clone(),
                    location: ParameterLocation::Query,
                    required: required.contains(name),
                    schema: schema.to_json_schema(),
                });
            }
        }
    }

    for output in &operation.outputs {
        let response = inferred
            .responses
            .entry(output.status.to_string())
            .or_insert_with(|| ResponseObject {
                description: "Response".to_string(),
                content: BTreeMap::new(),
            });
        response.content.insert(
            output.content_type.clone(),
            MediaTypeObject {
                schema: output.schema.to_json_schema(),
            },
        );
    }

    inferred
}

/// Normalize `[param]` and `:param` segments to OpenAPI `{param}` syntax.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| {
            if let Some(inner) = segment
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
            {
                format!("{{{inner}}}")
            } else if let Some(inner) = segment.strip_prefix(':') {
                format!("{{{inner}}}")
            } else {
                segment.to_string()
            }
        })
        .collect();
    segments.join("/")
}

/// Parameter names embedded in a normalized path.
fn path_parameters(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .map(str::to_string)
        })
        .collect()
}

fn declared_parameter_names(operation_override: &Value) -> Vec<String> {
    operation_override
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| p.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_core::{HttpResponse, Input, Operation as RouteOperation, Output};

    fn user_route() -> RouteDefinition {
        RouteDefinition::new()
            .get(
                RouteOperation::builder()
                    .input(Input::new().query(Schema::object(
                        [("limit", Schema::String)],
                        Vec::<String>::new(),
                    )))
                    .output(Output::json(
                        Schema::array(Schema::object([("name", Schema::String)], ["name"])),
                        200,
                    ))
                    .handler(|_req| async { Ok(HttpResponse::ok()) }),
            )
            .post(
                RouteOperation::builder()
                    .input(
                        Input::new()
                            .content_type("application/json")
                            .body(Schema::object([("name", Schema::String)], ["name"])),
                    )
                    .output(Output::json(Schema::object([("id", Schema::Integer)], ["id"]), 201))
                    .handler(|_req| async { Ok(HttpResponse::created()) }),
            )
    }

    #[test]
    fn normalizes_bracket_and_colon_params() {
        assert_eq!(normalize_path("/users/[id]"), "/users/{id}");
        assert_eq!(normalize_path("/users/:id/posts/:post"), "/users/{id}/posts/{post}");
        assert_eq!(normalize_path("/plain"), "/plain");
    }

    #[test]
    fn synthesizes_request_body_and_responses() {
        let routes = vec![("/users".to_string(), user_route())];
        let spec = build_spec(&routes, &Info::new("T", "1"), None);
        let post = &spec.paths["/users"]["post"];
        assert_eq!(
            post["requestBody"]["content"]["application/json"]["schema"]["type"],
            "object"
        );
        assert_eq!(
            post["responses"]["201"]["content"]["application/json"]["schema"]["required"],
            json!(["id"])
        );
    }

    #[test]
    fn query_properties_become_parameters() {
        let routes = vec![("/users".to_string(), user_route())];
        let spec = build_spec(&routes, &Info::new("T", "1"), None);
        let params = spec.paths["/users"]["get"]["parameters"].as_array().unwrap();
        assert_eq!(params[0]["name"], "limit");
        assert_eq!(params[0]["in"], "query");
        assert_eq!(params[0]["required"], false);
    }

    #[test]
    fn body_without_content_type_defaults_to_json() {
        let def = RouteDefinition::new().post(
            RouteOperation::builder()
                .input(Input::new().body(Schema::Any))
                .handler(|_req| async { Ok(HttpResponse::ok()) }),
        );
        let spec = build_spec(&[("/x".to_string(), def)], &Info::default(), None);
        assert!(spec.paths["/x"]["post"]["requestBody"]["content"]
            .get("application/json")
            .is_some());
    }

    #[test]
    fn path_params_are_required_strings() {
        let def = RouteDefinition::new().get(
            RouteOperation::builder().handler(|_req| async { Ok(HttpResponse::ok()) }),
        );
        let spec = build_spec(&[("/users/[id]".to_string(), def)], &Info::default(), None);
        let params = spec.paths["/users/{id}"]["get"]["parameters"].as_array().unwrap();
        assert_eq!(
            params[0],
            json!({"name": "id", "in": "path", "required": true, "schema": {"type": "string"}})
        );
    }

    #[test]
    fn override_declared_path_param_is_not_duplicated() {
        let def = RouteDefinition::new().get(
            RouteOperation::builder()
                .openapi(json!({
                    "parameters": [{"name": "id", "in": "path", "required": true,
                                    "schema": {"type": "integer"}}]
                }))
                .handler(|_req| async { Ok(HttpResponse::ok()) }),
        );
        let spec = build_spec(&[("/users/[id]".to_string(), def)], &Info::default(), None);
        let params = spec.paths["/users/{id}"]["get"]["parameters"].as_array().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0]["schema"]["type"], "integer");
    }

    #[test]
    fn operation_override_deep_merges_over_inferred() {
        let def = RouteDefinition::new().get(
            RouteOperation::builder()
                .output(Output::json(Schema::String, 200))
                .openapi(json!({"summary": "List things", "responses": {"200": {"description": "OK"}}}))
                .handler(|_req| async { Ok(HttpResponse::ok()) }),
        );
        let spec = build_spec(&[("/things".to_string(), def)], &Info::default(), None);
        let get = &spec.paths["/things"]["get"];
        assert_eq!(get["summary"], "List things");
        // Override wins on the description, inferred content is preserved.
        assert_eq!(get["responses"]["200"]["description"], "OK");
        assert!(get["responses"]["200"]["content"]["application/json"].is_object());
    }

    #[test]
    fn methods_appear_in_canonical_order() {
        let routes = vec![("/users".to_string(), user_route())];
        let spec = build_spec(&routes, &Info::default(), None);
        let keys: Vec<&String> = spec.paths["/users"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["get", "post"]);
    }

    #[test]
    fn info_override_merges() {
        let overrides = json!({"info": {"title": "Custom", "contact": {"name": "ops"}}});
        let spec = build_spec(&[], &Info::new("Base", "2.0"), Some(&overrides));
        assert_eq!(spec.info["title"], "Custom");
        assert_eq!(spec.info["version"], "2.0");
        assert_eq!(spec.info["contact"]["name"], "ops");
    }

    #[test]
    fn path_overrides_merge_by_method() {
        let routes = vec![("/users".to_string(), user_route())];
        let overrides = json!({"paths": {"/users": {"delete": {"responses": {}}},
                                          "/extra": {"get": {"responses": {}}}}});
        let spec = build_spec(&routes, &Info::default(), Some(&overrides));
        assert!(spec.paths["/users"].get("get").is_some());
        assert!(spec.paths["/users"].get("delete").is_some());
        assert!(spec.paths.contains_key("/extra"));
    }

    #[test]
    fn same_generation_twice_is_byte_identical() {
        let routes = vec![("/users/[id]".to_string(), user_route())];
        let overrides = json!({"info": {"title": "X"}});
        let a = build_spec(&routes, &Info::default(), Some(&overrides));
        let b = build_spec(&routes, &Info::default(), Some(&overrides));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn route_path_override_applies() {
        let def = user_route().openapi_path(json!({"description": "user collection"}));
        let spec = build_spec(&[("/users".to_string(), def)], &Info::default(), None);
        assert_eq!(spec.paths["/users"]["description"], "user collection");
    }
}
