// HTTP request and response types
//
// The transport boundary: the host framework hands over a request in this
// shape and receives a response back. Trellis never opens sockets or
// parses raw HTTP.

use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP request wrapper
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub path_params: BTreeMap<String, String>,
    /// Query parameters; repeated keys keep every value in arrival order.
    pub query_params: BTreeMap<String, Vec<String>>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            path_params: BTreeMap::new(),
            query_params: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// JSON body shortcut; also sets the content-type header.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body = serde_json::to_vec(value)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("content-type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Append a query parameter. Repeating a key accumulates values.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Header lookup, case-insensitive on the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The content-type header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get a path parameter by name
    pub fn param(&self, name: &str) -> Option<&String> {
        self.path_params.get(name)
    }

    /// Get the first value of a query parameter by name
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value of a query parameter, in arrival order.
    pub fn query_all(&self, name: &str) -> &[String] {
        self.query_params
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// HTTP response wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn created() -> Self {
        Self::new(201)
    }

    pub fn no_content() -> Self {
        Self::new(204)
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body = text.into().into_bytes();
        self
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body = serde_json::to_vec(value)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("content-type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Header lookup, case-insensitive on the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_lookup_is_case_insensitive() {
        let req = HttpRequest::new("GET", "/x").with_header("Content-Type", "application/json");
        assert_eq!(req.content_type(), Some("application/json"));
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new("POST", "/x")
            .with_json(&json!({"a": 1}))
            .unwrap();
        assert_eq!(req.content_type(), Some("application/json"));
        assert_eq!(req.body, br#"{"a":1}"#);
    }

    #[test]
    fn response_json_helper() {
        let resp = HttpResponse::ok().with_json(&json!({"ok": true})).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn query_param_access() {
        let req = HttpRequest::new("GET", "/x").with_query("foo", "bar");
        assert_eq!(req.query("foo"), Some("bar"));
        assert_eq!(req.query("baz"), None);
    }

    #[test]
    fn repeated_query_keys_keep_all_values() {
        let req = HttpRequest::new("GET", "/x")
            .with_query("tag", "a")
            .with_query("tag", "b");
        assert_eq!(req.query("tag"), Some("a"));
        assert_eq!(req.query_all("tag"), ["a", "b"]);
        assert_eq!(req.query_all("missing"), Vec::<String>::new());
    }
}
