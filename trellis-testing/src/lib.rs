//! Testing utilities for Trellis
//!
//! [`TestClient`] drives a [`DocsRouter`] in-process, without any network
//! transport, so route declarations and the generated documentation can
//! be asserted on directly.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use trellis_core::{HttpRequest, HttpResponse};
use trellis_openapi::DocsRouter;

/// Test HTTP client for making requests to a router
pub struct TestClient {
    router: Arc<DocsRouter>,
}

impl TestClient {
    pub fn new(router: DocsRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> HttpResponse {
        self.send(HttpRequest::new("GET", path)).await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> HttpResponse {
        let request = HttpRequest::new("POST", path)
            .with_json(body)
            .expect("serializable test body");
        self.send(request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> HttpResponse {
        let request = HttpRequest::new("PUT", path)
            .with_json(body)
            .expect("serializable test body");
        self.send(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> HttpResponse {
        self.send(HttpRequest::new("DELETE", path)).await
    }

    /// Make a request with full control over the transport shape
    pub async fn send(&self, request: HttpRequest) -> HttpResponse {
        self.router.handle(request).await
    }

    pub fn router(&self) -> Arc<DocsRouter> {
        self.router.clone()
    }
}

/// Decode a JSON response body for assertions.
pub fn body_json(response: &HttpResponse) -> Value {
    serde_json::from_slice(&response.body).expect("response body is JSON")
}

/// Assert a `{ "message": … }` body.
pub fn assert_message(response: &HttpResponse, expected: &str) {
    assert_eq!(
        body_json(response),
        serde_json::json!({ "message": expected }),
        "unexpected message body (status {})",
        response.status
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_core::{Input, Operation, RouteDefinition};
    use trellis_openapi::MemorySpecStore;
    use trellis_schema::Schema;

    fn client() -> TestClient {
        let router = DocsRouter::new()
            .store(Arc::new(MemorySpecStore::new()))
            .route(
                "/echo",
                RouteDefinition::new().post(
                    Operation::builder()
                        .input(
                            Input::new()
                                .content_type("application/json")
                                .body(Schema::object([("msg", Schema::String)], ["msg"])),
                        )
                        .handler(|req| async move {
                            HttpResponse::ok().with_json(&req.body)
                        }),
                ),
            );
        TestClient::new(router)
    }

    #[tokio::test]
    async fn posts_json_and_reads_body() {
        let response = client().post_json("/echo", &json!({"msg": "hi"})).await;
        assert_eq!(response.status, 200);
        assert_eq!(body_json(&response), json!({"msg": "hi"}));
    }

    #[tokio::test]
    async fn message_assertion_helper() {
        let response = client().get("/nowhere").await;
        assert_eq!(response.status, 404);
        assert_message(&response, "Not found.");
    }
}
