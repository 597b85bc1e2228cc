use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqchain_exec::{
    execute_template, FailureReason, RequestState, Transport, TransportError, TransportRequest,
    TransportResponse,
};
use reqchain_core::{ReferenceError, RequestTemplate, ResponseStore};
use serde_json::json;

struct MockTransport {
    responses: HashMap<String, Result<TransportResponse, TransportError>>,
    calls: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    fn fail(mut self, url: &str, error: TransportError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.responses.get(&request.url) {
            Some(result) => result.clone(),
            None => Err(TransportError::Network(format!(
                "no scripted response for {}",
                request.url
            ))),
        }
    }
}

fn template(id: &str, method: &str, url: &str) -> RequestTemplate {
    RequestTemplate {
        id: id.to_string(),
        method: method.to_string(),
        url: url.to_string(),
        headers: IndexMap::new(),
        body: None,
    }
}

#[tokio::test]
async fn successful_json_response_populates_the_store() {
    let transport = MockTransport::new().respond("https://api.test/login", 200, r#"{"token":"t1"}"#);
    let mut store = ResponseStore::new();

    let result = execute_template(
        &template("login", "POST", "https://api.test/login"),
        "",
        false,
        &transport,
        &mut store,
    )
    .await;

    assert_eq!(result.state, RequestState::Executed);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.body, r#"{"token":"t1"}"#);
    assert_eq!(store.get("login"), Some(&json!({"token": "t1"})));
}

#[tokio::test]
async fn non_json_success_body_executes_without_store_entry() {
    let transport = MockTransport::new().respond("https://api.test/health", 200, "OK");
    let mut store = ResponseStore::new();

    let result = execute_template(
        &template("health", "GET", "https://api.test/health"),
        "",
        false,
        &transport,
        &mut store,
    )
    .await;

    assert!(result.is_executed());
    assert!(!store.contains("health"));
}

#[tokio::test]
async fn error_status_records_body_but_not_store() {
    let transport =
        MockTransport::new().respond("https://api.test/x", 404, r#"{"error":"missing"}"#);
    let mut store = ResponseStore::new();

    let result = execute_template(
        &template("x", "GET", "https://api.test/x"),
        "",
        false,
        &transport,
        &mut store,
    )
    .await;

    assert_eq!(
        result.failure(),
        Some(&FailureReason::HttpStatus(404))
    );
    assert_eq!(result.status_code, Some(404));
    assert_eq!(result.body, r#"{"error":"missing"}"#);
    assert!(!store.contains("x"));
}

#[tokio::test]
async fn transport_failure_leaves_empty_body_and_store() {
    let transport = MockTransport::new().fail(
        "https://api.test/x",
        TransportError::Network("connection refused".to_string()),
    );
    let mut store = ResponseStore::new();

    let result = execute_template(
        &template("x", "GET", "https://api.test/x"),
        "",
        false,
        &transport,
        &mut store,
    )
    .await;

    assert!(matches!(
        result.failure(),
        Some(FailureReason::Transport(TransportError::Network(_)))
    ));
    assert_eq!(result.status_code, None);
    assert_eq!(result.body, "");
    assert!(store.is_empty());
}

#[tokio::test]
async fn reference_failure_short_circuits_before_the_network() {
    let transport = MockTransport::new();
    let mut store = ResponseStore::new();

    let result = execute_template(
        &template("b", "GET", "https://api.test/{{a.response.id}}"),
        "",
        false,
        &transport,
        &mut store,
    )
    .await;

    assert!(matches!(
        result.failure(),
        Some(FailureReason::Reference(ReferenceError::Unresolved { .. }))
    ));
    assert_eq!(result.status_code, None);
    assert_eq!(result.body, "");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn relative_urls_are_joined_onto_the_base_url() {
    let transport = MockTransport::new().respond("https://api.test/users/1", 200, "{}");
    let mut store = ResponseStore::new();

    execute_template(
        &template("u", "GET", "/users/1"),
        "https://api.test/",
        false,
        &transport,
        &mut store,
    )
    .await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://api.test/users/1");
}

#[tokio::test]
async fn headers_and_body_are_resolved_before_sending() {
    let transport = MockTransport::new().respond("https://api.test/orders", 201, "{}");
    let mut store = ResponseStore::new();
    store.put("login", json!({"token": "t1", "user": {"id": 7}}));

    let mut headers = IndexMap::new();
    headers.insert(
        "Authorization".to_string(),
        "Bearer {{login.response.token}}".to_string(),
    );
    let t = RequestTemplate {
        id: "order".to_string(),
        method: "POST".to_string(),
        url: "https://api.test/orders".to_string(),
        headers,
        body: Some(r#"{"userId":{{login.response.user.id}}}"#.to_string()),
    };

    execute_template(&t, "", false, &transport, &mut store).await;

    let calls = transport.calls();
    assert_eq!(
        calls[0].headers,
        vec![("Authorization".to_string(), "Bearer t1".to_string())]
    );
    assert_eq!(calls[0].body.as_deref(), Some(r#"{"userId":7}"#));
}

#[tokio::test]
async fn insecure_flag_is_forwarded_to_the_transport() {
    let transport = MockTransport::new().respond("https://api.test/x", 200, "{}");
    let mut store = ResponseStore::new();

    execute_template(
        &template("x", "GET", "https://api.test/x"),
        "",
        true,
        &transport,
        &mut store,
    )
    .await;

    assert!(transport.calls()[0].insecure_tls);
}
