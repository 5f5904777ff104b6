//! Integration tests for REST API endpoints
//!
//! The router is built with a mock gateway and a temporary upload
//! directory, then driven in-process with `oneshot`.

use apiflow_llm::{LLMRequest, MessagePart, MockProvider, MockReply};
use apiflow_server::api::{create_router, AppState};
use apiflow_server::config::ServerConfig;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "apiflow-test-boundary";

struct TestApp {
    router: Router,
    provider: Arc<MockProvider>,
    upload_dir: PathBuf,
    _temp: TempDir,
}

impl TestApp {
    fn new(provider: MockProvider) -> Self {
        Self::with_limit(provider, 20 * 1024 * 1024)
    }

    fn with_limit(provider: MockProvider, max_file_size: usize) -> Self {
        let temp = TempDir::new().unwrap();
        let upload_dir = temp.path().join("uploads");

        let mut config = ServerConfig::default();
        config.upload.dir = upload_dir.clone();
        config.upload.max_file_size = max_file_size;

        let provider = Arc::new(provider);
        let router = create_router(AppState::new(provider.clone(), &config));

        Self {
            router,
            provider,
            upload_dir,
            _temp: temp,
        }
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    async fn post_form(&self, parts: &[FormPart<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate/app")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn staged_files(&self) -> usize {
        count_files(&self.upload_dir)
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

struct FormPart<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> FormPart<'a> {
    fn file(content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            file_name: Some("upload.bin"),
            content_type: Some(content_type),
            data,
        }
    }

    fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, file_name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Enrichment adds a `Biz ` prefix; the use-case summary is fixed
fn workflow_reply(request: &LLMRequest) -> MockReply {
    let system = request.system_text().unwrap_or_default();
    let user = request.user_text().unwrap_or_default();

    if system.contains("use case") {
        return MockReply::text("  Automates order tracking.  ");
    }

    let name = user
        .lines()
        .find_map(|line| line.trim().strip_prefix("- Original Name: "))
        .unwrap_or_default()
        .to_string();
    let key = if user.contains("\"serviceName\"") {
        "serviceName"
    } else {
        "endpointName"
    };
    MockReply::text(json!({ key: format!("Biz {}", name), "description": "Generated." }).to_string())
}

fn sample_collection() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "info": {"name": "Order Service", "description": "Orders"},
        "item": [
            {"name": "List Orders", "request": {"method": "GET", "url": {"raw": "https://api.x/orders"}}},
            {"name": "Create Order", "request": {"method": "POST", "url": "https://api.x/orders"}},
            {"name": "Get Order", "request": {"method": "GET", "url": "https://api.x/orders/1"}}
        ]
    }))
    .unwrap()
}

// ============================================================================
// Health & generation endpoints
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new(MockProvider::new());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_generate_json() {
    let app = TestApp::new(MockProvider::with_response(
        "Here's the code:\n```xml\n<json:object/>\n```".to_string(),
    ));

    let (status, json) = app
        .post_json(
            "/api/generate/json",
            json!({"systemPrompt": "You map JSON", "prompt": "{\"id\": 1}"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "Here's the code:\n```xml\n<json:object/>\n```");

    let request = &app.provider.requests()[0];
    assert_eq!(request.system_text().as_deref(), Some("You map JSON"));
    assert!(request
        .user_text()
        .unwrap()
        .starts_with("create json jsob object. "));
}

#[tokio::test]
async fn test_generate_json_missing_prompt() {
    let app = TestApp::new(MockProvider::new());

    let (status, json) = app
        .post_json("/api/generate/json", json!({"systemPrompt": "x"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON data"));
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let app = TestApp::new(MockProvider::failing("quota exceeded"));

    let (status, json) = app
        .post_json("/api/deluge", json!({"prompt": "send an email"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_rewrite() {
    let app = TestApp::new(MockProvider::with_response("return a + b;".to_string()));

    let (status, json) = app
        .post_json(
            "/api/rewrite",
            json!({"code": "int add(int a, int b) {", "instructions": "}", "language": "C"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], "return a + b;");

    let request = &app.provider.requests()[0];
    assert!(request
        .system_text()
        .unwrap()
        .starts_with("You are a C programmer that replaces <FILL_ME>"));
    assert_eq!(
        request.user_text().as_deref(),
        Some("int add(int a, int b) {<FILL_ME>}")
    );
}

#[tokio::test]
async fn test_deluge_default_language() {
    let app = TestApp::new(MockProvider::with_response("info \"hi\";".to_string()));

    let (status, json) = app
        .post_json("/api/deluge", json!({"prompt": "say hi"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], "info \"hi\";");
    assert!(app.provider.requests()[0]
        .system_text()
        .unwrap()
        .starts_with("You are a Deluge programming expert."));
}

// ============================================================================
// Action generation
// ============================================================================

#[tokio::test]
async fn test_create_actions_requires_fields() {
    let app = TestApp::new(MockProvider::new());

    let (status, json) = app
        .post_json("/api/create/actions", json!({"serviceName": "Slack"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"success": false, "error": "serviceName and userPrompt are required"})
    );

    let (status, _) = app
        .post_json(
            "/api/create/actions",
            json!({"serviceName": "", "userPrompt": "create action"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_create_actions_action_object() {
    let app = TestApp::new(MockProvider::with_response(
        r#"```json
{"action_id": 2000000187506, "action_type": "FETCH", "display_name": "Fetch Message", "link_name": "fetch_message", "type": "FETCH"}
```"#
            .to_string(),
    ));

    let (status, json) = app
        .post_json(
            "/api/create/actions",
            json!({"serviceName": "Slack", "userPrompt": "create Fetch Message action", "uniqueName": "slack_fetch"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["action"]["link_name"], "fetch_message");
    assert_eq!(json["action"]["uniqueName"], "slack_fetch");
    assert_eq!(
        json["message"],
        "Action 'Fetch Message' created successfully for service 'Slack'"
    );
}

#[tokio::test]
async fn test_create_actions_information() {
    let app = TestApp::new(MockProvider::with_response(
        "Slack is a messaging platform.".to_string(),
    ));

    let (status, json) = app
        .post_json(
            "/api/create/actions",
            json!({"serviceName": "Slack", "userPrompt": "what is Slack"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"success": true, "action": null, "message": "Slack is a messaging platform."})
    );
}

#[tokio::test]
async fn test_create_actions_incomplete_object() {
    let app = TestApp::new(MockProvider::with_response(
        r#"{"action_id": 1, "action_type": "SEND", "display_name": "Send"}"#.to_string(),
    ));

    let (status, json) = app
        .post_json(
            "/api/create/actions",
            json!({"serviceName": "Slack", "userPrompt": "add Send Message action"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"],
        "Generated action object missing required fields: link_name, type"
    );
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_without_file() {
    let app = TestApp::new(MockProvider::new());

    let (status, json) = app
        .post_form(&[FormPart::text("prompt", "summarize")])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"success": false, "error": "No file uploaded"}));
}

#[tokio::test]
async fn test_upload_unsupported_type() {
    let app = TestApp::new(MockProvider::new());

    let (status, json) = app
        .post_form(&[FormPart::file("application/zip", b"PK\x03\x04")])
        .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["error"], "Unsupported file type");
    assert_eq!(app.staged_files(), 0);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = TestApp::with_limit(MockProvider::new(), 16);

    let (status, json) = app
        .post_form(&[FormPart::file("text/plain", b"this is more than sixteen bytes")])
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "File too large");
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_collection() {
    let app = TestApp::new(MockProvider::from_fn(workflow_reply));
    let collection = sample_collection();

    let (status, json) = app
        .post_form(&[FormPart::file("application/json", &collection)])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["serviceName"], "Biz Order Service");
    assert_eq!(json["message"], "Automates order tracking.");

    let data = &json["data"];
    assert_eq!(data["service"]["linkName"], "biz_order_service");
    assert_eq!(data["endpoints"].as_array().unwrap().len(), 2);
    assert_eq!(data["endpoints"][0]["linkName"], "endpoint_1");
    assert_eq!(data["endpoints"][1]["linkName"], "endpoint_3");
    assert_eq!(data["endpoints"][1]["displayName"], "Biz Get Order");
    assert_eq!(data["triggers"][1]["triggerConfig"]["api"], "endpoint_3");
    assert_eq!(data["actions"][1]["resourceName"], "resource_3");
    assert_eq!(data["envVariables"], json!({}));

    // service + two endpoints + use-case summary
    assert_eq!(app.provider.call_count(), 4);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_collection_with_failing_gateway() {
    let app = TestApp::new(MockProvider::failing("gateway timeout"));
    let collection = sample_collection();

    let (status, json) = app
        .post_form(&[FormPart::file("application/json", &collection)])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["serviceName"], "Order Service");
    assert_eq!(json["data"]["endpoints"][0]["displayName"], "List Orders");
    assert_eq!(
        json["message"],
        "This service provides API endpoints for workflow automation."
    );
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_broken_collection() {
    let app = TestApp::new(MockProvider::new());
    let document = serde_json::to_vec(&json!({"info": {"name": "x"}, "item": [null]})).unwrap();

    let (status, json) = app
        .post_form(&[FormPart::file("application/json", &document)])
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to process Postman collection: Invalid collection"));
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_document_analysis() {
    let app = TestApp::new(MockProvider::with_response("A short report.".to_string()));

    let (status, json) = app
        .post_form(&[
            FormPart::file("text/plain", b"quarterly numbers"),
            FormPart::text("prompt", "Summarize this"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "data": "A short report."}));

    let request = &app.provider.requests()[0];
    assert_eq!(request.user_text().as_deref(), Some("Summarize this"));
    let file = request.messages[0]
        .parts
        .iter()
        .find_map(|part| match part {
            MessagePart::File { data, media_type } => Some((data.clone(), media_type.clone())),
            MessagePart::Text(_) => None,
        })
        .unwrap();
    assert_eq!(file.0, b"quarterly numbers".to_vec());
    assert_eq!(file.1, "text/plain");
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_json_that_is_not_a_collection_is_analyzed() {
    let app = TestApp::new(MockProvider::with_response("Looks like config.".to_string()));

    let (status, json) = app
        .post_form(&[FormPart::file("application/json", br#"{"item": {}}"#)])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], "Looks like config.");
    assert_eq!(
        app.provider.requests()[0].user_text().as_deref(),
        Some("Analyze this document and provide insights.")
    );
}

#[tokio::test]
async fn test_upload_media_type_field_used_without_part_type() {
    let app = TestApp::new(MockProvider::with_response("ok".to_string()));

    let parts = [
        FormPart {
            name: "file",
            file_name: Some("photo"),
            content_type: None,
            data: b"\x89PNG",
        },
        FormPart::text("mediaType", "image/png"),
    ];
    let (status, _) = app.post_form(&parts).await;

    assert_eq!(status, StatusCode::OK);
    let request = &app.provider.requests()[0];
    assert!(request.messages[0].parts.iter().any(|part| matches!(
        part,
        MessagePart::File { media_type, .. } if media_type == "image/png"
    )));
}
