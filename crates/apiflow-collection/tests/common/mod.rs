//! Common test utilities for collection integration tests

use apiflow_collection::SourceCollection;
use apiflow_llm::{LLMRequest, MockProvider, MockReply};
use serde_json::{json, Value};

/// Value following `label` on its own prompt line, e.g. `- Original Name: `
pub fn prompt_field(request: &LLMRequest, label: &str) -> String {
    request
        .user_text()
        .unwrap_or_default()
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .unwrap_or_default()
        .to_string()
}

/// Enrichment reply echoing the source name and description back
pub fn echo_reply(request: &LLMRequest) -> MockReply {
    let user = request.user_text().unwrap_or_default();
    let name = prompt_field(request, "- Original Name: ");
    let description = prompt_field(request, "- Original Description: ");

    let key = if user.contains("\"serviceName\"") {
        "serviceName"
    } else {
        "endpointName"
    };

    MockReply::text(json!({ key: name, "description": description }).to_string())
}

/// Gateway that echoes source values back as enrichment
pub fn echo_provider() -> MockProvider {
    MockProvider::from_fn(echo_reply)
}

/// Gateway that prefixes every name with `Biz ` so enrichment is visible
pub fn business_provider() -> MockProvider {
    MockProvider::from_fn(|request| {
        let user = request.user_text().unwrap_or_default();
        let name = prompt_field(request, "- Original Name: ");
        let key = if user.contains("\"serviceName\"") {
            "serviceName"
        } else {
            "endpointName"
        };
        MockReply::text(format!(
            "```json\n{}\n```",
            json!({ key: format!("Biz {}", name), "description": format!("About {}", name) })
        ))
    })
}

pub fn collection(value: Value) -> SourceCollection {
    SourceCollection::from_value(value).expect("test collection should parse")
}

/// Three items: GET, DELETE, lower-case get
pub fn users_and_orders() -> SourceCollection {
    collection(json!({
        "info": {"name": "Shop API", "description": "Users and orders"},
        "item": [
            {"name": "List Users", "request": {"method": "GET", "url": "https://api.x/users"}},
            {"name": "Delete User", "request": {"method": "DELETE", "url": "https://api.x/users/1"}},
            {"name": "Get Order", "request": {"method": "get", "url": "https://api.x/orders/1"}}
        ]
    }))
}
