//! Workflow action generation
//!
//! The model decides between producing an action object and answering
//! conversationally; the reply shape tells which one happened.

use crate::client::{ChatMessage, LLMClient};
use crate::error::{LLMError, Result};
use crate::generator::config::GeneratorConfig;
use crate::generator::json_extractor::extract_json_object;
use crate::generator::prompt_templates::{fill_template, ACTION_PROMPT, ACTION_SYSTEM};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Fields an action object must carry
pub const REQUIRED_ACTION_FIELDS: [&str; 5] =
    ["action_id", "action_type", "display_name", "link_name", "type"];

/// What the model produced for an action request
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A complete action object
    Action(Map<String, Value>),
    /// Conversational text about the service
    Information(String),
}

/// Action generator using LLM
pub struct ActionGenerator {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl ActionGenerator {
    /// Create a new action generator
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Generate an action (or an explanation) for `service_name`
    ///
    /// # Returns
    /// * `Ok(ActionOutcome::Action)` - reply was a JSON object with `action_id`
    /// * `Ok(ActionOutcome::Information)` - any other reply, verbatim
    /// * `Err(LLMError::GenerationFailed)` - an action object lacks required fields
    pub async fn generate(&self, service_name: &str, user_prompt: &str) -> Result<ActionOutcome> {
        let prompt = fill_template(
            ACTION_PROMPT,
            &[("service_name", service_name), ("user_prompt", user_prompt)],
        );

        let request = self.config.request(vec![
            ChatMessage::system(ACTION_SYSTEM),
            ChatMessage::user(prompt),
        ]);

        let response = self.client.call(request).await?;
        classify_reply(response.content)
    }
}

fn classify_reply(text: String) -> Result<ActionOutcome> {
    let object = match extract_json_object(&text) {
        Ok(object) if object.get("action_id").is_some_and(is_truthy) => object,
        _ => return Ok(ActionOutcome::Information(text)),
    };

    let missing: Vec<&str> = REQUIRED_ACTION_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.get(*field).is_some_and(is_truthy))
        .collect();

    if !missing.is_empty() {
        return Err(LLMError::GenerationFailed(format!(
            "Generated action object missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(ActionOutcome::Action(object))
}

/// JSON truthiness: null, false, 0 and "" count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    const ACTION_JSON: &str = r#"```json
{
  "action_id": 2000000187506,
  "action_type": "FETCH",
  "display_name": "Fetch Message",
  "link_name": "fetch_message",
  "type": "FETCH",
  "disabled": false
}
```"#;

    #[tokio::test]
    async fn test_action_object() {
        let provider = Arc::new(MockProvider::with_response(ACTION_JSON.to_string()));
        let generator = ActionGenerator::with_defaults(provider.clone());

        let outcome = generator
            .generate("Slack", "create Fetch Message action")
            .await
            .unwrap();

        match outcome {
            ActionOutcome::Action(action) => {
                assert_eq!(action["display_name"], "Fetch Message");
                assert_eq!(action["action_id"], 2000000187506u64);
            }
            other => panic!("Expected action, got {:?}", other),
        }

        let user = provider.requests()[0].user_text().unwrap();
        assert!(user.starts_with("Service: Slack\nUser Request: create Fetch Message action"));
    }

    #[tokio::test]
    async fn test_information_text() {
        let provider = Arc::new(MockProvider::with_response(
            "Slack is a messaging platform. Would you like to add actions?".to_string(),
        ));
        let generator = ActionGenerator::with_defaults(provider);

        let outcome = generator.generate("Slack", "what is Slack").await.unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Information(
                "Slack is a messaging platform. Would you like to add actions?".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_json_without_action_id_is_information() {
        let provider = Arc::new(MockProvider::with_response(r#"{"note": "hi"}"#.to_string()));
        let generator = ActionGenerator::with_defaults(provider);

        let outcome = generator.generate("Slack", "hello").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Information(ref t) if t == r#"{"note": "hi"}"#));
    }

    #[tokio::test]
    async fn test_missing_required_fields() {
        let provider = Arc::new(MockProvider::with_response(
            r#"{"action_id": 1, "action_type": "SEND", "display_name": ""}"#.to_string(),
        ));
        let generator = ActionGenerator::with_defaults(provider);

        let result = generator.generate("Slack", "add Send Message action").await;
        match result {
            Err(LLMError::GenerationFailed(msg)) => assert_eq!(
                msg,
                "Generated action object missing required fields: display_name, link_name, type"
            ),
            other => panic!("Expected GenerationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!("")));
        assert!(is_truthy(&serde_json::json!("x")));
        assert!(is_truthy(&serde_json::json!([])));
    }
}
