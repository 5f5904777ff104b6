//! JSON extraction utilities for cleaning LLM responses

use crate::error::{LLMError, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```json\s*|\s*```").expect("fence pattern is valid"))
}

/// Remove ```` ```json ```` openers and ```` ``` ```` closers, then trim
pub fn strip_code_fences(llm_output: &str) -> String {
    fence_pattern().replace_all(llm_output, "").trim().to_string()
}

/// Extracts a JSON object from LLM response
///
/// Only fence stripping is attempted; no partial or lenient parsing.
///
/// # Arguments
/// * `llm_output` - Raw output from LLM
///
/// # Returns
/// * `Ok(Map)` - The parsed object
/// * `Err(LLMError::InvalidResponse)` - Empty output, invalid JSON, or a
///   JSON value that is not an object
pub fn extract_json_object(llm_output: &str) -> Result<Map<String, Value>> {
    let cleaned = strip_code_fences(llm_output);

    if cleaned.is_empty() {
        return Err(LLMError::InvalidResponse("Empty JSON content".to_string()));
    }

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(LLMError::InvalidResponse(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(LLMError::InvalidResponse(format!("Invalid JSON: {}", e))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let input = r#"{"endpointName": "Get User Profile", "description": "Fetches a profile."}"#;

        let map = extract_json_object(input).unwrap();
        assert_eq!(map["endpointName"], "Get User Profile");
        assert_eq!(map["description"], "Fetches a profile.");
    }

    #[test]
    fn test_extract_from_json_fence() {
        let input = "```json\n{\n  \"serviceName\": \"Trading Platform API\",\n  \"description\": \"Trade stocks.\"\n}\n```";

        let map = extract_json_object(input).unwrap();
        assert_eq!(map["serviceName"], "Trading Platform API");
    }

    #[test]
    fn test_extract_from_bare_fence() {
        let input = "```\n{\"a\": 1}\n```";

        let map = extract_json_object(input).unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_surrounding_whitespace() {
        let map = extract_json_object("   \n {\"a\": true} \n\n").unwrap();
        assert_eq!(map["a"], true);
    }

    #[test]
    fn test_prose_is_rejected() {
        let input = "Sure! Here is the name you asked for: Get User Profile";
        let result = extract_json_object(input);

        assert!(matches!(result, Err(LLMError::InvalidResponse(_))));
    }

    #[test]
    fn test_prose_around_json_is_not_salvaged() {
        let input = "Here you go: {\"a\": 1}";
        assert!(extract_json_object(input).is_err());
    }

    #[test]
    fn test_array_is_rejected() {
        let result = extract_json_object("[1, 2, 3]");
        match result {
            Err(LLMError::InvalidResponse(msg)) => assert!(msg.contains("an array")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content_error() {
        assert!(extract_json_object("```json\n```").is_err());
        assert!(extract_json_object("   ").is_err());
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json {\"x\":1} ```"), "{\"x\":1}");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }
}
