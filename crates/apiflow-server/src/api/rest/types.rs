//! REST API type definitions
//!
//! Request and response types for the REST API endpoints. Field names are
//! camelCase on the wire.

use crate::config::ServerConfig;
use crate::upload::UploadPolicy;
use apiflow_collection::{TransformerConfig, WorkflowDefinition};
use apiflow_llm::{GeneratorConfig, LLMClient};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LLMClient>,
    pub generator: GeneratorConfig,
    pub transformer: TransformerConfig,
    pub upload: UploadPolicy,
}

impl AppState {
    pub fn new(client: Arc<dyn LLMClient>, config: &ServerConfig) -> Self {
        Self {
            client,
            generator: config.llm.generator_config(),
            transformer: config.transformer_config(),
            upload: UploadPolicy::new(&config.upload),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `{success: true, data}` envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// JSON-to-XML mapping request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateJsonRequest {
    #[serde(default)]
    pub system_prompt: Option<String>,
    pub prompt: String,
}

/// Code completion request
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub code: String,
    pub instructions: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Script generation request
#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub prompt: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Action generation request
///
/// Both required fields are optional here so that their absence produces
/// the dedicated validation message rather than a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionRequest {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub unique_name: Option<Value>,
}

/// Action generation result; `action` is null for informational replies
#[derive(Debug, Serialize)]
pub struct CreateActionResponse {
    pub success: bool,
    pub action: Option<Map<String, Value>>,
    pub message: String,
}

/// Collection upload result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAppResponse {
    pub success: bool,
    pub data: WorkflowDefinition,
    pub service_name: String,
    pub message: String,
}
