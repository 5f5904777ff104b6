//! Output schema of the workflow definition
//!
//! Field names and value encodings are the downstream wire contract, so
//! several structs mix camelCase and snake_case keys on purpose.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper-case string booleans used by the workflow schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaFlag {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
}

/// The complete transform output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub endpoints: Vec<EndpointDefinition>,
    pub service: ServiceDescriptor,
    #[serde(rename = "envVariables")]
    pub env_variables: Map<String, Value>,
    pub data_type_validation: u8,
    pub resources: Vec<ResourceDefinition>,
    pub triggers: Vec<TriggerDefinition>,
    pub actions: Vec<ActionDefinition>,
}

impl WorkflowDefinition {
    /// Serialize to a JSON value
    pub fn to_value(&self) -> crate::error::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// An endpoint with its embedded workflow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDefinition {
    pub is_data_handler: SchemaFlag,
    pub endpoint_config: Vec<Value>,
    pub mappedscopes: Vec<Value>,
    pub display_name: String,
    pub support_paging: SchemaFlag,
    pub workflow_config: Value,
    pub description: String,
    pub disabled: SchemaFlag,
    #[serde(rename = "type")]
    pub endpoint_type: u8,
    pub link_name: String,
}

/// Field schema record for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub static_fields: Vec<ResourceStaticField>,
    pub display_name: String,
    pub description: String,
    pub link_name: String,
}

/// One static field of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStaticField {
    pub input_params: InputParams,
    #[serde(rename = "type")]
    pub field_type: u8,
    pub category: u8,
}

/// Input parameters of a resource static field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputParams {
    pub help_text: String,
    pub is_label_field: bool,
    pub name: String,
    pub is_data_type_field: bool,
    #[serde(rename = "zf_has_lists")]
    pub zf_has_lists: bool,
    pub is_id_field: bool,
    pub is_type_field: bool,
    pub label: String,
    pub field_type: u8,
    pub is_mandatory: bool,
    pub place_holder: String,
    pub field_id: u64,
}

/// Polling event definition for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    pub is_deprecated: SchemaFlag,
    pub notes: String,
    pub trigger_static_fields_mapping: Vec<Value>,
    pub trigger_config: TriggerConfig,
    pub display_name: String,
    pub description: String,
    pub resource_name: String,
    #[serde(rename = "type")]
    pub trigger_type: u8,
    pub link_name: String,
    pub is_data_type_enabled: SchemaFlag,
    pub trigger_sub_res_field_mapping: Map<String, Value>,
    pub trigger_static_fields: Vec<Value>,
    pub document_link: String,
    pub disabled: SchemaFlag,
}

/// Polling configuration of a trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(rename = "triggerScheduleType")]
    pub trigger_schedule_type: u8,
    pub is_custom_polling_key: bool,
    #[serde(rename = "dateFormat")]
    pub date_format: String,
    pub poll_order: u8,
    pub polling_field_type: u8,
    #[serde(rename = "extraParams")]
    pub extra_params: Vec<Value>,
    pub api: String,
    pub config: Map<String, Value>,
    pub is_random_uuid_field: bool,
    pub poll_by: String,
    pub has_secondary_polling_key: bool,
}

/// Invocable operation definition for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    pub is_deprecated: SchemaFlag,
    pub notes: String,
    pub display_name: String,
    pub action_static_fields_mapping: Vec<ActionFieldMapping>,
    pub description: String,
    pub resource_name: String,
    #[serde(rename = "type")]
    pub action_type: u8,
    pub link_name: String,
    pub is_data_type_enabled: SchemaFlag,
    pub action_sub_res_field_mapping: Map<String, Value>,
    pub action_config: ActionConfig,
    pub document_link: String,
    pub action_static_fields: Vec<Value>,
    pub disabled: SchemaFlag,
    pub is_allow_dynamic_field: SchemaFlag,
}

/// Static field mapping of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFieldMapping {
    pub order_no: u32,
    pub is_output_field: bool,
    pub default_value: String,
    pub enable: bool,
    pub is_input_field: bool,
    pub label: String,
    pub field_type: u8,
    pub link_name: String,
    pub is_mandatory: bool,
    pub is_hidden: bool,
}

/// API binding of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub extra_params: Vec<Value>,
    pub api: String,
    pub config: Map<String, Value>,
}

/// Top-level service record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub service_type: String,
    pub is_deprecated: String,
    pub version_tags: String,
    pub code: u32,
    pub authentication_param: Map<String, Value>,
    pub display_name: String,
    pub live_version_tag: String,
    pub token_refresh_details: Map<String, Value>,
    pub description: String,
    pub webhook_verify_api_link_name: String,
    pub version: String,
    pub link_name: String,
    pub category_type: u8,
    pub is_default_utility: String,
    pub category_names: Vec<String>,
    pub authentication_scheme: i32,
    pub logo: String,
    pub service_id: String,
    pub team_mail: String,
    pub test_api_link_name: String,
    pub infra_type: u8,
}
