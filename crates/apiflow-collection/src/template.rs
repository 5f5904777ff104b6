//! Fixed record templates
//!
//! Every endpoint shares the same five-node workflow graph and the same
//! static-field layout; only the method, the URL and the positional
//! identifiers vary between instances.

use crate::enricher::EnrichedName;
use crate::schema::{
    ActionConfig, ActionDefinition, ActionFieldMapping, EndpointDefinition, InputParams,
    ResourceDefinition, ResourceStaticField, SchemaFlag, ServiceDescriptor, TriggerConfig,
    TriggerDefinition,
};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// `fieldId` of a resource's `method` field for source index 0
pub const METHOD_FIELD_ID_BASE: u64 = 539_890_000_001_296_100;

/// `fieldId` of a resource's `url` field for source index 0
pub const URL_FIELD_ID_BASE: u64 = 539_890_000_001_296_101;

pub const SERVICE_ID: &str = "539890000001296113";
pub const SERVICE_VERSION: &str = "20250317.120000";
pub const TRIGGER_DATE_FORMAT: &str = "DD-MMM-YYYY HH:mm:ss";
pub const TRIGGER_SCHEDULE_TYPE: u8 = 1;

/// Jelly template fed to the HTTP node
pub const TRANSFORMATION_JELLY: &str = "<json:object>\n<json:property name=\"method\" value=\"${resource.method}\" />\n<json:property name=\"url\" value=\"${resource.url}\" />\n</json:object>";

pub fn endpoint_link_name(position: usize) -> String {
    format!("endpoint_{}", position)
}

pub fn resource_link_name(position: usize) -> String {
    format!("resource_{}", position)
}

pub fn trigger_link_name(position: usize) -> String {
    format!("trigger_{}", position)
}

pub fn action_link_name(position: usize) -> String {
    format!("action_{}", position)
}

/// Service link name: lower-cased, whitespace runs replaced by `_`
pub fn service_link_name(display_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let pattern = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
    pattern
        .replace_all(&display_name.to_lowercase(), "_")
        .into_owned()
}

/// Everything the per-endpoint templates are parameterized by
#[derive(Debug, Clone, Copy)]
pub struct EndpointSlot<'a> {
    /// 0-based index of the item in the source collection
    pub index: usize,
    /// 1-based original position, used for every `_i` suffix
    pub position: usize,
    /// Method as written in the source
    pub method: &'a str,
    pub url: &'a str,
    pub name: &'a EnrichedName,
}

impl<'a> EndpointSlot<'a> {
    pub fn new(index: usize, method: &'a str, url: &'a str, name: &'a EnrichedName) -> Self {
        Self {
            index,
            position: index + 1,
            method,
            url,
            name,
        }
    }
}

/// The start → transform → HTTP request → {return, error} graph
///
/// Module ids and wire order are fixed: 0 start, 1 HTTP request,
/// 2 return, 3 error handler, 4 transformation.
pub fn workflow_graph(method: &str, url: &str) -> Value {
    json!({
        "zoomLevel": 1,
        "name": "workflow",
        "working": {
            "wires": [
                { "tgt": { "terminal": "in", "moduleId": 4 }, "src": { "terminal": "out", "moduleId": 0 } },
                { "tgt": { "terminal": "in", "moduleId": 2 }, "src": { "terminal": "out", "moduleId": 1 } },
                { "tgt": { "terminal": "in", "moduleId": 3 }, "src": { "terminal": "error", "moduleId": 1 } },
                { "tgt": { "terminal": "in", "moduleId": 1 }, "src": { "terminal": "out", "moduleId": 4 } }
            ],
            "treeInfo": {
                "0": { "children": [4] },
                "1": { "children": [2, 3] },
                "2": { "children": [] },
                "3": { "children": [] },
                "4": { "children": [1] }
            },
            "orphans": {
                "wires": [],
                "modules": []
            },
            "modules": [
                {
                    "config": {
                        "xtype": "StartContainer",
                        "name": "0",
                        "position": [300, 50],
                        "moduleId": 0,
                        "headline": "Start",
                        "key": "start_krj2p"
                    },
                    "value": {}
                },
                {
                    "config": {
                        "xtype": "HttpRequestContainer",
                        "name": "4",
                        "position": [300, 270],
                        "moduleId": 1,
                        "headline": "HTTP Request",
                        "key": "HttpRequest_p280e"
                    },
                    "value": {
                        "headers": [
                            { "paramName": "Content-Type", "paramValue": "application/json" }
                        ],
                        "allFields": {
                            "bodyType": "raw",
                            "enableHeaders": "false",
                            "convertXmltoJSON": "false",
                            "contentType": "application/json",
                            "outputVariableName": "HTTPRequest"
                        },
                        "rawType": "json",
                        "requestType": method.to_uppercase(),
                        "urlText": url,
                        "bodyParams": [],
                        "rawData": "${transformation_4}",
                        "params": []
                    }
                },
                {
                    "config": {
                        "xtype": "ReturnContainer",
                        "name": "5",
                        "position": [300, 380],
                        "moduleId": 2,
                        "headline": "Return Data",
                        "key": "ReturnData_a4ghp"
                    },
                    "value": {
                        "allFields": {
                            "returnValue": "${HTTPRequest.body}",
                            "returnType": "text",
                            "status": "success"
                        }
                    }
                },
                {
                    "config": {
                        "xtype": "ErrorHandlerContainer",
                        "name": "66",
                        "position": [651, 380],
                        "moduleId": 3,
                        "headline": "Return Error",
                        "key": "ErrorHandler_u25gf"
                    },
                    "value": {
                        "allFields": {
                            "errorMessage": "${HTTPRequest.body}",
                            "errorCode": "${HTTPRequest.status}"
                        }
                    }
                },
                {
                    "config": {
                        "xtype": "JellyTransformerContainer",
                        "name": "9",
                        "position": [300, 160],
                        "moduleId": 4,
                        "headline": "Transformation",
                        "key": "Jelly_ps4tf"
                    },
                    "value": {
                        "allFields": {
                            "jelly": TRANSFORMATION_JELLY,
                            "editorType": "json",
                            "outputVariableName": "transformation_4"
                        }
                    }
                }
            ]
        },
        "isHttpConfigModified": true,
        "language": "VisualWorkflow"
    })
}

pub fn endpoint(slot: &EndpointSlot<'_>) -> EndpointDefinition {
    EndpointDefinition {
        is_data_handler: SchemaFlag::False,
        endpoint_config: Vec::new(),
        mappedscopes: Vec::new(),
        display_name: slot.name.display_name.clone(),
        support_paging: SchemaFlag::False,
        workflow_config: workflow_graph(slot.method, slot.url),
        description: slot.name.description.clone(),
        disabled: SchemaFlag::False,
        endpoint_type: 0,
        link_name: endpoint_link_name(slot.position),
    }
}

fn static_field(name: &str, label: &str, place_holder: &str, field_id: u64) -> ResourceStaticField {
    ResourceStaticField {
        input_params: InputParams {
            help_text: String::new(),
            is_label_field: false,
            name: name.to_string(),
            is_data_type_field: false,
            zf_has_lists: false,
            is_id_field: false,
            is_type_field: false,
            label: label.to_string(),
            field_type: 0,
            is_mandatory: true,
            place_holder: place_holder.to_string(),
            field_id,
        },
        field_type: 0,
        category: 1,
    }
}

pub fn resource(slot: &EndpointSlot<'_>) -> ResourceDefinition {
    let offset = slot.index as u64;
    ResourceDefinition {
        static_fields: vec![
            static_field("method", "Method", slot.method, METHOD_FIELD_ID_BASE + offset),
            static_field("url", "URL", slot.url, URL_FIELD_ID_BASE + offset),
        ],
        display_name: slot.name.display_name.clone(),
        description: slot.name.description.clone(),
        link_name: resource_link_name(slot.position),
    }
}

pub fn trigger(slot: &EndpointSlot<'_>) -> TriggerDefinition {
    TriggerDefinition {
        is_deprecated: SchemaFlag::False,
        notes: String::new(),
        trigger_static_fields_mapping: Vec::new(),
        trigger_config: TriggerConfig {
            trigger_schedule_type: TRIGGER_SCHEDULE_TYPE,
            is_custom_polling_key: false,
            date_format: TRIGGER_DATE_FORMAT.to_string(),
            poll_order: 0,
            polling_field_type: 0,
            extra_params: Vec::new(),
            api: endpoint_link_name(slot.position),
            config: Map::new(),
            is_random_uuid_field: false,
            poll_by: "0".to_string(),
            has_secondary_polling_key: false,
        },
        display_name: slot.name.display_name.clone(),
        description: slot.name.description.clone(),
        resource_name: resource_link_name(slot.position),
        trigger_type: 0,
        link_name: trigger_link_name(slot.position),
        is_data_type_enabled: SchemaFlag::True,
        trigger_sub_res_field_mapping: Map::new(),
        trigger_static_fields: Vec::new(),
        document_link: String::new(),
        disabled: SchemaFlag::False,
    }
}

fn field_mapping(order_no: u32, label: &str, link_name: &str) -> ActionFieldMapping {
    ActionFieldMapping {
        order_no,
        is_output_field: true,
        default_value: String::new(),
        enable: false,
        is_input_field: true,
        label: label.to_string(),
        field_type: 0,
        link_name: link_name.to_string(),
        is_mandatory: true,
        is_hidden: false,
    }
}

pub fn action(slot: &EndpointSlot<'_>) -> ActionDefinition {
    ActionDefinition {
        is_deprecated: SchemaFlag::False,
        notes: String::new(),
        display_name: slot.name.display_name.clone(),
        action_static_fields_mapping: vec![
            field_mapping(1, "Method", "method"),
            field_mapping(2, "URL", "url"),
        ],
        description: slot.name.description.clone(),
        resource_name: resource_link_name(slot.position),
        action_type: 0,
        link_name: action_link_name(slot.position),
        is_data_type_enabled: SchemaFlag::True,
        action_sub_res_field_mapping: Map::new(),
        action_config: ActionConfig {
            extra_params: Vec::new(),
            api: endpoint_link_name(slot.position),
            config: Map::new(),
        },
        document_link: String::new(),
        action_static_fields: Vec::new(),
        disabled: SchemaFlag::False,
        is_allow_dynamic_field: SchemaFlag::False,
    }
}

pub fn service(name: &EnrichedName) -> ServiceDescriptor {
    ServiceDescriptor {
        service_type: "regular".to_string(),
        is_deprecated: "false".to_string(),
        version_tags: "[1]".to_string(),
        code: 100,
        authentication_param: Map::new(),
        display_name: name.display_name.clone(),
        live_version_tag: "1".to_string(),
        token_refresh_details: Map::new(),
        description: name.description.clone(),
        webhook_verify_api_link_name: String::new(),
        version: SERVICE_VERSION.to_string(),
        link_name: service_link_name(&name.display_name),
        category_type: 0,
        is_default_utility: "false".to_string(),
        category_names: Vec::new(),
        authentication_scheme: -1,
        logo: String::new(),
        service_id: SERVICE_ID.to_string(),
        team_mail: String::new(),
        test_api_link_name: String::new(),
        infra_type: 1,
    }
}
