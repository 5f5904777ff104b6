//! Prompt templates for the single-shot generators

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Substitute `{key}` placeholders in `template` in a single pass
///
/// Substituted values are never rescanned, so a value that itself contains
/// `{key}` text is inserted verbatim. Placeholders without a value are left
/// untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Mapping rules appended to every JSON-to-XML request
pub const XML_MAPPING_RULES: &str = r#"You are a JSON-to-XML mapping transformer.
Rules:
- Always start output with a single short intro line: "Here's the code:"
- Then immediately open a fenced code block with: ```xml
- Always end the block with: ```
- Mapping rules:
  * Root object → <json:object>
  * For each key → <json:property name="KEY" value="${JSON_PATH}" />
  * Never insert static values, always use dynamic placeholders like ${...}.
  * Arrays → <json:array> with <Core:forEach items="${PARENT_PATH.ARRAY}" var="item">,
    then map properties inside as <json:property name="..." value="${item.FIELD}" />
- Preserve all JSON key names exactly.
"#;

/// User message for JSON-to-XML requests
pub const XML_MAPPING_PROMPT: &str = "create json jsob object. {rules} {prompt}";

/// System message for `<FILL_ME>` code rewrites
pub const CODE_REWRITE_SYSTEM: &str = "You are a {language}programmer that replaces <FILL_ME> part with the right code. Only output the code that replaces <FILL_ME> part. Do not add any explanation or markdown.";

/// System message for script generation
pub const SCRIPT_SYSTEM: &str = r#"You are a {language} programming expert. Generate complete, working Deluge script code based on the user's requirements.

IMPORTANT RULES:
1. Only output the actual Deluge code - no explanations, markdown, or comments about what the code does
2. Use proper Deluge syntax and functions
3. Include all necessary variable declarations and logic
4. Make sure the code is complete and executable
5. Use proper Deluge date functions like eomonth(), workDaysBetween(), etc.
6. Follow Deluge naming conventions and best practices
7. Do not include any text outside of the actual code"#;

/// User message for script generation
pub const SCRIPT_PROMPT: &str = "Generate a complete Deluge script for: {prompt}";

/// System message for workflow action generation
pub const ACTION_SYSTEM: &str = r#"You are a workflow automation expert. Based on the user's request, determine if they want:

1. ACTION GENERATION: If they want to create a specific action (like "create Fetch Message action"), generate an action object
2. INFORMATION/EXPLANATION: If they ask general questions (like "what is Slack", "explain", "how does it work"), provide helpful information

FOR ACTION GENERATION - Return JSON object with these fields:
- action_id: Generate unique large number (like 2000000187506)
- action_type: Determine based on request (CREATE, READ, UPDATE, DELETE, SEND, FETCH, SEARCH, LIST, etc.)
- display_name: Create clear, descriptive name based on user prompt
- link_name: Convert display_name to snake_case
- type: Same as action_type
- disabled: Set to false by default
- description: Brief description of what the action does
- documentLink: Relevant documentation URL
- is_allow_dynamic_fields: Boolean value
- is_deprecated: Boolean value
- notes: Additional notes or comments

FOR INFORMATION/EXPLANATION - Return conversational text that:
1. Shares relevant information about the service and its capabilities
2. Explains what types of actions can be created for this service
3. Asks if they need to add new actions
4. Suggests they can upload JSON files or API details for specific configurations
5. Provides helpful guidance on workflow automation possibilities
6. Be conversational and user-friendly
7. Focus on the specific service and its potential use cases

IMPORTANT:
- If generating action object: Return ONLY valid JSON, no markdown, no explanations
- If providing information: Return conversational text, no JSON format"#;

/// User message for workflow action generation
pub const ACTION_PROMPT: &str = r#"Service: {service_name}
User Request: {user_prompt}

Analyze the user's request and respond appropriately:
- If they want to CREATE/GENERATE a specific action: Return JSON object with action fields
- If they want INFORMATION/EXPLANATION about the service: Return conversational text

Examples:
- "create Fetch Message action" → Return JSON action object
- "what is Slack" → Return explanatory text about Slack
- "explain how it works" → Return explanatory text
- "add Send Message action" → Return JSON action object"#;

/// Default instruction when a document is uploaded without a prompt
pub const DOCUMENT_ANALYSIS_PROMPT: &str = "Analyze this document and provide insights.";
