//! Prompt templates for name enrichment and use-case summaries

/// Persona for collection-level enrichment
pub(crate) const SERVICE_SYSTEM: &str = "You are a business analyst for a workflow automation platform. Generate professional, business-friendly names and descriptions for API services. Always respond with valid JSON only. No markdown, no explanations, no code blocks.";

/// Collection-level enrichment request
pub(crate) const SERVICE_PROMPT: &str = r#"You are analyzing a Postman API collection for a workflow automation app. Generate a professional service name and description that would be suitable for business users.

Collection Analysis:
- Original Name: {name}
- Original Description: {description}
- Total Endpoints: {total}
- GET Endpoints: {retained}

Requirements:
1. Service Name: 2-4 words, professional, business-friendly
2. Description: 1-2 sentences explaining what this service does for users
3. Focus on business value and user benefits
4. Use clear, non-technical language when possible

Examples:
- "Trading Platform API" instead of "Zerodha Kite RESTful API"
- "Financial Data Service" instead of "Stock Market API"
- "User Management System" instead of "Authentication API"

IMPORTANT: Respond ONLY with valid JSON, no markdown, no explanations:
{
  "serviceName": "concise business name here",
  "description": "clear business description here"
}"#;

/// Persona for endpoint enrichment
pub(crate) const ENDPOINT_SYSTEM: &str = "You are a business analyst for a workflow automation platform. Generate professional, business-friendly names and descriptions for API endpoints. Always respond with valid JSON only. No markdown, no explanations, no code blocks.";

/// Endpoint enrichment request
pub(crate) const ENDPOINT_PROMPT: &str = r#"You are analyzing an API endpoint for a workflow automation app. Generate a professional endpoint name and description that business users can understand.

Endpoint Analysis:
- Original Name: {name}
- HTTP Method: {method}
- URL Path: {url}
- Original Description: {description}

Requirements:
1. Endpoint Name: 2-4 words, action-oriented, business-friendly
2. Description: 1 sentence explaining what this endpoint does for users
3. Focus on business functionality, not technical details
4. Use clear, non-technical language

Examples:
- "Get User Profile" instead of "Profile"
- "Check Account Balance" instead of "Margins"
- "View Order History" instead of "Orders"
- "Retrieve Holdings" instead of "Holdings"

IMPORTANT: Respond ONLY with valid JSON, no markdown, no explanations:
{
  "endpointName": "business-friendly name here",
  "description": "clear business description here"
}"#;

/// Persona for use-case summaries
pub(crate) const USE_CASE_SYSTEM: &str = "You are a business analyst. Provide concise use case explanations for API services in workflow automation.";

/// Use-case summary request
pub(crate) const USE_CASE_PROMPT: &str = "Analyze this service for workflow automation use case. Service: {service}, Endpoints: {count}, Names: {names}. Provide a brief 1-2 sentence use case explanation for business automation.";
