//! Best-effort name enrichment
//!
//! Each enricher makes exactly one gateway call and never fails: a gateway
//! error, an unparseable reply or a reply missing either key all produce
//! [`Enrichment::Fallback`] carrying the source values.

use crate::model::{SourceCollection, SourceItem, DEFAULT_COLLECTION_NAME};
use crate::prompts::{ENDPOINT_PROMPT, ENDPOINT_SYSTEM, SERVICE_PROMPT, SERVICE_SYSTEM};
use apiflow_llm::{extract_json_object, fill_template, ChatMessage, GeneratorConfig, LLMClient};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Display name and description of an endpoint or service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedName {
    pub display_name: String,
    pub description: String,
}

impl EnrichedName {
    pub fn new(display_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Why an enrichment fell back to source values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The gateway call itself failed
    Gateway(String),
    /// The reply was not a JSON object
    Malformed(String),
    /// The reply parsed but lacked one of the expected keys
    MissingKeys,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Gateway(msg) => write!(f, "gateway failure: {}", msg),
            FallbackReason::Malformed(msg) => write!(f, "malformed reply: {}", msg),
            FallbackReason::MissingKeys => write!(f, "reply missing expected keys"),
        }
    }
}

/// Result of one enrichment call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Enriched(EnrichedName),
    Fallback {
        name: EnrichedName,
        reason: FallbackReason,
    },
}

impl Enrichment {
    pub fn name(&self) -> &EnrichedName {
        match self {
            Enrichment::Enriched(name) => name,
            Enrichment::Fallback { name, .. } => name,
        }
    }

    pub fn into_name(self) -> EnrichedName {
        match self {
            Enrichment::Enriched(name) => name,
            Enrichment::Fallback { name, .. } => name,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Enrichment::Fallback { .. })
    }
}

/// Shared request/parse cycle for both enrichers
async fn enrich_with(
    client: &dyn LLMClient,
    config: &GeneratorConfig,
    system: &str,
    prompt: String,
    name_key: &str,
    fallback: EnrichedName,
) -> Enrichment {
    let request = config.request(vec![ChatMessage::system(system), ChatMessage::user(prompt)]);

    let reply = match client.call(request).await {
        Ok(response) => response.content,
        Err(e) => {
            return Enrichment::Fallback {
                name: fallback,
                reason: FallbackReason::Gateway(e.to_string()),
            }
        }
    };

    let object = match extract_json_object(&reply) {
        Ok(object) => object,
        Err(e) => {
            return Enrichment::Fallback {
                name: fallback,
                reason: FallbackReason::Malformed(e.to_string()),
            }
        }
    };

    match (non_empty_str(&object, name_key), non_empty_str(&object, "description")) {
        (Some(display_name), Some(description)) => {
            Enrichment::Enriched(EnrichedName::new(display_name, description))
        }
        _ => Enrichment::Fallback {
            name: fallback,
            reason: FallbackReason::MissingKeys,
        },
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Enriches a single retained item
#[derive(Clone)]
pub struct EndpointEnricher {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl EndpointEnricher {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    /// Enrich `item`, found at 1-based `position` in the source
    pub async fn enrich(&self, item: &SourceItem, position: usize) -> Enrichment {
        let prompt = fill_template(
            ENDPOINT_PROMPT,
            &[
                ("name", item.name().unwrap_or("Unnamed Endpoint")),
                ("method", item.method()),
                ("url", item.url()),
                ("description", item.description().unwrap_or("No description")),
            ],
        );

        let fallback = EnrichedName::new(
            item.name_or_placeholder(position),
            item.description().unwrap_or_default(),
        );

        let enrichment = enrich_with(
            self.client.as_ref(),
            &self.config,
            ENDPOINT_SYSTEM,
            prompt,
            "endpointName",
            fallback,
        )
        .await;

        match &enrichment {
            Enrichment::Enriched(name) => {
                debug!(position, display_name = %name.display_name, "Endpoint enriched")
            }
            Enrichment::Fallback { name, reason } => warn!(
                position,
                display_name = %name.display_name,
                %reason,
                "Endpoint enrichment fell back to source values"
            ),
        }

        enrichment
    }
}

/// Enriches the collection as a whole into a service name
#[derive(Clone)]
pub struct CollectionEnricher {
    client: Arc<dyn LLMClient>,
    config: GeneratorConfig,
}

impl CollectionEnricher {
    pub fn new(client: Arc<dyn LLMClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, GeneratorConfig::default())
    }

    pub async fn enrich(&self, collection: &SourceCollection) -> Enrichment {
        let name = collection.name().unwrap_or(DEFAULT_COLLECTION_NAME);
        let description = collection.description().unwrap_or_default();

        let total = collection.item_count().to_string();
        let retained = collection.retained_count().to_string();
        let prompt = fill_template(
            SERVICE_PROMPT,
            &[
                ("name", name),
                ("description", description),
                ("total", total.as_str()),
                ("retained", retained.as_str()),
            ],
        );

        let enrichment = enrich_with(
            self.client.as_ref(),
            &self.config,
            SERVICE_SYSTEM,
            prompt,
            "serviceName",
            EnrichedName::new(name, description),
        )
        .await;

        if let Enrichment::Fallback { name, reason } = &enrichment {
            warn!(
                service = %name.display_name,
                %reason,
                "Service enrichment fell back to source values"
            );
        }

        enrichment
    }
}
