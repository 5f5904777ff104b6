//! Collection → workflow definition transform
//!
//! Structure is fully determined by the source: one endpoint, resource,
//! trigger and action per retained (GET) item, in source order, each
//! suffixed with the item's original 1-based index. Only display names and
//! descriptions come from enrichment.

use crate::enricher::{CollectionEnricher, EndpointEnricher, Enrichment};
use crate::error::{Result, TransformError};
use crate::model::{is_collection_document, SourceCollection, SourceItem};
use crate::schema::WorkflowDefinition;
use crate::template::{self, EndpointSlot};
use apiflow_llm::{GeneratorConfig, LLMClient};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Transformer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerConfig {
    /// Model settings for every enrichment call
    pub generator: GeneratorConfig,
    /// Endpoint enrichments in flight at once; 1 is strictly sequential
    pub enrichment_concurrency: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            enrichment_concurrency: 1,
        }
    }
}

impl TransformerConfig {
    pub fn with_enrichment_concurrency(mut self, concurrency: usize) -> Self {
        self.enrichment_concurrency = concurrency;
        self
    }
}

pub struct CollectionTransformer {
    collection_enricher: CollectionEnricher,
    endpoint_enricher: EndpointEnricher,
    concurrency: usize,
}

impl CollectionTransformer {
    pub fn new(client: Arc<dyn LLMClient>, config: TransformerConfig) -> Self {
        Self {
            collection_enricher: CollectionEnricher::new(client.clone(), config.generator.clone()),
            endpoint_enricher: EndpointEnricher::new(client, config.generator),
            concurrency: config.enrichment_concurrency.max(1),
        }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, TransformerConfig::default())
    }

    /// Check the recognition rule, then transform
    pub async fn transform_document(&self, document: Value) -> Result<WorkflowDefinition> {
        if !is_collection_document(&document) {
            return Err(TransformError::InvalidCollection(
                "document must have an info object and an item array".to_string(),
            ));
        }
        let collection = SourceCollection::from_value(document)?;
        self.transform(&collection).await
    }

    /// Build the workflow definition for `collection`
    ///
    /// Enrichment failures never surface here; they degrade to source values.
    pub async fn transform(&self, collection: &SourceCollection) -> Result<WorkflowDefinition> {
        info!(
            collection = collection.name().unwrap_or_default(),
            items = collection.item_count(),
            retained = collection.retained_count(),
            "Transforming collection"
        );

        let service_name = self.collection_enricher.enrich(collection).await.into_name();

        let retained: Vec<(usize, &SourceItem)> = collection
            .item
            .iter()
            .enumerate()
            .filter(|(idx, item)| {
                let keep = item.is_retained();
                if !keep {
                    debug!(index = idx + 1, method = item.method(), "Skipping non-GET item");
                }
                keep
            })
            .collect();

        // Boxed so the transform future stays `Send`
        let pending: Vec<BoxFuture<'_, Enrichment>> = retained
            .iter()
            .map(|&(idx, item)| self.endpoint_enricher.enrich(item, idx + 1).boxed())
            .collect();

        // `buffered` yields in input order regardless of completion order
        let names: Vec<Enrichment> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        if names.len() != retained.len() {
            return Err(TransformError::Assembly(format!(
                "expected {} enrichments, got {}",
                retained.len(),
                names.len()
            )));
        }

        let fallbacks = names.iter().filter(|n| n.is_fallback()).count();

        let mut definition = WorkflowDefinition {
            endpoints: Vec::with_capacity(retained.len()),
            service: template::service(&service_name),
            env_variables: Map::new(),
            data_type_validation: 0,
            resources: Vec::with_capacity(retained.len()),
            triggers: Vec::with_capacity(retained.len()),
            actions: Vec::with_capacity(retained.len()),
        };

        for ((idx, item), enrichment) in retained.iter().zip(&names) {
            let slot = EndpointSlot::new(*idx, item.method(), item.url(), enrichment.name());
            definition.endpoints.push(template::endpoint(&slot));
            definition.resources.push(template::resource(&slot));
            definition.triggers.push(template::trigger(&slot));
            definition.actions.push(template::action(&slot));
        }

        info!(
            service = %definition.service.link_name,
            endpoints = definition.endpoints.len(),
            fallbacks,
            "Collection transformed"
        );

        Ok(definition)
    }
}
