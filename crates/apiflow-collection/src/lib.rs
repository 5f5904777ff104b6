//! apiflow collection transform
//!
//! Turns an imported API collection (Postman-style export) into a workflow
//! definition made of four index-aligned record lists (`endpoints`,
//! `resources`, `triggers`, `actions`) plus a service descriptor.
//!
//! Human-facing names and descriptions are enriched through the LLM gateway
//! on a best-effort basis: every enrichment call falls back to the source
//! values, so the only surfaced failures are structural ones.

pub mod enricher;
pub mod error;
pub mod model;
mod prompts;
pub mod schema;
pub mod summary;
pub mod template;
pub mod transformer;

pub use enricher::{CollectionEnricher, EndpointEnricher, EnrichedName, Enrichment, FallbackReason};
pub use error::{Result, TransformError};
pub use model::{is_collection_document, SourceCollection, SourceItem};
pub use schema::{
    ActionDefinition, EndpointDefinition, ResourceDefinition, SchemaFlag, ServiceDescriptor,
    TriggerDefinition, WorkflowDefinition,
};
pub use summary::{UseCaseSummarizer, DEFAULT_USE_CASE_MESSAGE};
pub use transformer::{CollectionTransformer, TransformerConfig};
