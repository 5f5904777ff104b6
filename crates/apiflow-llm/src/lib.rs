//! apiflow LLM Integration
//!
//! This crate is the text generation gateway used by the apiflow server:
//! - Provider clients: Gemini for production, Mock for tests
//! - Structured response extraction: pulling JSON objects out of model text
//! - Single-shot generators: XML mappings, code rewrites, scripts, workflow
//!   actions and document analysis
//!
//! Every generator performs exactly one gateway call and never retries.

// Re-export core types
pub use cache::{InMemoryLLMCache, LLMCache};
pub use client::{ChatMessage, LLMClient, LLMRequest, LLMResponse, MessagePart, Role};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{GeminiProvider, LLMProvider, MockProvider, MockReply};

// Re-export generators
pub use generator::{
    extract_json_object, fill_template, ActionGenerator, ActionOutcome, CodeRewriteGenerator, DocumentAnalyzer,
    GeneratorConfig, ScriptGenerator, XmlMappingGenerator,
};

pub mod cache;
pub mod client;
pub mod error;
pub mod generator;
pub mod provider;
