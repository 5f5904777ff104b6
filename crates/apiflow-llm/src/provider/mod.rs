//! LLM provider implementations

use crate::client::LLMClient;

/// LLM provider trait
pub trait LLMProvider: LLMClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

mod gemini;
mod mock;

pub use gemini::GeminiProvider;
pub use mock::{MockProvider, MockReply};
