//! Gateway client construction

use crate::config::{LlmConfig, LlmProviderKind};
use apiflow_llm::{GeminiProvider, InMemoryLLMCache, LLMClient, LLMError, MockProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the configured text generation client
///
/// Fails with `InvalidConfiguration` when Gemini is selected without a key.
pub fn build_client(config: &LlmConfig) -> Result<Arc<dyn LLMClient>, LLMError> {
    match config.provider {
        LlmProviderKind::Mock => {
            info!("Using mock text generation provider");
            Ok(Arc::new(MockProvider::new()))
        }
        LlmProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    LLMError::InvalidConfiguration(
                        "Gemini API key is not set (APIFLOW__LLM__API_KEY, GOOGLE_GENERATIVE_AI_API_KEY or GEMINI_API_KEY)"
                            .to_string(),
                    )
                })?;

            let provider = if config.cache_enabled {
                GeminiProvider::with_cache(api_key, Arc::new(InMemoryLLMCache::new()))
            } else {
                GeminiProvider::new(api_key)
            };

            let provider = provider
                .with_base_url(&config.base_url)
                .with_timeout(Duration::from_secs(config.timeout_secs))?;

            info!(
                model = %config.model,
                cache = config.cache_enabled,
                timeout_secs = config.timeout_secs,
                "Using Gemini text generation provider"
            );
            Ok(Arc::new(provider))
        }
    }
}
