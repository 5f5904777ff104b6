//! Server configuration

use apiflow_collection::TransformerConfig;
use apiflow_llm::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Gemini API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted, in order, when no API key is configured
pub const API_KEY_ENV_FALLBACKS: [&str; 2] = ["GOOGLE_GENERATIVE_AI_API_KEY", "GEMINI_API_KEY"];

/// Text generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    Gemini,
    /// Canned replies, for local runs without a key
    Mock,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Gateway configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,

    /// API key; see [`API_KEY_ENV_FALLBACKS`]
    pub api_key: Option<String>,

    pub model: String,

    pub base_url: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    pub max_tokens: Option<u32>,

    pub temperature: Option<f32>,

    /// Cache identical requests in memory
    pub cache_enabled: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::Gemini,
            api_key: None,
            model: apiflow_llm::generator::DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 60,
            max_tokens: None,
            temperature: None,
            cache_enabled: false,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("cache_enabled", &self.cache_enabled)
            .finish()
    }
}

impl LlmConfig {
    /// Generator settings derived from this configuration
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(&self.model);
        if let Some(max_tokens) = self.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        config
    }
}

/// Upload handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploads are staged in
    pub dir: PathBuf,

    /// Largest accepted file, in bytes
    pub max_file_size: usize,

    /// Accepted content types
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_file_size: 20 * 1024 * 1024,
            allowed_types: [
                "application/json",
                "application/pdf",
                "text/plain",
                "text/csv",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "image/jpeg",
                "image/png",
                "image/webp",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        }
    }
}

/// Collection transform tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Endpoint enrichments in flight at once; 1 keeps them sequential
    pub enrichment_concurrency: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            enrichment_concurrency: 1,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level
    pub log_level: String,

    pub log_format: LogFormat,

    pub llm: LlmConfig,

    pub upload: UploadConfig,

    pub transform: TransformConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            llm: LlmConfig::default(),
            upload: UploadConfig::default(),
            transform: TransformConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Sources, lowest precedence first: defaults, `config/server.*`,
    /// `APIFLOW__*` variables (e.g. `APIFLOW__LLM__MODEL`), then the bare
    /// `PORT` and API key variables.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("APIFLOW").separator("__"))
            .build();

        let mut config: Self = match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
            Err(e) => {
                tracing::info!("No usable config sources ({}), using default configuration", e);
                Self::default()
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `PORT` and the API key fallbacks using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }

        if self.llm.api_key.as_deref().map_or(true, str::is_empty) {
            self.llm.api_key = API_KEY_ENV_FALLBACKS
                .iter()
                .filter_map(|name| lookup(*name))
                .find(|key| !key.is_empty());
        }

        Ok(())
    }

    /// Transformer settings derived from this configuration
    pub fn transformer_config(&self) -> TransformerConfig {
        TransformerConfig {
            generator: self.llm.generator_config(),
            enrichment_concurrency: self.transform.enrichment_concurrency,
        }
    }

    /// Listen address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
