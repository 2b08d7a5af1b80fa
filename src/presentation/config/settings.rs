use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;
use crate::domain::LlmModel;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub embeddings: EmbeddingsSettings,
    pub rag: RagSettings,
    pub fetcher: FetcherSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[default]
    Local,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            api_key: String::new(),
            default_model: LlmModel::default().as_str().to_string(),
            max_tokens: 1024,
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            chunk_size: 700,
            chunk_overlap: 100,
            top_k: 5,
        }
    }
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_redirects: 5,
            accept_invalid_certs: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info,sitechat=debug,tower_http=debug".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Layers `appsettings.{environment}.toml` (optional) under `APP_*`
    /// variables, e.g. `APP_LLM__API_KEY` or `APP_RAG__TOP_K`. The bare
    /// `GROQ_API_KEY` and `HF_TOKEN` variables fill credentials left blank.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.apply_credential_fallbacks(
            std::env::var("GROQ_API_KEY").ok(),
            std::env::var("HF_TOKEN").ok(),
        );

        Ok(settings)
    }

    pub fn apply_credential_fallbacks(
        &mut self,
        llm_key: Option<String>,
        hf_token: Option<String>,
    ) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = llm_key {
                self.llm.api_key = key;
            }
        }
        if self.embeddings.api_key.trim().is_empty() {
            if let Some(token) = hf_token {
                self.embeddings.api_key = token;
            }
        }
    }

    pub fn default_model(&self) -> Result<LlmModel, String> {
        self.llm.default_model.parse()
    }
}
