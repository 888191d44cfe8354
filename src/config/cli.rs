use crate::config::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL, SUPPORTED_DOCUMENT_EXTENSIONS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AssistantError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "krishi-sakhi")]
#[command(about = "AI farming assistant for Kerala farmers (English/Malayalam)")]
pub struct CliConfig {
    /// Base URL of the Gemini API
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    /// Model to query
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key; falls back to GOOGLE_API_KEY from the environment or .env
    #[arg(long)]
    pub api_key: Option<String>,

    /// Knowledge documents (PDF or plain text), comma separated
    #[arg(long, value_delimiter = ',')]
    pub docs: Vec<String>,

    /// Directory the document paths are relative to
    #[arg(long, default_value = ".")]
    pub base_path: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    pub temperature: f32,

    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    #[arg(long, default_value_t = 2)]
    pub retry_attempts: u32,

    #[arg(long, default_value_t = 1)]
    pub retry_delay_seconds: u64,

    /// Load settings from a TOML file instead of flags
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log session resource statistics
    #[arg(long)]
    pub monitor: bool,

    /// Show configuration and knowledge-base analysis without starting a chat
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// Fill the API key from the environment when no flag was given.
    /// `.env` must already be loaded at this point.
    pub fn resolve_api_key(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("GOOGLE_API_KEY").ok();
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.retry_delay_seconds
    }

    fn document_paths(&self) -> &[String] {
        &self.docs
    }

    fn knowledge_base_path(&self) -> &str {
        &self.base_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;

        if self.docs.is_empty() {
            return Err(AssistantError::MissingConfigError {
                field: "docs".to_string(),
            });
        }
        validation::validate_file_extensions("docs", &self.docs, SUPPORTED_DOCUMENT_EXTENSIONS)?;

        if self.api_key().is_none() {
            return Err(AssistantError::MissingConfigError {
                field: "api_key (GOOGLE_API_KEY)".to_string(),
            });
        }

        Ok(())
    }
}
