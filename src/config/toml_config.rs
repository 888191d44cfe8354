use crate::config::{
    DEFAULT_API_ENDPOINT, DEFAULT_MODEL, DEFAULT_SERVER_BIND, SUPPORTED_DOCUMENT_EXTENSIONS,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AssistantError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub assistant: AssistantInfo,
    pub model: ModelConfig,
    pub knowledge: KnowledgeConfig,
    pub server: Option<ServerConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    pub documents: Vec<String>,
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    /// Frontend origin allowed to call the API. No value disables CORS
    /// handling entirely.
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl AssistantConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssistantError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssistantError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})。找不到的變數原樣保留。
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("assistant.name", &self.assistant.name)?;
        validation::validate_url("model.endpoint", self.api_endpoint())?;
        validation::validate_non_empty_string("model.name", self.model_name())?;
        validation::validate_range("model.temperature", self.temperature(), 0.0, 2.0)?;

        if self.knowledge.documents.is_empty() {
            return Err(AssistantError::MissingConfigError {
                field: "knowledge.documents".to_string(),
            });
        }
        validation::validate_file_extensions(
            "knowledge.documents",
            &self.knowledge.documents,
            SUPPORTED_DOCUMENT_EXTENSIONS,
        )?;

        // An unresolved ${VAR} substitution means the key never reached the
        // process environment.
        if self.api_key().is_none() {
            return Err(AssistantError::MissingConfigError {
                field: "model.api_key (GOOGLE_API_KEY)".to_string(),
            });
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn server_bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_SERVER_BIND)
    }

    pub fn allowed_origin(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.allowed_origin.as_deref())
    }
}

impl ConfigProvider for AssistantConfig {
    fn api_endpoint(&self) -> &str {
        self.model
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn model_name(&self) -> &str {
        self.model.name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.model
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
    }

    fn temperature(&self) -> f32 {
        self.model.temperature.unwrap_or(0.3)
    }

    fn timeout_seconds(&self) -> u64 {
        self.model.timeout_seconds.unwrap_or(30)
    }

    fn retry_attempts(&self) -> u32 {
        self.model.retry_attempts.unwrap_or(2)
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.model.retry_delay_seconds.unwrap_or(1)
    }

    fn document_paths(&self) -> &[String] {
        &self.knowledge.documents
    }

    fn knowledge_base_path(&self) -> &str {
        self.knowledge.base_path.as_deref().unwrap_or(".")
    }
}

impl Validate for AssistantConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
