use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Model API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Document error ({path}): {message}")]
    DocumentError { path: String, message: String },

    #[error("Knowledge base error: {message}")]
    EmptyKnowledgeError { message: String },

    #[error("Model response error: {message}")]
    ModelResponseError { message: String },

    #[error("Configuration error: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Model,
    Document,
    Configuration,
    System,
}

/// 嚴重程度，對應 CLI 的退出碼。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssistantError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AssistantError::ApiError(_) => ErrorCategory::Network,
            AssistantError::ModelResponseError { .. } => ErrorCategory::Model,
            AssistantError::DocumentError { .. } | AssistantError::EmptyKnowledgeError { .. } => {
                ErrorCategory::Document
            }
            AssistantError::ConfigValidationError { .. }
            | AssistantError::InvalidConfigValueError { .. }
            | AssistantError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AssistantError::IoError(_) | AssistantError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient network/model failures are retried or degraded to a
            // canned reply; they should not abort a session.
            AssistantError::ApiError(_) | AssistantError::ModelResponseError { .. } => {
                ErrorSeverity::Medium
            }
            // A single unreadable document is skippable.
            AssistantError::DocumentError { .. } => ErrorSeverity::Medium,
            AssistantError::EmptyKnowledgeError { .. } => ErrorSeverity::High,
            AssistantError::IoError(_) | AssistantError::SerializationError(_) => {
                ErrorSeverity::High
            }
            AssistantError::ConfigValidationError { .. }
            | AssistantError::InvalidConfigValueError { .. }
            | AssistantError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether another attempt against the model API can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssistantError::ApiError(_) | AssistantError::ModelResponseError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AssistantError::ApiError(_) => {
                "Check your network connection and that the model endpoint is reachable".to_string()
            }
            AssistantError::ModelResponseError { .. } => {
                "The model service may be overloaded; try again in a moment".to_string()
            }
            AssistantError::DocumentError { path, .. } => {
                format!("Verify that '{path}' exists and is a readable PDF or text file")
            }
            AssistantError::EmptyKnowledgeError { .. } => {
                "Provide at least one readable knowledge document (e.g. --docs pop2016.pdf)"
                    .to_string()
            }
            AssistantError::MissingConfigError { field } => {
                if field.contains("api_key") {
                    "Set GOOGLE_API_KEY in the environment or a .env file".to_string()
                } else {
                    format!("Provide a value for '{field}'")
                }
            }
            AssistantError::ConfigValidationError { field, .. }
            | AssistantError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{field}' setting and restart")
            }
            AssistantError::IoError(_) => "Check file paths and permissions".to_string(),
            AssistantError::SerializationError(_) => {
                "The payload could not be encoded/decoded; report this if it persists".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AssistantError::ApiError(_) | AssistantError::ModelResponseError { .. } => {
                "Could not reach the assistant's language model".to_string()
            }
            AssistantError::DocumentError { path, .. } => {
                format!("Could not read knowledge document '{path}'")
            }
            AssistantError::EmptyKnowledgeError { message } => message.clone(),
            AssistantError::MissingConfigError { field } => {
                format!("Missing configuration: {field}")
            }
            AssistantError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {field}: {message}")
            }
            AssistantError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in {field}: {reason}")
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
