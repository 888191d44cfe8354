use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ConfigProvider, LanguageModel};
use crate::utils::error::{AssistantError, Result};
use crate::utils::validation;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini `generateContent` REST adapter.
#[derive(Debug)]
pub struct GeminiModel {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl GeminiModel {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        validation::validate_url("model.endpoint", config.api_endpoint())?;

        let api_key = config
            .api_key()
            .map(str::to_string)
            .ok_or_else(|| AssistantError::MissingConfigError {
                field: "model.api_key".to_string(),
            })?;
        validation::validate_non_empty_string("model.api_key", &api_key)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().trim_end_matches('/').to_string(),
            model: config.model_name().to_string(),
            api_key,
            temperature: config.temperature(),
            retry_attempts: config.retry_attempts(),
            retry_delay: Duration::from_secs(config.retry_delay_seconds()),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.temperature,
            }),
        };

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 Model API response status: {}", status);

        if !status.is_success() {
            return Err(AssistantError::ModelResponseError {
                message: format!("Model request failed with status: {}", status),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AssistantError::ModelResponseError {
                message: "Model returned no usable candidates".to_string(),
            })
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            match self.generate_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "📡 Model call failed ({}); retry {}/{}",
                        e,
                        attempt,
                        self.retry_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
