use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of knowledge documents. Returns the extracted plain text of a
/// single document.
pub trait DocumentStore: Send + Sync {
    fn read_document(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Configuration surface shared by the CLI flags and the TOML file.
pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn model_name(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn temperature(&self) -> f32;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn document_paths(&self) -> &[String];
    fn knowledge_base_path(&self) -> &str;
}

/// A text-generation backend. The prompt already carries the persona,
/// the document context and the farmer's query.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
