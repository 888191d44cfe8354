use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;

/// Concatenated plain text of every readable knowledge document, loaded once
/// at startup and shared read-only for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    context: String,
    loaded_documents: Vec<String>,
}

impl KnowledgeBase {
    /// 讀取所有設定的文件。讀不到或沒有內容的文件會被跳過並記錄警告。
    pub async fn load<D: DocumentStore>(store: &D, paths: &[String]) -> Result<Self> {
        tracing::info!("📚 Extracting text from {} knowledge document(s)...", paths.len());

        let mut context = String::new();
        let mut loaded_documents = Vec::new();

        for path in paths {
            match store.read_document(path).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!("  - Successfully processed {}", path);
                    context.push_str(&text);
                    context.push('\n');
                    loaded_documents.push(path.clone());
                }
                Ok(_) => {
                    tracing::warn!("  - {} contained no extractable text, skipping", path);
                }
                Err(e) => {
                    tracing::warn!("  - Could not read {}: {}", path, e);
                }
            }
        }

        tracing::info!(
            "📚 Extraction complete: {}/{} document(s) loaded ({} chars of context)",
            loaded_documents.len(),
            paths.len(),
            context.len()
        );

        Ok(Self {
            context,
            loaded_documents,
        })
    }

    /// Build a knowledge base directly from already-extracted text.
    pub fn from_text(context: String) -> Self {
        Self {
            context,
            loaded_documents: Vec::new(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn loaded_documents(&self) -> &[String] {
        &self.loaded_documents
    }

    pub fn is_empty(&self) -> bool {
        self.context.trim().is_empty()
    }
}
