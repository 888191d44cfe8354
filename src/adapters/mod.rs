// Adapters layer: concrete implementations for external systems (documents,
// model APIs).

pub mod gemini;

use crate::domain::ports::DocumentStore;
use crate::utils::error::{AssistantError, Result};
use std::fs;
use std::path::Path;

/// Reads knowledge documents from a base directory. PDF documents are run
/// through text extraction; plain-text documents are read as-is.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    base_path: String,
}

impl LocalDocumentStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl DocumentStore for LocalDocumentStore {
    async fn read_document(&self, path: &str) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);
        let extension = full_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => pdf_extract::extract_text(&full_path).map_err(|e| {
                AssistantError::DocumentError {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }),
            "txt" | "md" => {
                fs::read_to_string(&full_path).map_err(|e| AssistantError::DocumentError {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
            other => Err(AssistantError::DocumentError {
                path: path.to_string(),
                message: format!("Unsupported document type: '{}'", other),
            }),
        }
    }
}
