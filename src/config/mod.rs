#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SERVER_BIND: &str = "0.0.0.0:5000";

/// File types the document store can turn into text.
pub const SUPPORTED_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
