pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod repl;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::AssistantConfig;

pub use adapters::{gemini::GeminiModel, LocalDocumentStore};
pub use core::{assistant::AssistantEngine, knowledge::KnowledgeBase};
pub use domain::model::{ChatReply, Language};
pub use utils::error::{AssistantError, Result};
