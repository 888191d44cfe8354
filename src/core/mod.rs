pub mod assistant;
pub mod knowledge;
pub mod prompt;

pub use crate::domain::model::{ChatReply, Language};
pub use crate::domain::ports::{ConfigProvider, DocumentStore, LanguageModel};
pub use crate::utils::error::Result;
