use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 對話語言。查詢與回覆都只會是英文或馬拉雅拉姆文其中之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ml")]
    Malayalam,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malayalam => "ml",
        }
    }

    /// Classify free text. Anything not recognized as Malayalam counts as
    /// English, which is the conversation default.
    pub fn detect(text: &str) -> Self {
        match whatlang::detect(text) {
            Some(info) if info.lang() == whatlang::Lang::Mal => Language::Malayalam,
            _ => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 一次完成的問答。
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub lang: Language,
    pub answered_at: DateTime<Utc>,
}

impl ChatReply {
    pub fn new(text: String, lang: Language) -> Self {
        Self {
            text,
            lang,
            answered_at: Utc::now(),
        }
    }
}
