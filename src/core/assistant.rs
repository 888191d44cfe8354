use std::time::Instant;

use crate::core::knowledge::KnowledgeBase;
use crate::core::prompt;
use crate::domain::model::{ChatReply, Language};
use crate::domain::ports::LanguageModel;
use crate::utils::error::Result;
use crate::utils::monitor::SessionMonitor;

/// Conversation engine: one knowledge base, one model, any number of
/// exchanges.
pub struct AssistantEngine<M: LanguageModel> {
    model: M,
    knowledge: KnowledgeBase,
    monitor: SessionMonitor,
}

impl<M: LanguageModel> AssistantEngine<M> {
    pub fn new(model: M, knowledge: KnowledgeBase) -> Self {
        Self {
            model,
            knowledge,
            monitor: SessionMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(model: M, knowledge: KnowledgeBase, monitor_enabled: bool) -> Self {
        Self {
            model,
            knowledge,
            monitor: SessionMonitor::new(monitor_enabled),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a query with English as the reply-language hint.
    pub async fn ask(&self, query: &str) -> Result<ChatReply> {
        self.ask_with_hint(query, Language::English).await
    }

    /// Answer a query. `hint` is the language detected from the farmer's own
    /// input and wins only when the model's reply carries no `[lang:xx]` tag.
    ///
    /// 模型呼叫失敗時不往上傳錯誤，改回固定的道歉回覆，對話照常繼續。
    pub async fn ask_with_hint(&self, query: &str, hint: Language) -> Result<ChatReply> {
        let started = Instant::now();
        let full_prompt = prompt::build_prompt(self.knowledge.context(), query);
        tracing::debug!("🤖 Sending prompt to model ({} chars)", full_prompt.len());

        let raw = match self.model.generate(&full_prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("❌ Model call failed: {}; using fallback reply", e);
                let reply = prompt::fallback_reply();
                self.monitor.observe_exchange(reply.lang.code(), started.elapsed());
                return Ok(reply);
            }
        };

        let (text, tagged_lang) = prompt::parse_language_tag(&raw);
        let reply = ChatReply::new(text, tagged_lang.unwrap_or(hint));

        tracing::debug!(
            "🤖 Reply ready ({}, {} chars, tag: {})",
            reply.lang,
            reply.text.len(),
            tagged_lang.is_some()
        );
        self.monitor.observe_exchange(reply.lang.code(), started.elapsed());

        Ok(reply)
    }

    pub fn log_session_stats(&self) {
        self.monitor.log_final_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AssistantError;
    use async_trait::async_trait;

    struct ScriptedModel {
        reply: String,
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(AssistantError::ModelResponseError {
                message: "Model request failed with status: 503".to_string(),
            })
        }
    }

    struct EchoPromptModel;

    #[async_trait]
    impl LanguageModel for EchoPromptModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_string())
        }
    }

    fn engine_with<M: LanguageModel>(model: M) -> AssistantEngine<M> {
        AssistantEngine::new(model, KnowledgeBase::from_text("Banana likes sun.".to_string()))
    }

    #[tokio::test]
    async fn test_tagged_reply_overrides_hint() {
        let engine = engine_with(ScriptedModel {
            reply: "വാഴയ്ക്ക് വെയിൽ വേണം.\n[lang:ml]".to_string(),
        });

        let reply = engine
            .ask_with_hint("does banana like sun?", Language::English)
            .await
            .unwrap();

        assert_eq!(reply.lang, Language::Malayalam);
        assert!(!reply.text.contains("[lang:"));
    }

    #[tokio::test]
    async fn test_untagged_reply_inherits_hint() {
        let engine = engine_with(ScriptedModel {
            reply: "വാഴയ്ക്ക് വെയിൽ വേണം.".to_string(),
        });

        let reply = engine
            .ask_with_hint("വാഴയ്ക്ക് വെയിൽ വേണോ?", Language::Malayalam)
            .await
            .unwrap();

        assert_eq!(reply.lang, Language::Malayalam);
    }

    #[tokio::test]
    async fn test_model_failure_degrades_to_fallback() {
        let engine = engine_with(FailingModel);

        let reply = engine.ask("does banana like sun?").await.unwrap();

        assert_eq!(reply.text, prompt::FALLBACK_REPLY);
        assert_eq!(reply.lang, Language::English);
    }

    #[tokio::test]
    async fn test_prompt_carries_knowledge_context_and_query() {
        let engine = engine_with(EchoPromptModel);

        let reply = engine.ask("how much sun for banana?").await.unwrap();

        assert!(reply.text.contains("Banana likes sun."));
        assert!(reply.text.contains("how much sun for banana?"));
        assert!(reply.text.contains("CONTEXT FROM DOCUMENTS"));
    }
}
