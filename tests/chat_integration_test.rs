use httpmock::prelude::*;
use krishi_sakhi::core::prompt;
use krishi_sakhi::domain::ports::ConfigProvider;
use krishi_sakhi::{
    AssistantConfig, AssistantEngine, GeminiModel, KnowledgeBase, Language, LocalDocumentStore,
};
use tempfile::TempDir;

fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }
        ]
    })
}

fn write_knowledge_doc(dir: &TempDir) {
    std::fs::write(
        dir.path().join("pop.txt"),
        "Banana: plant suckers 2 metres apart. Needs good drainage.",
    )
    .unwrap();
}

fn test_config(endpoint: &str, docs_dir: &str) -> AssistantConfig {
    let toml_content = format!(
        r#"
[assistant]
name = "Krishi Sakhi"
version = "1.0"

[model]
endpoint = "{endpoint}"
api_key = "test-key"
temperature = 0.3
retry_attempts = 1
retry_delay_seconds = 0

[knowledge]
base_path = "{docs_dir}"
documents = ["pop.txt"]
"#
    );
    AssistantConfig::from_toml_str(&toml_content).unwrap()
}

#[tokio::test]
async fn test_end_to_end_tagged_malayalam_reply() {
    let temp_dir = TempDir::new().unwrap();
    write_knowledge_doc(&temp_dir);

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.0-flash:generateContent")
            .header("x-goog-api-key", "test-key")
            .body_contains("CONTEXT FROM DOCUMENTS")
            .body_contains("2 metres apart");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply("വാഴ 2 മീറ്റർ അകലത്തിൽ നടുക.\n[lang:ml]"));
    });

    let config = test_config(&server.base_url(), temp_dir.path().to_str().unwrap());

    let store = LocalDocumentStore::new(config.knowledge_base_path().to_string());
    let knowledge = KnowledgeBase::load(&store, config.document_paths())
        .await
        .unwrap();
    assert!(!knowledge.is_empty());

    let model = GeminiModel::from_config(&config).unwrap();
    let engine = AssistantEngine::new(model, knowledge);

    let reply = engine
        .ask_with_hint("എങ്ങനെ വാഴ നടാം?", Language::Malayalam)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(reply.lang, Language::Malayalam);
    assert_eq!(reply.text, "വാഴ 2 മീറ്റർ അകലത്തിൽ നടുക.");
}

#[tokio::test]
async fn test_end_to_end_model_outage_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    write_knowledge_doc(&temp_dir);

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.0-flash:generateContent");
        then.status(503);
    });

    let config = test_config(&server.base_url(), temp_dir.path().to_str().unwrap());

    let store = LocalDocumentStore::new(config.knowledge_base_path().to_string());
    let knowledge = KnowledgeBase::load(&store, config.document_paths())
        .await
        .unwrap();

    let model = GeminiModel::from_config(&config).unwrap();
    let engine = AssistantEngine::new(model, knowledge);

    // The conversation degrades to the canned reply instead of failing.
    let reply = engine.ask("how far apart do I plant banana?").await.unwrap();

    // initial attempt + 1 configured retry
    api_mock.assert_hits(2);
    assert_eq!(reply.text, prompt::FALLBACK_REPLY);
    assert_eq!(reply.lang, Language::English);
}

#[tokio::test]
async fn test_end_to_end_untagged_reply_uses_detected_language() {
    let temp_dir = TempDir::new().unwrap();
    write_knowledge_doc(&temp_dir);

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.0-flash:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply("Plant banana suckers 2 metres apart."));
    });

    let config = test_config(&server.base_url(), temp_dir.path().to_str().unwrap());

    let store = LocalDocumentStore::new(config.knowledge_base_path().to_string());
    let knowledge = KnowledgeBase::load(&store, config.document_paths())
        .await
        .unwrap();

    let model = GeminiModel::from_config(&config).unwrap();
    let engine = AssistantEngine::new(model, knowledge);

    let query = "how far apart do I plant banana?";
    let reply = engine
        .ask_with_hint(query, Language::detect(query))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(reply.lang, Language::English);
    assert_eq!(reply.text, "Plant banana suckers 2 metres apart.");
}

#[tokio::test]
async fn test_knowledge_base_skips_missing_documents() {
    let temp_dir = TempDir::new().unwrap();
    write_knowledge_doc(&temp_dir);

    let store = LocalDocumentStore::new(temp_dir.path().to_str().unwrap().to_string());
    let paths = vec!["pop.txt".to_string(), "missing.pdf".to_string()];

    let knowledge = KnowledgeBase::load(&store, &paths).await.unwrap();

    assert!(!knowledge.is_empty());
    assert_eq!(knowledge.loaded_documents(), &["pop.txt".to_string()]);
    assert!(knowledge.context().contains("good drainage"));
}
