use std::sync::Arc;

use async_trait::async_trait;
use krishi_sakhi::core::prompt;
use krishi_sakhi::domain::ports::LanguageModel;
use krishi_sakhi::server::build_app;
use krishi_sakhi::utils::error::AssistantError;
use krishi_sakhi::{AssistantEngine, KnowledgeBase, Result};

const ALLOWED_ORIGIN: &str = "https://farm.example.dev";

struct ScriptedModel {
    reply: String,
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}

struct OfflineModel;

#[async_trait]
impl LanguageModel for OfflineModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AssistantError::ModelResponseError {
            message: "Model request failed with status: 503".to_string(),
        })
    }
}

async fn spawn_app<M: LanguageModel + 'static>(model: M) -> String {
    let knowledge = KnowledgeBase::from_text("Banana: plant 2 metres apart.".to_string());
    let engine = Arc::new(AssistantEngine::new(model, knowledge));

    let app = build_app(engine, Some(ALLOWED_ORIGIN)).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_chat_returns_reply_and_language() {
    let base = spawn_app(ScriptedModel {
        reply: "വാഴ 2 മീറ്റർ അകലത്തിൽ നടുക.\n[lang:ml]".to_string(),
    })
    .await;

    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&serde_json::json!({"query": "എങ്ങനെ വാഴ നടാം?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], "വാഴ 2 മീറ്റർ അകലത്തിൽ നടുക.");
    assert_eq!(body["lang"], "ml");
}

#[tokio::test]
async fn test_chat_without_query_is_bad_request() {
    let base = spawn_app(ScriptedModel {
        reply: "unused".to_string(),
    })
    .await;

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/chat"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No query provided");

    // Whitespace-only counts as missing too.
    let response = client
        .post(format!("{base}/chat"))
        .json(&serde_json::json!({"query": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_chat_model_outage_still_answers() {
    let base = spawn_app(OfflineModel).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&serde_json::json!({"query": "how to plant banana?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], prompt::FALLBACK_REPLY);
    assert_eq!(body["lang"], "en");
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_app(ScriptedModel {
        reply: "unused".to_string(),
    })
    .await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let base = spawn_app(ScriptedModel {
        reply: "unused".to_string(),
    })
    .await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/chat"))
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}
