use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::core::assistant::AssistantEngine;
use crate::domain::model::Language;
use crate::domain::ports::LanguageModel;
use crate::utils::error::{AssistantError, Result};

// -------------------------
// Wire DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub lang: Language,
}

/// Assemble the router. `allowed_origin` restricts cross-origin access to a
/// single frontend; `None` leaves CORS handling off.
pub fn build_app<M: LanguageModel + 'static>(
    engine: Arc<AssistantEngine<M>>,
    allowed_origin: Option<&str>,
) -> Result<Router> {
    let mut app = Router::new()
        .route("/chat", post(chat::<M>))
        .route("/health", get(health))
        .layer(Extension(engine));

    if let Some(origin) = allowed_origin {
        app = app.layer(cors_layer(origin)?);
    }

    Ok(app)
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin_value = origin.parse::<HeaderValue>().map_err(|_| {
        AssistantError::InvalidConfigValueError {
            field: "server.allowed_origin".to_string(),
            value: origin.to_string(),
            reason: "not a valid origin header value".to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin_value)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

async fn chat<M: LanguageModel + 'static>(
    Extension(engine): Extension<Arc<AssistantEngine<M>>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let query = match request.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return json_error(StatusCode::BAD_REQUEST, "no_query", "No query provided"),
    };

    tracing::debug!("💬 /chat query received ({} chars)", query.len());

    match engine.ask(&query).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: reply.text,
                lang: reply.lang,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("❌ /chat failed: {}", e);
            json_error(StatusCode::BAD_GATEWAY, "model_error", e.user_friendly_message())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
