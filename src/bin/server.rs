use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use krishi_sakhi::config::toml_config::AssistantConfig;
use krishi_sakhi::domain::ports::ConfigProvider;
use krishi_sakhi::server;
use krishi_sakhi::utils::{logger, validation::Validate};
use krishi_sakhi::{AssistantEngine, GeminiModel, KnowledgeBase, LocalDocumentStore};

#[derive(Parser)]
#[command(name = "krishi-sakhi-server")]
#[command(about = "HTTP API for the Krishi Sakhi farming assistant")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "krishi-sakhi.toml")]
    config: String,

    /// Override the bind address from the config
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    logger::init_server_logger();

    tracing::info!("🚀 Starting Krishi Sakhi API server");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = AssistantConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("Loading knowledge base from {:?}...", config.document_paths());
    let store = LocalDocumentStore::new(config.knowledge_base_path().to_string());
    let knowledge = KnowledgeBase::load(&store, config.document_paths()).await?;
    if knowledge.is_empty() {
        // 與終端機版不同：服務照常啟動，僅靠模型的一般知識回答
        tracing::warn!("⚠️ Knowledge base is empty; answers will rely on general knowledge only");
    } else {
        tracing::info!("Knowledge base loaded successfully.");
    }

    let model = GeminiModel::from_config(&config)?;
    let engine = Arc::new(AssistantEngine::new_with_monitoring(
        model,
        knowledge,
        config.monitoring_enabled(),
    ));

    let app = server::build_app(engine, config.allowed_origin())?;

    let bind = args
        .bind
        .unwrap_or_else(|| config.server_bind().to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
