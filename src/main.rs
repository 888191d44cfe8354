use clap::Parser;
use krishi_sakhi::config::toml_config::AssistantConfig;
use krishi_sakhi::domain::ports::ConfigProvider;
use krishi_sakhi::repl;
use krishi_sakhi::utils::error::{AssistantError, ErrorSeverity};
use krishi_sakhi::utils::{logger, validation::Validate};
use krishi_sakhi::{AssistantEngine, CliConfig, GeminiModel, KnowledgeBase, LocalDocumentStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // .env 先載入，API key 才能從環境解析
    dotenvy::dotenv().ok();
    logger::init_cli_logger(config.verbose);

    tracing::info!("🌱 Starting Krishi Sakhi");
    config.resolve_api_key();

    let monitor = config.monitor;
    let dry_run = config.dry_run;

    let result = if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        match AssistantConfig::from_file(&path) {
            Ok(file_config) => {
                let monitor = monitor || file_config.monitoring_enabled();
                run_chat(file_config, monitor, dry_run).await
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML");
                std::process::exit(1);
            }
        }
    } else {
        run_chat(config, monitor, dry_run).await
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_chat<C: ConfigProvider + Validate>(
    config: C,
    monitor_enabled: bool,
    dry_run: bool,
) -> krishi_sakhi::Result<()> {
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    if dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    if monitor_enabled {
        tracing::info!("🔍 Session monitoring enabled");
    }

    let store = LocalDocumentStore::new(config.knowledge_base_path().to_string());
    let knowledge = KnowledgeBase::load(&store, config.document_paths()).await?;
    if knowledge.is_empty() {
        return Err(AssistantError::EmptyKnowledgeError {
            message: "Could not extract any text from the provided documents".to_string(),
        });
    }

    let model = GeminiModel::from_config(&config)?;
    let engine = AssistantEngine::new_with_monitoring(model, knowledge, monitor_enabled);

    repl::run(&engine).await
}

fn display_config_summary<C: ConfigProvider>(config: &C) {
    println!("📋 Configuration Summary:");
    println!("  Model: {} @ {}", config.model_name(), config.api_endpoint());
    println!("  Temperature: {}", config.temperature());
    println!(
        "  Timeout: {}s, Retries: {} (delay {}s)",
        config.timeout_seconds(),
        config.retry_attempts(),
        config.retry_delay_seconds()
    );
    println!("  Knowledge base path: {}", config.knowledge_base_path());
    println!("  Documents:");
    for doc in config.document_paths() {
        let exists = std::path::Path::new(config.knowledge_base_path())
            .join(doc)
            .exists();
        let marker = if exists { "✅" } else { "❌ (not found)" };
        println!("    - {} {}", doc, marker);
    }

    println!();
    println!("✅ Dry run complete. Remove --dry-run to start chatting.");
}
