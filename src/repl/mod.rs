use std::io::{self, Write};

use crate::core::assistant::AssistantEngine;
use crate::domain::model::Language;
use crate::domain::ports::LanguageModel;
use crate::utils::error::Result;

/// Terminal conversation loop. Ends on `exit` or end-of-input.
pub async fn run<M: LanguageModel>(engine: &AssistantEngine<M>) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("      🌱 Welcome to Krishi Sakhi! 🌱");
    println!("{}", "=".repeat(50));
    println!("Ask your farming questions in English or Malayalam.");
    println!("Type 'exit' to end the conversation.");

    let stdin = io::stdin();
    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF（例如管線輸入結束）
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        // The typed language decides the reply language when the model's
        // reply carries no tag of its own.
        let hint = Language::detect(input);
        tracing::debug!("🗣️ Detected input language: {}", hint);

        let reply = engine.ask_with_hint(input, hint).await?;
        println!("Krishi Sakhi ({}): {}", reply.lang, reply.text);
    }

    engine.log_session_stats();
    println!("\nThank you for using Krishi Sakhi. Have a great day! 🌱");
    Ok(())
}
