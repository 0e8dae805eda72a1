//! `solace chat`: Interactive or single-message chat mode.

use solace_agent::ChatOrchestrator;
use solace_config::AppConfig;
use std::io::Write;
use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(config_path: Option<&Path>, message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    // Fail early with setup instructions when no key is configured
    if !config.has_api_key() && config.default_provider != "ollama" {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    SOLACE_API_KEY  (generic)");
        eprintln!("    GROQ_API_KEY    (for Groq, the default provider)");
        eprintln!("    OPENAI_API_KEY  (for OpenAI)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let orchestrator = ChatOrchestrator::from_config(&config).await?;

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let reply = orchestrator.handle(&msg).await?;
        eprint!("\r              \r");
        eprintln!("  [{}]", reply.emotion);
        println!("{}", reply.response);
        return Ok(());
    }

    println!();
    println!("  Solace: Interactive Mode");
    println!();
    println!("  Provider:    {}", config.default_provider);
    println!("  Model:       {}", orchestrator.model());
    println!("  Classifier:  {}", config.classifier.backend);
    println!("  Window:      {} turns", config.memory.window_turns);
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type '/reset' to forget the conversation, 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "exit" | "quit" | "/exit" | "/quit" | ":q" => break,
            "/reset" => {
                orchestrator.reset().await;
                println!("  (conversation cleared)");
                continue;
            }
            _ => {}
        }

        eprint!("  ...");
        match orchestrator.handle(line).await {
            Ok(reply) => {
                eprint!("\r     \r");
                println!();
                println!("  [{}]", reply.emotion);
                for text in reply.response.lines() {
                    println!("  Therapist > {text}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Take care.");
    println!();

    Ok(())
}
