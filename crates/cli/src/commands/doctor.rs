//! `solace doctor`: Diagnose configuration and collaborators.

use solace_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Solace Doctor: System Diagnostics");
    println!("=====================================\n");

    let mut issues = 0;

    let path = super::config_path(config_path);
    if !path.exists() {
        println!("  ⚠️  No config file at {}, using defaults (run `solace onboard`)", path.display());
        issues += 1;
    }

    let config = match AppConfig::load_with_env(&path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config and re-run doctor.");
            return Ok(());
        }
    };

    // Language model
    if config.has_api_key() {
        println!("  ✅ API key configured for '{}'", config.default_provider);
    } else {
        println!("  ⚠️  No API key for '{}', set GROQ_API_KEY or SOLACE_API_KEY", config.default_provider);
        issues += 1;
    }

    let router = solace_providers::build_from_config(&config);
    match router.default() {
        Some(provider) => match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
            Ok(false) => {
                println!("  ⚠️  Provider '{}' answered but rejected the request", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                issues += 1;
            }
        },
        None => {
            println!("  ❌ Provider '{}' not available", config.default_provider);
            issues += 1;
        }
    }

    // Emotion classifier
    match config.classifier.backend.as_str() {
        "huggingface" if config.classifier.api_token.is_none() && config.classifier.api_url.is_none() => {
            println!("  ⚠️  No HF_API_TOKEN, hosted classifier requests may be rejected");
            issues += 1;
        }
        backend => println!("  ✅ Classifier backend: {backend}"),
    }

    // Knowledge base
    match solace_memory::load_documents(&config.knowledge.dir) {
        Ok(docs) if docs.is_empty() => {
            println!("  ⚠️  Knowledge base {} has no documents", config.knowledge.dir.display());
            issues += 1;
        }
        Ok(docs) => {
            let chunks = solace_memory::split_documents(
                &docs,
                config.knowledge.chunk_size,
                config.knowledge.chunk_overlap,
            );
            println!(
                "  ✅ Knowledge base: {} documents, {} chunks ({} retrieval)",
                docs.len(),
                chunks.len(),
                if config.knowledge.embedding_provider == "none" { "keyword" } else { "vector" }
            );
        }
        Err(e) => {
            println!("  ❌ Knowledge base unreadable: {e}");
            issues += 1;
        }
    }

    // Chat log
    let log_dir = config
        .chat_log
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    match std::fs::create_dir_all(log_dir) {
        Ok(()) if !is_read_only(log_dir) => {
            println!("  ✅ Chat log writable: {}", config.chat_log.path.display());
        }
        Ok(()) => {
            println!("  ❌ Chat log directory is read-only: {}", log_dir.display());
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Chat log directory cannot be created: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

fn is_read_only(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|m| m.permissions().readonly())
        .unwrap_or(true)
}
