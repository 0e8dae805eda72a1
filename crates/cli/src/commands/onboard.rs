//! `solace onboard`: First-time setup.

use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = super::config_path(config_path);

    println!("Solace: First-Time Setup");
    println!("=========================\n");

    if let Some(config_dir) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
            println!("✅ Created config directory: {}", config_dir.display());
        } else {
            println!("  Config directory exists: {}", config_dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, solace_config::AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set GROQ_API_KEY (or add api_key to {})", config_path.display());
    println!("   2. Set HF_API_TOKEN, or set classifier.backend = \"lexicon\" to run offline");
    println!("   3. Put .txt / .md documents in the knowledge_base directory");
    println!("   4. Run: solace chat   or   solace serve\n");

    Ok(())
}
