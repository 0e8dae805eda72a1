pub mod chat;
pub mod doctor;
pub mod extract_sentences;
pub mod onboard;
pub mod serve;

use solace_config::AppConfig;
use std::path::{Path, PathBuf};

/// Config file path: the `--config` override or `~/.solace/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load config with environment overrides applied.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = config_path(explicit);
    AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}").into())
}
