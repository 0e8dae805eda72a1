//! Provider router: builds the configured collaborators.
//!
//! Handles provider creation and lookup by name, and picks the emotion
//! classifier backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use solace_core::emotion::EmotionClassifier;
use solace_core::provider::Provider;
use crate::huggingface::HuggingFaceClassifier;
use crate::lexicon::LexiconClassifier;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names.
    pub fn list(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }
}

/// Build providers from configuration.
///
/// Registers every `[providers.*]` entry, the default provider, and the
/// embedding provider named by `knowledge.embedding_provider` (unless it
/// is `"none"`).
pub fn build_from_config(config: &solace_config::AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));

        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::with_timeout(name, base_url, api_key, timeout)),
        );
    }

    let mut ensure = |name: &str| {
        if router.get(name).is_none() {
            let api_key = config.api_key.clone().unwrap_or_default();
            router.register(
                name.to_string(),
                Arc::new(OpenAiCompatProvider::with_timeout(
                    name,
                    default_base_url(name),
                    api_key,
                    timeout,
                )),
            );
        }
    };

    // Ensure the default provider exists (even if not explicitly configured)
    ensure(&config.default_provider);

    if config.knowledge.embedding_provider != "none" {
        ensure(&config.knowledge.embedding_provider);
    }

    router
}

/// Build the emotion classifier named by `classifier.backend`.
pub fn build_classifier(config: &solace_config::AppConfig) -> Arc<dyn EmotionClassifier> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let classifier = &config.classifier;

    match classifier.backend.as_str() {
        "lexicon" => Arc::new(LexiconClassifier),
        _ => match &classifier.api_url {
            Some(url) => Arc::new(HuggingFaceClassifier::with_url(
                url.clone(),
                classifier.api_token.clone(),
                timeout,
            )),
            None => Arc::new(HuggingFaceClassifier::new(
                &classifier.model,
                classifier.api_token.clone(),
                timeout,
            )),
        },
    }
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "groq" => "https://api.groq.com/openai/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "tei" => "http://localhost:8080/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
