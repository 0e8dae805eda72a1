//! Error types for the Solace domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error enum.

use thiserror::Error;

/// The top-level error type for all Solace operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Language model errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Emotion classifier errors ---
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    // --- Knowledge retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Chat log errors ---
    #[error("Chat log error: {0}")]
    ChatLog(#[from] ChatLogError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Classifier model is loading, retry after {estimated_secs}s")]
    ModelLoading { estimated_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Knowledge base unreadable at {path}: {reason}")]
    KnowledgeBase { path: String, reason: String },

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(#[from] ProviderError),

    #[error("Index is inconsistent: {0}")]
    Index(String),
}

#[derive(Debug, Error)]
pub enum ChatLogError {
    #[error("Failed to open chat log at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to chat log: {0}")]
    Write(#[from] std::io::Error),
}
