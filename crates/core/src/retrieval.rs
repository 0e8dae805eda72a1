//! Retriever trait: ranked passages from a pre-indexed knowledge base.
//!
//! The retriever's ranking is trusted as-is: callers neither deduplicate
//! nor apply a relevance threshold.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::RetrievalError;

/// A passage returned by a retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text
    pub content: String,

    /// File the passage was chunked from
    pub source: String,

    /// Relevance score assigned by the retriever
    #[serde(default)]
    pub score: f32,
}

/// The retriever collaborator.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retriever name (e.g., "vector", "keyword").
    fn name(&self) -> &str;

    /// Return up to the retriever's configured count of passages, best first.
    async fn retrieve(&self, query: &str) -> std::result::Result<Vec<Passage>, RetrievalError>;
}

/// Join passages in ranked order, one per line.
pub fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
