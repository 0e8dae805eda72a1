//! Conversation memory and knowledge retrieval for Solace.
//!
//! - [`ConversationWindow`]: the rolling window of recent turns
//! - [`knowledge`]: loading and chunking the knowledge base
//! - [`VectorRetriever`] / [`KeywordRetriever`]: ranked passages for a query

pub mod keyword;
pub mod knowledge;
pub mod vector;
pub mod window;

pub use keyword::KeywordRetriever;
pub use knowledge::{Chunk, Document, extract_sentences, load_documents, split_documents, split_text};
pub use vector::{VectorRetriever, cosine_similarity, vector_search};
pub use window::ConversationWindow;

use solace_config::KnowledgeConfig;
use solace_core::error::RetrievalError;
use solace_core::provider::Provider;
use solace_core::retrieval::Retriever;
use std::sync::Arc;
use tracing::info;

/// Load, chunk, and index the knowledge base.
///
/// With an embedding provider the chunks are embedded into a
/// [`VectorRetriever`]; without one a [`KeywordRetriever`] is used.
pub async fn build_retriever(
    config: &KnowledgeConfig,
    embedder: Option<Arc<dyn Provider>>,
) -> Result<Arc<dyn Retriever>, RetrievalError> {
    let dir = config.dir.clone();
    let (chunk_size, chunk_overlap) = (config.chunk_size, config.chunk_overlap);
    let (documents, chunks) = tokio::task::spawn_blocking(move || {
        let documents = load_documents(&dir)?;
        let chunks = split_documents(&documents, chunk_size, chunk_overlap);
        Ok::<_, RetrievalError>((documents.len(), chunks))
    })
    .await
    .map_err(|e| RetrievalError::KnowledgeBase {
        path: config.dir.display().to_string(),
        reason: e.to_string(),
    })??;

    info!(
        dir = %config.dir.display(),
        documents,
        chunks = chunks.len(),
        "Knowledge base loaded"
    );

    match embedder {
        Some(provider) => {
            let retriever =
                VectorRetriever::build(provider, &config.embedding_model, chunks, config.top_k).await?;
            Ok(Arc::new(retriever))
        }
        None => Ok(Arc::new(KeywordRetriever::new(chunks, config.top_k))),
    }
}
