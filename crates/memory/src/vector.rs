//! Embedding-backed retrieval over knowledge chunks.
//!
//! Chunks are embedded once at startup through the configured provider's
//! `/embeddings` endpoint; each query is embedded on demand and ranked by
//! cosine similarity.

use crate::knowledge::Chunk;
use async_trait::async_trait;
use solace_core::error::RetrievalError;
use solace_core::provider::{EmbeddingRequest, Provider};
use solace_core::retrieval::{Passage, Retriever};
use std::sync::Arc;
use tracing::{debug, info};

/// Inputs per embedding request while indexing.
const EMBED_BATCH_SIZE: usize = 64;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// A chunk together with its embedding.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub passage: Passage,
    pub embedding: Vec<f32>,
}

/// Rank indexed chunks by cosine similarity to a query embedding.
///
/// Returns at most `limit` passages, best first, with `score` set to the
/// similarity. Equal scores keep index order.
pub fn vector_search(index: &[IndexedChunk], query_embedding: &[f32], limit: usize) -> Vec<Passage> {
    let mut scored: Vec<(f32, &IndexedChunk)> = index
        .iter()
        .map(|entry| (cosine_similarity(&entry.embedding, query_embedding), entry))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
        .into_iter()
        .map(|(score, entry)| Passage {
            score,
            ..entry.passage.clone()
        })
        .collect()
}

/// Retriever over an in-memory embedding index.
pub struct VectorRetriever {
    provider: Arc<dyn Provider>,
    model: String,
    index: Vec<IndexedChunk>,
    top_k: usize,
}

impl std::fmt::Debug for VectorRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorRetriever")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("chunks", &self.index.len())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl VectorRetriever {
    /// Embed every chunk and build the index.
    pub async fn build(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        chunks: Vec<Chunk>,
        top_k: usize,
    ) -> Result<Self, RetrievalError> {
        let model = model.into();
        let mut index = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let response = provider
                .embed(EmbeddingRequest {
                    model: model.clone(),
                    inputs: batch.iter().map(|c| c.content.clone()).collect(),
                })
                .await?;

            if response.embeddings.len() != batch.len() {
                return Err(RetrievalError::Index(format!(
                    "expected {} embeddings, provider returned {}",
                    batch.len(),
                    response.embeddings.len()
                )));
            }

            index.extend(batch.iter().zip(response.embeddings).map(|(chunk, embedding)| {
                IndexedChunk {
                    passage: Passage {
                        content: chunk.content.clone(),
                        source: chunk.source.clone(),
                        score: 0.0,
                    },
                    embedding,
                }
            }));
        }

        info!(
            provider = provider.name(),
            model = %model,
            chunks = index.len(),
            "Knowledge index built"
        );

        Ok(Self {
            provider,
            model,
            index,
            top_k,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    fn name(&self) -> &str {
        "vector"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, RetrievalError> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.model.clone(),
                inputs: vec![query.to_string()],
            })
            .await?;

        let query_embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Index("no embedding returned for query".into()))?;

        let passages = vector_search(&self.index, &query_embedding, self.top_k);
        debug!(returned = passages.len(), "Vector retrieval complete");
        Ok(passages)
    }
}
