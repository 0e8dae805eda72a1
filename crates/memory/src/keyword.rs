//! Keyword retriever, used when no embedding provider is configured.

use crate::knowledge::Chunk;
use async_trait::async_trait;
use solace_core::error::RetrievalError;
use solace_core::retrieval::{Passage, Retriever};
use std::collections::HashSet;

/// Terms shorter than this are ignored when scoring.
const MIN_TERM_CHARS: usize = 3;

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Ranks chunks by how many distinct query terms they contain.
pub struct KeywordRetriever {
    chunks: Vec<(Passage, HashSet<String>)>,
    top_k: usize,
}

impl KeywordRetriever {
    pub fn new(chunks: Vec<Chunk>, top_k: usize) -> Self {
        let chunks = chunks
            .into_iter()
            .map(|c| {
                let terms = terms(&c.content);
                let passage = Passage {
                    content: c.content,
                    source: c.source,
                    score: 0.0,
                };
                (passage, terms)
            })
            .collect();
        Self { chunks, top_k }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl Retriever for KeywordRetriever {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, RetrievalError> {
        let query_terms = terms(query);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<Passage> = self
            .chunks
            .iter()
            .filter_map(|(passage, chunk_terms)| {
                let hits = query_terms.intersection(chunk_terms).count();
                (hits > 0).then(|| Passage {
                    score: hits as f32 / query_terms.len() as f32,
                    ..passage.clone()
                })
            })
            .collect();

        // Stable sort keeps knowledge-base order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.top_k);
        Ok(scored)
    }
}
