//! Knowledge base loading and chunking.
//!
//! Documents are the `.txt` / `.md` files of one directory, read in file
//! name order. Each document is split into overlapping chunks that prefer
//! paragraph, then line, then sentence, then word boundaries.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use solace_core::error::RetrievalError;
use std::path::Path;
use tracing::{debug, warn};

/// Separators tried in order when a piece is still too long.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];

/// Sentence pool bounds (exclusive), in characters.
const MIN_SENTENCE_CHARS: usize = 8;
const MAX_SENTENCE_CHARS: usize = 200;

/// A source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File name the document was read from
    pub source: String,
    pub content: String,
}

/// A chunk of a document, ready for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    /// Position of the chunk within its document
    pub index: usize,
    pub content: String,
}

fn is_knowledge_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt") || e.eq_ignore_ascii_case("md"))
}

/// Load every `.txt` / `.md` file in `dir`.
///
/// A missing directory yields no documents (with a warning) so the
/// service can still run without a knowledge base.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, RetrievalError> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "Knowledge base directory not found, retrieval will be empty");
        return Ok(Vec::new());
    }

    let unreadable = |reason: String| RetrievalError::KnowledgeBase {
        path: dir.display().to_string(),
        reason,
    };

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| unreadable(e.to_string()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_knowledge_file(p))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|e| RetrievalError::KnowledgeBase {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        documents.push(Document { source, content });
    }

    debug!(dir = %dir.display(), count = documents.len(), "Knowledge documents loaded");
    Ok(documents)
}

/// Split every document into chunks.
pub fn split_documents(documents: &[Document], chunk_size: usize, chunk_overlap: usize) -> Vec<Chunk> {
    documents
        .iter()
        .flat_map(|doc| {
            split_text(&doc.content, chunk_size, chunk_overlap)
                .into_iter()
                .enumerate()
                .map(|(index, content)| Chunk {
                    source: doc.source.clone(),
                    index,
                    content,
                })
        })
        .collect()
}

/// Split `text` into trimmed chunks of at most `chunk_size` characters,
/// each starting with up to `chunk_overlap` characters carried over from
/// the end of the previous chunk.
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let pieces = split_pieces(text, chunk_size, SEPARATORS);

    let mut chunks = Vec::new();
    let mut window: Vec<String> = Vec::new();
    let mut window_len = 0;

    for piece in pieces {
        let len = piece.chars().count();

        if window_len + len > chunk_size && !window.is_empty() {
            push_chunk(&mut chunks, &window);
            // Keep a tail for overlap, small enough to fit the next piece.
            while window_len > chunk_overlap || (window_len > 0 && window_len + len > chunk_size) {
                let dropped = window.remove(0);
                window_len -= dropped.chars().count();
            }
        }

        window_len += len;
        window.push(piece);
    }

    if !window.is_empty() {
        push_chunk(&mut chunks, &window);
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, window: &[String]) {
    let chunk = window.concat().trim().to_string();
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
}

/// Break `text` into pieces no longer than `size`, keeping separators
/// attached so concatenating the pieces restores the text.
fn split_pieces(text: &str, size: usize, separators: &[&str]) -> Vec<String> {
    if text.chars().count() <= size {
        return vec![text.to_string()];
    }

    let Some(pos) = separators.iter().position(|sep| text.contains(sep)) else {
        return hard_split(text, size);
    };
    let finer = &separators[pos + 1..];

    text.split_inclusive(separators[pos])
        .flat_map(|part| {
            if part.chars().count() <= size {
                vec![part.to_string()]
            } else {
                split_pieces(part, size, finer)
            }
        })
        .collect()
}

fn hard_split(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(size).map(|c| c.iter().collect()).collect()
}

/// Extract candidate sentences for an embedding-training sentence pool.
///
/// Splits on a period followed by whitespace or on runs of newlines, trims,
/// and keeps sentences strictly between 8 and 200 characters.
pub fn extract_sentences(text: &str) -> Vec<String> {
    let boundary = match Regex::new(r"\.\s+|\n+") {
        Ok(re) => re,
        Err(e) => {
            warn!(error = %e, "Sentence boundary pattern failed to compile");
            return Vec::new();
        }
    };

    boundary
        .split(text)
        .map(str::trim)
        .filter(|s| {
            let len = s.chars().count();
            len > MIN_SENTENCE_CHARS && len < MAX_SENTENCE_CHARS
        })
        .map(String::from)
        .collect()
}
