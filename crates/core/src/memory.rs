//! Conversation memory: a bounded window of recent turns.
//!
//! The window is short-term context only: it lives as long as the process
//! and is never persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said
    pub input: String,

    /// What the model answered, after post-processing
    pub output: String,

    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            created_at: Utc::now(),
        }
    }
}

/// The conversation memory collaborator.
#[async_trait]
pub trait ConversationMemory: Send + Sync {
    /// Append a turn, evicting the oldest once over capacity.
    async fn record(&self, input: &str, output: &str);

    /// The retained turns rendered as a flat transcript.
    async fn transcript(&self) -> String;

    /// Number of retained turns.
    async fn len(&self) -> usize;

    /// Drop every retained turn.
    async fn clear(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serialization() {
        let turn = ConversationTurn::new("I can't sleep", "That sounds exhausting.");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("I can't sleep"));
        assert!(json.contains("created_at"));
    }
}
