//! Rolling conversation window: the last *k* turns, oldest evicted first.

use async_trait::async_trait;
use solace_core::memory::{ConversationMemory, ConversationTurn};
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// A bounded FIFO of conversation turns.
///
/// Each `record` and `transcript` call holds the lock for its whole
/// duration, so a reader never sees a half-applied eviction.
pub struct ConversationWindow {
    capacity: usize,
    turns: RwLock<VecDeque<ConversationTurn>>,
}

impl ConversationWindow {
    /// A window keeping at most `capacity` turns (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            turns: RwLock::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the retained turns, oldest first.
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.read().await.iter().cloned().collect()
    }
}

#[async_trait]
impl ConversationMemory for ConversationWindow {
    async fn record(&self, input: &str, output: &str) {
        let mut turns = self.turns.write().await;
        turns.push_back(ConversationTurn::new(input, output));
        while turns.len() > self.capacity {
            turns.pop_front();
        }
    }

    /// `Human: ...\nAI: ...` per turn, turns joined by a newline.
    async fn transcript(&self) -> String {
        self.turns
            .read()
            .await
            .iter()
            .map(|t| format!("Human: {}\nAI: {}", t.input, t.output))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    async fn clear(&self) {
        self.turns.write().await.clear();
    }
}
