//! Chat log: the append-only audit trail of completed requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ChatLogError;

/// One completed request as it is written to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub user_input: String,
    /// Emotion display string, e.g. `"sadness (0.87)"`
    pub emotion: String,
    pub response: String,
}

impl LogRecord {
    /// Human-readable block: blank line, then `User:`, `Emotion:`, `Therapist:`.
    pub fn render(&self) -> String {
        format!(
            "\nUser: {}\nEmotion: {}\nTherapist: {}\n",
            self.user_input, self.emotion, self.response
        )
    }
}

/// Where log records go.
#[async_trait]
pub trait ChatLogSink: Send + Sync {
    async fn append(&self, record: &LogRecord) -> std::result::Result<(), ChatLogError>;
}
