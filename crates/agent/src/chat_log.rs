//! Append-only chat log sinks.
//!
//! [`FileChatLog`] is the durable, human-readable log of completed requests.
//! [`TracingChatLog`] mirrors records to `tracing` for terminal sessions.

use async_trait::async_trait;
use solace_core::chat_log::{ChatLogSink, LogRecord};
use solace_core::error::ChatLogError;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Appends rendered records to a text file.
///
/// The file (and its parent directory) is created on the first append.
/// The handle sits behind a mutex so each record lands as one contiguous
/// block even under concurrent requests.
pub struct FileChatLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl std::fmt::Debug for FileChatLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileChatLog").field("path", &self.path).finish()
    }
}

impl FileChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&self) -> Result<File, ChatLogError> {
        let open_error = |source| ChatLogError::Open {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(open_error)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(open_error)
    }
}

#[async_trait]
impl ChatLogSink for FileChatLog {
    async fn append(&self, record: &LogRecord) -> Result<(), ChatLogError> {
        let mut guard = self.file.lock().await;

        let file = match guard.take() {
            Some(file) => file,
            None => self.open().await?,
        };
        let file = guard.insert(file);

        file.write_all(record.render().as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "Chat log record appended");
        Ok(())
    }
}

/// Logs each record via `tracing::info!`.
pub struct TracingChatLog;

#[async_trait]
impl ChatLogSink for TracingChatLog {
    async fn append(&self, record: &LogRecord) -> Result<(), ChatLogError> {
        tracing::info!(
            user_input = %record.user_input,
            emotion = %record.emotion,
            response = %record.response,
            "CHAT"
        );
        Ok(())
    }
}
