//! Scripted collaborators for orchestrator tests.

use async_trait::async_trait;
use solace_core::chat_log::{ChatLogSink, LogRecord};
use solace_core::emotion::{ClassifierOutput, EmotionClassifier, EmotionScore};
use solace_core::error::{ChatLogError, ClassifierError, ProviderError, RetrievalError};
use solace_core::message::Message;
use solace_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use solace_core::retrieval::{Passage, Retriever};
use std::sync::Mutex;

/// Returns a fixed classifier output.
pub struct FixedClassifier(pub ClassifierOutput);

impl FixedClassifier {
    pub fn label(label: &str, score: f32) -> Self {
        Self(ClassifierOutput::Single(EmotionScore {
            label: label.into(),
            score,
        }))
    }
}

#[async_trait]
impl EmotionClassifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn classify(&self, _text: &str) -> Result<ClassifierOutput, ClassifierError> {
        Ok(self.0.clone())
    }
}

/// Always fails with a network error.
pub struct FailingClassifier;

#[async_trait]
impl EmotionClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify(&self, _text: &str) -> Result<ClassifierOutput, ClassifierError> {
        Err(ClassifierError::Network("connection refused".into()))
    }
}

/// Returns the same passages for every query.
pub struct FixedRetriever(pub Vec<String>);

impl FixedRetriever {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

#[async_trait]
impl Retriever for FixedRetriever {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn retrieve(&self, _query: &str) -> Result<Vec<Passage>, RetrievalError> {
        Ok(self
            .0
            .iter()
            .map(|content| Passage {
                content: content.clone(),
                source: "kb.txt".into(),
                score: 1.0,
            })
            .collect())
    }
}

/// A provider that returns scripted completions in order and records
/// every prompt it receives.
pub struct RecordingProvider {
    completions: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingProvider {
    pub fn new(completions: &[&str]) -> Self {
        Self {
            completions: Mutex::new(completions.iter().rev().map(|c| c.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        let completion = self
            .completions
            .lock()
            .unwrap()
            .pop()
            .expect("RecordingProvider: no more completions");

        Ok(ProviderResponse {
            message: Message::assistant(completion),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: request.model,
        })
    }
}

/// Always fails with an API error.
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::ApiError {
            status_code: 500,
            message: "upstream exploded".into(),
        })
    }
}

/// Keeps records in memory; optionally fails every append.
#[derive(Default)]
pub struct MemoryChatLog {
    pub records: Mutex<Vec<LogRecord>>,
    pub fail: bool,
}

impl MemoryChatLog {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatLogSink for MemoryChatLog {
    async fn append(&self, record: &LogRecord) -> Result<(), ChatLogError> {
        if self.fail {
            return Err(ChatLogError::Write(std::io::Error::other("disk full")));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
