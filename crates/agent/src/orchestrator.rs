//! Request orchestrator: one user message in, one therapist reply out.
//!
//! # Flow
//!
//! 1. Classify the message and resolve the emotion
//! 2. Pick the tone directive and few-shot block for its label
//! 3. Retrieve knowledge passages and join them
//! 4. Read the conversation transcript
//! 5. Assemble the prompt and ask the model
//! 6. Post-process the completion
//! 7. Record the turn, then append the chat log
//!
//! Collaborator failures propagate; there are no retries. A classifier
//! answer of unexpected shape is not a failure, it resolves to `unknown`.

use crate::chat_log::FileChatLog;
use crate::prompt::{self, PromptParts};
use crate::tone;
use serde::{Deserialize, Serialize};
use solace_config::AppConfig;
use solace_core::chat_log::{ChatLogSink, LogRecord};
use solace_core::emotion::{Emotion, EmotionClassifier};
use solace_core::memory::ConversationMemory;
use solace_core::provider::{Provider, ProviderRequest};
use solace_core::retrieval::{Retriever, join_passages};
use solace_memory::ConversationWindow;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// The answer to one chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Emotion display string, e.g. `"sadness (0.87)"`
    pub emotion: String,
}

/// Sequences the collaborators into one request/response cycle.
///
/// Built once at startup and shared across requests.
pub struct ChatOrchestrator {
    classifier: Arc<dyn EmotionClassifier>,
    retriever: Arc<dyn Retriever>,
    memory: Arc<dyn ConversationMemory>,
    provider: Arc<dyn Provider>,
    chat_log: Arc<dyn ChatLogSink>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    /// Fail the request when the chat log cannot be written
    strict_log: bool,
}

impl ChatOrchestrator {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier>,
        retriever: Arc<dyn Retriever>,
        memory: Arc<dyn ConversationMemory>,
        provider: Arc<dyn Provider>,
        chat_log: Arc<dyn ChatLogSink>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            retriever,
            memory,
            provider,
            chat_log,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            strict_log: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_strict_log(mut self, strict: bool) -> Self {
        self.strict_log = strict;
        self
    }

    /// Build every collaborator from configuration.
    ///
    /// Loads and indexes the knowledge base, so this is a startup-time call.
    pub async fn from_config(config: &AppConfig) -> solace_core::Result<Self> {
        let router = solace_providers::build_from_config(config);

        let provider = router.default().ok_or_else(|| solace_core::Error::Config {
            message: format!("provider '{}' is not available", config.default_provider),
        })?;

        let embedder = match config.knowledge.embedding_provider.as_str() {
            "none" => None,
            name => Some(router.get(name).ok_or_else(|| solace_core::Error::Config {
                message: format!("embedding provider '{name}' is not available"),
            })?),
        };

        let retriever = solace_memory::build_retriever(&config.knowledge, embedder).await?;
        let classifier = solace_providers::build_classifier(config);
        let memory = Arc::new(ConversationWindow::new(config.memory.window_turns));
        let chat_log = Arc::new(FileChatLog::new(&config.chat_log.path));

        info!(
            provider = provider.name(),
            model = %config.default_model,
            classifier = classifier.name(),
            retriever = retriever.name(),
            window = config.memory.window_turns,
            chat_log = %config.chat_log.path.display(),
            "Chat orchestrator ready"
        );

        Ok(Self::new(
            classifier,
            retriever,
            memory,
            provider,
            chat_log,
            &config.default_model,
        )
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens)
        .with_strict_log(config.chat_log.strict))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Forget the conversation so far.
    pub async fn reset(&self) {
        self.memory.clear().await;
    }

    /// Run one chat request through the pipeline.
    pub async fn handle(&self, user_input: &str) -> solace_core::Result<ChatReply> {
        let span = info_span!("chat", request_id = %Uuid::new_v4());
        self.run(user_input).instrument(span).await
    }

    async fn run(&self, user_input: &str) -> solace_core::Result<ChatReply> {
        let output = self.classifier.classify(user_input).await?;
        let emotion = Emotion::from_output(output);
        let emotion_display = emotion.to_string();
        debug!(emotion = %emotion_display, "Emotion resolved");

        let tone = tone::tone_directive(&emotion.label);
        let few_shot = tone::few_shot_block(&emotion.label);

        let passages = self.retriever.retrieve(user_input).await?;
        let knowledge = join_passages(&passages);
        debug!(passages = passages.len(), retriever = self.retriever.name(), "Knowledge retrieved");

        let transcript = self.memory.transcript().await;

        let prompt = prompt::assemble_prompt(&PromptParts {
            emotion: &emotion_display,
            tone,
            knowledge: &knowledge,
            few_shot,
            transcript: &transcript,
            user_input,
        });

        let mut request = ProviderRequest::prompt(&self.model, prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        let completion = self.provider.complete(request).await?;
        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Model usage"
            );
        }

        let response = prompt::postprocess(&completion.message.content);

        self.memory.record(user_input, &response).await;

        let record = LogRecord {
            user_input: user_input.to_string(),
            emotion: emotion_display.clone(),
            response: response.clone(),
        };
        if let Err(e) = self.chat_log.append(&record).await {
            if self.strict_log {
                return Err(e.into());
            }
            warn!(error = %e, "Chat log write failed, reply still returned");
        }

        info!(emotion = %emotion_display, chars = response.len(), "Chat request complete");

        Ok(ChatReply {
            response,
            emotion: emotion_display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use solace_core::emotion::{ClassifierOutput, EmotionScore};

    struct Harness {
        provider: Arc<RecordingProvider>,
        log: Arc<MemoryChatLog>,
        window: Arc<ConversationWindow>,
        orchestrator: ChatOrchestrator,
    }

    fn harness(classifier: impl EmotionClassifier + 'static, passages: &[&str], completions: &[&str]) -> Harness {
        let provider = Arc::new(RecordingProvider::new(completions));
        let log = Arc::new(MemoryChatLog::default());
        let window = Arc::new(ConversationWindow::new(6));
        let orchestrator = ChatOrchestrator::new(
            Arc::new(classifier),
            Arc::new(FixedRetriever(passages.iter().map(|p| p.to_string()).collect())),
            window.clone(),
            provider.clone(),
            log.clone(),
            "mock-model",
        );
        Harness {
            provider,
            log,
            window,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn recognised_emotion_drives_tone_and_examples() {
        let h = harness(
            FixedClassifier::label("sadness", 0.87),
            &["Loneliness is a signal, not a flaw."],
            &["Therapist: I'm here with you."],
        );

        let reply = h.orchestrator.handle("I feel so alone and hopeless").await.unwrap();
        assert_eq!(reply.emotion, "sadness (0.87)");
        assert_eq!(reply.response, "I'm here with you.");

        let prompt = h.provider.last_prompt();
        assert!(prompt.starts_with("User Emotion: sadness (0.87)\n"));
        assert!(prompt.contains("Respond with warmth, support, and understanding."));
        assert!(prompt.contains(tone::few_shot_block("sadness")));
        assert!(prompt.contains("Loneliness is a signal, not a flaw."));
        assert!(prompt.ends_with("User: I feel so alone and hopeless\nTherapist:"));
    }

    #[tokio::test]
    async fn unrecognised_emotion_falls_back() {
        let h = harness(FixedClassifier::label("surprise", 0.55), &[], &["Oh?"]);

        let reply = h.orchestrator.handle("Guess what happened").await.unwrap();
        assert_eq!(reply.emotion, "surprise (0.55)");

        let prompt = h.provider.last_prompt();
        assert!(prompt.contains("\nRespond with empathy.\n"));
        assert!(prompt.contains(tone::few_shot_block("default")));
    }

    #[tokio::test]
    async fn empty_retrieval_still_completes() {
        let h = harness(FixedClassifier::label("neutral", 0.9), &[], &["Tell me more."]);

        let reply = h.orchestrator.handle("Just checking in").await.unwrap();
        assert_eq!(reply.response, "Tell me more.");
        assert!(h.provider.last_prompt().contains("Helpful therapeutic information:\n\n\n"));
    }

    #[tokio::test]
    async fn echoed_prompt_is_stripped() {
        let h = harness(
            FixedClassifier::label("joy", 0.9),
            &[],
            &["...reasoning...\nTherapist: Hello there."],
        );
        let reply = h.orchestrator.handle("Hi!").await.unwrap();
        assert_eq!(reply.response, "Hello there.");
    }

    #[tokio::test]
    async fn malformed_classifier_output_is_unknown() {
        let h = harness(
            FixedClassifier(ClassifierOutput::Malformed("empty list".into())),
            &[],
            &["I'm listening."],
        );
        let reply = h.orchestrator.handle("hmm").await.unwrap();
        assert_eq!(reply.emotion, "unknown");
        assert!(h.provider.last_prompt().contains("\nRespond with empathy.\n"));
    }

    #[tokio::test]
    async fn ranked_classifier_output_uses_top_label() {
        let h = harness(
            FixedClassifier(ClassifierOutput::Ranked(vec![
                EmotionScore { label: "joy".into(), score: 0.05 },
                EmotionScore { label: "Anger".into(), score: 0.91 },
            ])),
            &[],
            &["That sounds frustrating."],
        );
        let reply = h.orchestrator.handle("Everyone ignores me").await.unwrap();
        assert_eq!(reply.emotion, "anger (0.91)");
        assert!(h.provider.last_prompt().contains("Validate the user's feelings and respond calmly."));
    }

    #[tokio::test]
    async fn turns_feed_the_next_prompt() {
        let h = harness(
            FixedClassifier::label("anxiety", 0.8),
            &[],
            &["Let's breathe together.", "Good, keep going."],
        );

        h.orchestrator.handle("I'm panicking").await.unwrap();
        h.orchestrator.handle("Okay, breathing").await.unwrap();

        let prompts = h.provider.prompts();
        assert!(prompts[0].contains("Conversation so far:\n\nUser: I'm panicking"));
        assert!(prompts[1].contains(
            "Conversation so far:\nHuman: I'm panicking\nAI: Let's breathe together.\nUser: Okay, breathing"
        ));
        assert_eq!(h.window.len().await, 2);
    }

    #[tokio::test]
    async fn every_request_is_logged() {
        let h = harness(FixedClassifier::label("surprise", 0.4), &[], &["Therapist: Wow."]);
        h.orchestrator.handle("I won a prize").await.unwrap();

        let records = h.log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_input, "I won a prize");
        assert_eq!(records[0].emotion, "surprise (0.40)");
        assert_eq!(records[0].response, "Wow.");
    }

    #[tokio::test]
    async fn classifier_failure_propagates() {
        let provider = Arc::new(RecordingProvider::new(&[]));
        let orchestrator = ChatOrchestrator::new(
            Arc::new(FailingClassifier),
            Arc::new(FixedRetriever::empty()),
            Arc::new(ConversationWindow::new(6)),
            provider.clone(),
            Arc::new(MemoryChatLog::default()),
            "mock-model",
        );

        let err = orchestrator.handle("hello").await.unwrap_err();
        assert!(matches!(err, solace_core::Error::Classifier(_)));
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn model_failure_propagates_without_recording() {
        let window = Arc::new(ConversationWindow::new(6));
        let log = Arc::new(MemoryChatLog::default());
        let orchestrator = ChatOrchestrator::new(
            Arc::new(FixedClassifier::label("sadness", 0.7)),
            Arc::new(FixedRetriever::empty()),
            window.clone(),
            Arc::new(FailingProvider),
            log.clone(),
            "mock-model",
        );

        let err = orchestrator.handle("hello").await.unwrap_err();
        assert!(matches!(err, solace_core::Error::Provider(_)));
        assert_eq!(window.len().await, 0);
        assert!(log.records().is_empty());
    }

    #[tokio::test]
    async fn log_failure_is_best_effort_by_default() {
        let orchestrator = ChatOrchestrator::new(
            Arc::new(FixedClassifier::label("joy", 0.9)),
            Arc::new(FixedRetriever::empty()),
            Arc::new(ConversationWindow::new(6)),
            Arc::new(RecordingProvider::new(&["Great!"])),
            Arc::new(MemoryChatLog::failing()),
            "mock-model",
        );
        let reply = orchestrator.handle("I got the job").await.unwrap();
        assert_eq!(reply.response, "Great!");
    }

    #[tokio::test]
    async fn strict_log_failure_fails_request() {
        let orchestrator = ChatOrchestrator::new(
            Arc::new(FixedClassifier::label("joy", 0.9)),
            Arc::new(FixedRetriever::empty()),
            Arc::new(ConversationWindow::new(6)),
            Arc::new(RecordingProvider::new(&["Great!"])),
            Arc::new(MemoryChatLog::failing()),
            "mock-model",
        )
        .with_strict_log(true);

        let err = orchestrator.handle("I got the job").await.unwrap_err();
        assert!(matches!(err, solace_core::Error::ChatLog(_)));
    }

    #[tokio::test]
    async fn reset_clears_the_window() {
        let h = harness(FixedClassifier::label("joy", 0.9), &[], &["Yay."]);
        h.orchestrator.handle("hi").await.unwrap();
        h.orchestrator.reset().await;
        assert_eq!(h.window.len().await, 0);
    }
}
