//! # Solace Core
//!
//! Domain types, collaborator traits, and error definitions for the Solace
//! chat service. This crate has **no framework dependencies**: it defines
//! the domain model every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Each external collaborator (language model, emotion classifier,
//! retriever, conversation memory, chat log) is a trait here.
//! Implementations live in their respective crates, which keeps:
//! - Implementations swappable via configuration
//! - Tests free to inject scripted stand-ins
//! - The dependency graph pointing inward at core

pub mod error;
pub mod message;
pub mod provider;
pub mod emotion;
pub mod retrieval;
pub mod memory;
pub mod chat_log;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use emotion::{ClassifierOutput, Emotion, EmotionClassifier, EmotionScore};
pub use retrieval::{Passage, Retriever};
pub use memory::{ConversationMemory, ConversationTurn};
pub use chat_log::{ChatLogSink, LogRecord};
