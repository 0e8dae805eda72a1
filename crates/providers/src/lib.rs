//! Collaborator clients for Solace.
//!
//! Language model and embedding providers implement
//! `solace_core::Provider`; emotion classifiers implement
//! `solace_core::EmotionClassifier`. The router builds both from config.

pub mod huggingface;
pub mod lexicon;
pub mod openai_compat;
pub mod router;

pub use huggingface::HuggingFaceClassifier;
pub use lexicon::LexiconClassifier;
pub use openai_compat::OpenAiCompatProvider;
pub use router::{ProviderRouter, build_classifier, build_from_config};
