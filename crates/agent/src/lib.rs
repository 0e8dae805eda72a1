//! The chat pipeline for Solace.
//!
//! A request flows **classify → tone → retrieve → transcript → prompt →
//! complete → post-process → record → log**:
//!
//! 1. **Classify** the user message and resolve its emotion
//! 2. **Select** the tone directive and few-shot block for that emotion
//! 3. **Retrieve** knowledge passages for the message
//! 4. **Assemble** the prompt with the conversation transcript
//! 5. **Complete** it with the language model and strip echoed prompt text
//! 6. **Record** the turn in the window and append the chat log
//!
//! There is no loop: each request is one pass.

pub mod chat_log;
pub mod orchestrator;
pub mod prompt;
pub mod tone;

#[cfg(test)]
mod test_helpers;

pub use chat_log::{FileChatLog, TracingChatLog};
pub use orchestrator::{ChatOrchestrator, ChatReply};
pub use prompt::{CUE_TOKEN, PromptParts, assemble_prompt, postprocess};
pub use tone::{few_shot_block, tone_directive};
