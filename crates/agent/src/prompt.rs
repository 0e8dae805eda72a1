//! Prompt assembly and completion post-processing.
//!
//! The prompt always ends with [`CUE_TOKEN`]; [`postprocess`] relies on that
//! to strip any echoed prompt text from the model's completion.

/// Marks where the model's answer begins.
pub const CUE_TOKEN: &str = "Therapist:";

/// Everything that goes into one prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptParts<'a> {
    /// Emotion display string, e.g. `"sadness (0.87)"`
    pub emotion: &'a str,
    pub tone: &'a str,
    /// Retrieved passages, already joined
    pub knowledge: &'a str,
    pub few_shot: &'a str,
    /// Prior turns
    pub transcript: &'a str,
    pub user_input: &'a str,
}

/// Compose the prompt. Part order is fixed and the cue token comes last.
pub fn assemble_prompt(parts: &PromptParts<'_>) -> String {
    format!(
        "User Emotion: {emotion}\n{tone}\nHelpful therapeutic information:\n{knowledge}\n\n\
         {few_shot}\n\
         Conversation so far:\n{transcript}\n\
         User: {input}\n{CUE_TOKEN}",
        emotion = parts.emotion,
        tone = parts.tone,
        knowledge = parts.knowledge,
        few_shot = parts.few_shot,
        transcript = parts.transcript,
        input = parts.user_input,
    )
}

/// Keep only the text after the last cue token, trimmed. Without a cue
/// token the whole completion is kept, trimmed.
pub fn postprocess(completion: &str) -> String {
    match completion.rfind(CUE_TOKEN) {
        Some(pos) => completion[pos + CUE_TOKEN.len()..].trim().to_string(),
        None => completion.trim().to_string(),
    }
}
