//! Static tone directives and few-shot example blocks, keyed by emotion label.

/// Directive used for any label without its own entry.
pub const DEFAULT_TONE: &str = "Respond with empathy.";

/// Key of the few-shot block used for any label without its own entry.
pub const DEFAULT_FEW_SHOT: &str = "default";

const TONES: &[(&str, &str)] = &[
    ("sadness", "Respond with warmth, support, and understanding."),
    ("anger", "Validate the user's feelings and respond calmly."),
    ("anxiety", "Respond reassuringly and suggest calming strategies."),
    ("joy", "Celebrate the moment and encourage continued growth."),
    ("neutral", "Maintain a supportive and grounded tone."),
];

const FEW_SHOTS: &[(&str, &str)] = &[
    (
        "anxiety",
        "
User Emotion: anxiety
User: I've been feeling really anxious about work lately.
Therapist: That sounds overwhelming. Work stress can take a huge toll. Would you like to talk about what's been triggering that anxiety?

User: I can't sleep because I keep worrying about everything.
Therapist: Sleep troubles are common when we're anxious. Let's talk about what's been looping in your mind — maybe we can create a space for calm.
",
    ),
    (
        "sadness",
        "
User Emotion: sadness
User: I'm just feeling so alone.
Therapist: I'm really sorry you're feeling this way. You're not alone. Would you be open to exploring what's been making you feel this way?
",
    ),
    (
        "overthinking",
        "
User Emotion: overthinking
User: I can't stop overthinking everything.
Therapist: It sounds like your mind is constantly running. Overthinking can be exhausting. Let's try to unpack what's most on your mind right now.
",
    ),
    (
        "anger",
        "
User Emotion: anger
User: I'm angry all the time and I don't know why.
Therapist: It's okay to feel angry — it's a valid emotion. Let's try to understand where that anger might be coming from and what's triggering it.
",
    ),
    (
        "hopelessness",
        "
User Emotion: hopelessness
User: I feel stuck and hopeless.
Therapist: Feeling stuck can be paralyzing. You're not alone in this, and things can shift. Let's try to take a small step together today.
",
    ),
    (
        "guilt",
        "
User Emotion: guilt
User: I feel like I'm a burden to everyone.
Therapist: That sounds like such a heavy feeling. You're not a burden. Let's explore where this guilt is coming from and how we can release it.
",
    ),
    (
        "fear",
        "
User Emotion: fear
User: I'm scared I'll never get better.
Therapist: That fear is completely understandable. Healing isn't linear, but progress is always possible. I'm here with you, one step at a time.
",
    ),
    (
        "joy",
        "
User Emotion: joy
User: I'm finally starting to feel like myself again!
Therapist: That's wonderful to hear! Celebrating those moments is so important. What's been helping lately?
",
    ),
    (
        "grief",
        "
User Emotion: grief
User: I miss the person I used to be.
Therapist: That's a powerful feeling. Grieving our past selves is very real. Let's gently explore what's changed and how you're feeling about it.
",
    ),
    (
        "shame",
        "
User Emotion: shame
User: I hate the way I look.
Therapist: I'm really sorry you're feeling that way. It's so easy to be harsh on ourselves. Let's explore how you see yourself and why.
",
    ),
    (
        "confusion",
        "
User Emotion: confusion
User: I don't know what I'm doing with my life.
Therapist: That uncertainty can be really distressing. You're not alone — let's figure things out together, one piece at a time.
",
    ),
    (
        "trauma",
        "
User Emotion: trauma
User: I keep remembering what happened and I can't move on.
Therapist: That sounds incredibly painful. Traumatic memories can linger. I'm here to listen, and we can work through it at your pace.
",
    ),
    (
        DEFAULT_FEW_SHOT,
        "
User: I just feel off lately.
Therapist: Thank you for opening up. Would you like to talk more about what's been bothering you?
",
    ),
];

fn lookup(table: &'static [(&'static str, &'static str)], label: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == label).map(|(_, value)| *value)
}

/// Tone directive for a normalised label, falling back to [`DEFAULT_TONE`].
pub fn tone_directive(label: &str) -> &'static str {
    lookup(TONES, label).unwrap_or(DEFAULT_TONE)
}

/// Few-shot block for a normalised label, falling back to the default block.
pub fn few_shot_block(label: &str) -> &'static str {
    lookup(FEW_SHOTS, label)
        .or_else(|| lookup(FEW_SHOTS, DEFAULT_FEW_SHOT))
        .unwrap_or_default()
}

/// Labels with a dedicated tone directive.
pub fn toned_labels() -> impl Iterator<Item = &'static str> {
    TONES.iter().map(|(label, _)| *label)
}

/// Labels with a dedicated few-shot block (excluding the default).
pub fn few_shot_labels() -> impl Iterator<Item = &'static str> {
    FEW_SHOTS
        .iter()
        .map(|(label, _)| *label)
        .filter(|label| *label != DEFAULT_FEW_SHOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_toned_label_has_its_own_directive() {
        for label in toned_labels() {
            let directive = tone_directive(label);
            assert_ne!(directive, DEFAULT_TONE, "{label} fell back");
            assert!(!directive.is_empty());
        }
        assert_eq!(
            tone_directive("sadness"),
            "Respond with warmth, support, and understanding."
        );
    }

    #[test]
    fn unknown_labels_fall_back_to_empathy() {
        for label in ["surprise", "disgust", "", "unknown", "Sadness"] {
            assert_eq!(tone_directive(label), DEFAULT_TONE);
        }
    }

    #[test]
    fn every_few_shot_label_has_its_own_block() {
        let default_block = few_shot_block(DEFAULT_FEW_SHOT);
        for label in few_shot_labels() {
            let block = few_shot_block(label);
            assert_ne!(block, default_block, "{label} fell back");
            assert!(block.contains(&format!("User Emotion: {label}")));
        }
    }

    #[test]
    fn unknown_labels_fall_back_to_default_block() {
        let default_block = few_shot_block(DEFAULT_FEW_SHOT);
        assert!(default_block.contains("I just feel off lately."));
        for label in ["surprise", "", "neutral", "unknown"] {
            assert_eq!(few_shot_block(label), default_block);
        }
    }

    #[test]
    fn table_sizes() {
        assert_eq!(toned_labels().count(), 5);
        assert_eq!(few_shot_labels().count(), 12);
    }
}
