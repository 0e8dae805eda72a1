//! Offline emotion classifier using keyword heuristics.
//!
//! No model required, fast and deterministic. Useful for local runs
//! without a Hugging Face token and for tests. Always answers in the
//! single-record shape.

use async_trait::async_trait;
use solace_core::emotion::{ClassifierOutput, EmotionClassifier, EmotionScore};
use solace_core::error::ClassifierError;

/// Cue phrases per label, matched as whole words against the lower-cased input.
const CUES: &[(&str, &[&str])] = &[
    ("sadness", &["sad", "alone", "lonely", "cry", "crying", "down", "empty", "miserable"]),
    ("anger", &["angry", "furious", "mad", "hate", "annoyed", "rage", "irritated"]),
    ("anxiety", &["anxious", "anxiety", "worried", "worry", "nervous", "panic", "stressed", "can't sleep"]),
    ("fear", &["scared", "afraid", "terrified", "fear", "frightened"]),
    ("joy", &["happy", "glad", "excited", "great", "wonderful", "better", "myself again"]),
    ("hopelessness", &["hopeless", "stuck", "pointless", "give up", "no way out"]),
    ("guilt", &["guilty", "my fault", "burden", "ashamed of what"]),
    ("shame", &["ashamed", "embarrassed", "hate the way i look", "disgusted with myself"]),
    ("grief", &["grief", "grieving", "miss", "loss", "passed away", "died"]),
    ("confusion", &["confused", "don't know what", "lost", "uncertain"]),
    ("overthinking", &["overthinking", "overthink", "can't stop thinking", "racing thoughts"]),
    ("trauma", &["trauma", "flashback", "keep remembering", "nightmare", "abuse"]),
];

const NEUTRAL_SCORE: f32 = 0.5;

/// Keyword-driven classifier over the few-shot label set.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    /// Score every label by cue hits; the best label wins, ties go to the
    /// earlier label. No hits → `neutral`.
    pub fn score(text: &str) -> EmotionScore {
        let padded = padded_words(text);
        let hits: Vec<(&str, usize)> = CUES
            .iter()
            .map(|(label, cues)| {
                let n = cues
                    .iter()
                    .filter(|cue| padded.contains(&format!(" {cue} ")))
                    .count();
                (*label, n)
            })
            .collect();

        let total: usize = hits.iter().map(|(_, n)| n).sum();
        let best = hits
            .iter()
            .copied()
            .reduce(|best, next| if next.1 > best.1 { next } else { best });

        match best {
            Some((label, n)) if n > 0 => EmotionScore {
                label: label.into(),
                score: n as f32 / total as f32,
            },
            _ => EmotionScore {
                label: "neutral".into(),
                score: NEUTRAL_SCORE,
            },
        }
    }
}

/// Lower-cased words joined by single spaces, with a space at each end,
/// so a cue only matches on word boundaries ("mad" never hits "made").
fn padded_words(text: &str) -> String {
    let mut out = String::from(" ");
    for word in text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
    {
        out.push_str(&word.to_lowercase());
        out.push(' ');
    }
    out
}

#[async_trait]
impl EmotionClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<ClassifierOutput, ClassifierError> {
        Ok(ClassifierOutput::Single(Self::score(text)))
    }
}
