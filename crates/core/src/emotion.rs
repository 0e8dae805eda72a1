//! Emotion classification: the classifier trait and its output shapes.
//!
//! Text-classification backends disagree on output shape depending on how
//! many labels they return: a flat list of `{label, score}` records when
//! asked for the single top label, or a list of lists when asked for every
//! label. `ClassifierOutput` captures both, plus anything unrecognisable,
//! so resolution is an exhaustive match instead of ad hoc inspection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ClassifierError;

/// One `{label, score}` record as returned by a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f32,
}

/// Raw classifier output, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutput {
    /// Flat list of records; the first record is the answer.
    Single(EmotionScore),
    /// Nested list; every label of the first input with its score.
    Ranked(Vec<EmotionScore>),
    /// Neither shape. Carries a short description for logging.
    Malformed(String),
}

impl ClassifierOutput {
    /// Interpret a JSON payload from a text-classification endpoint.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let serde_json::Value::Array(items) = value else {
            return Self::Malformed(format!("expected a list, got {}", json_kind(value)));
        };

        match items.first() {
            Some(first @ serde_json::Value::Object(_)) => match parse_score(first) {
                Some(score) => Self::Single(score),
                None => Self::Malformed("record is missing label or score".into()),
            },
            Some(serde_json::Value::Array(inner)) => {
                let scores: Option<Vec<EmotionScore>> = inner.iter().map(parse_score).collect();
                match scores {
                    Some(scores) if !scores.is_empty() => Self::Ranked(scores),
                    Some(_) => Self::Malformed("nested list is empty".into()),
                    None => Self::Malformed("nested record is missing label or score".into()),
                }
            }
            Some(other) => Self::Malformed(format!("unexpected list element: {}", json_kind(other))),
            None => Self::Malformed("empty list".into()),
        }
    }
}

fn parse_score(value: &serde_json::Value) -> Option<EmotionScore> {
    serde_json::from_value(value.clone()).ok()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

/// A resolved emotion: normalised label plus confidence.
///
/// The sentinel `unknown` emotion has no score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub label: String,
    pub score: Option<f32>,
}

impl Emotion {
    pub const UNKNOWN: &'static str = "unknown";

    /// Build an emotion, lower-casing and trimming the label.
    pub fn new(label: &str, score: f32) -> Self {
        Self {
            label: label.trim().to_lowercase(),
            score: Some(score),
        }
    }

    pub fn unknown() -> Self {
        Self {
            label: Self::UNKNOWN.into(),
            score: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.score.is_none()
    }

    /// Resolve raw classifier output. Never fails: malformed output
    /// becomes `unknown`.
    pub fn from_output(output: ClassifierOutput) -> Self {
        match output {
            ClassifierOutput::Single(top) => Self::new(&top.label, top.score),
            ClassifierOutput::Ranked(scores) => scores
                .into_iter()
                .reduce(|best, next| if next.score > best.score { next } else { best })
                .map(|top| Self::new(&top.label, top.score))
                .unwrap_or_else(Self::unknown),
            ClassifierOutput::Malformed(reason) => {
                tracing::warn!(%reason, "Classifier returned an unexpected shape");
                Self::unknown()
            }
        }
    }
}

/// Renders as `"sadness (0.87)"`, or just `"unknown"` for the sentinel.
impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} ({:.2})", self.label, score),
            None => f.write_str(&self.label),
        }
    }
}

/// The emotion classifier collaborator.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Backend name (e.g., "huggingface", "lexicon").
    fn name(&self) -> &str;

    /// Classify a piece of text.
    async fn classify(&self, text: &str) -> std::result::Result<ClassifierOutput, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_list_is_single() {
        let out = ClassifierOutput::from_json(&json!([{"label": "sadness", "score": 0.87}]));
        assert_eq!(
            out,
            ClassifierOutput::Single(EmotionScore { label: "sadness".into(), score: 0.87 })
        );
    }

    #[test]
    fn nested_list_is_ranked() {
        let out = ClassifierOutput::from_json(&json!([[
            {"label": "joy", "score": 0.1},
            {"label": "fear", "score": 0.7},
            {"label": "anger", "score": 0.2}
        ]]));
        match out {
            ClassifierOutput::Ranked(scores) => assert_eq!(scores.len(), 3),
            other => panic!("expected ranked, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_shapes_are_malformed() {
        for payload in [
            json!({"error": "boom"}),
            json!([]),
            json!([[]]),
            json!(["sadness"]),
            json!([{"label": "sadness"}]),
            json!("sadness"),
        ] {
            assert!(
                matches!(ClassifierOutput::from_json(&payload), ClassifierOutput::Malformed(_)),
                "payload {payload} should be malformed"
            );
        }
    }

    #[test]
    fn label_is_normalised() {
        let emotion = Emotion::new("  Sadness \n", 0.5);
        assert_eq!(emotion.label, "sadness");
    }

    #[test]
    fn ranked_resolves_to_highest_score() {
        let emotion = Emotion::from_output(ClassifierOutput::Ranked(vec![
            EmotionScore { label: "joy".into(), score: 0.1 },
            EmotionScore { label: "Fear".into(), score: 0.7 },
            EmotionScore { label: "anger".into(), score: 0.2 },
        ]));
        assert_eq!(emotion.label, "fear");
        assert_eq!(emotion.to_string(), "fear (0.70)");
    }

    #[test]
    fn ranked_tie_keeps_first() {
        let emotion = Emotion::from_output(ClassifierOutput::Ranked(vec![
            EmotionScore { label: "joy".into(), score: 0.5 },
            EmotionScore { label: "anger".into(), score: 0.5 },
        ]));
        assert_eq!(emotion.label, "joy");
    }

    #[test]
    fn malformed_resolves_to_unknown() {
        let emotion = Emotion::from_output(ClassifierOutput::Malformed("empty list".into()));
        assert!(emotion.is_unknown());
        assert_eq!(emotion.to_string(), "unknown");
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Emotion::new("sadness", 0.87).to_string(), "sadness (0.87)");
        assert_eq!(Emotion::new("joy", 0.9999).to_string(), "joy (1.00)");
    }
}
