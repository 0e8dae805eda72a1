//! Hugging Face Inference API emotion classifier.
//!
//! Posts `{"inputs": text}` to a hosted text-classification model and
//! hands the JSON body to `ClassifierOutput::from_json`. The endpoint
//! answers with a flat or nested list depending on the model's pipeline
//! settings; both are accepted.

use async_trait::async_trait;
use solace_core::emotion::{ClassifierOutput, EmotionClassifier};
use solace_core::error::ClassifierError;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co/models";

pub struct HuggingFaceClassifier {
    url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl HuggingFaceClassifier {
    /// Classifier for `model` on the public inference API.
    pub fn new(model: &str, api_token: Option<String>, timeout: Duration) -> Self {
        Self::with_url(format!("{DEFAULT_API_BASE}/{model}"), api_token, timeout)
    }

    /// Classifier against an explicit endpoint (self-hosted TEI, proxies).
    pub fn with_url(url: impl Into<String>, api_token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            url: url.into(),
            api_token,
            client,
        }
    }
}

#[async_trait]
impl EmotionClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str) -> Result<ClassifierOutput, ClassifierError> {
        debug!(url = %self.url, chars = text.len(), "Sending classification request");

        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }));

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        if status == 503 {
            return Err(ClassifierError::ModelLoading {
                estimated_secs: estimated_load_secs(&body),
            });
        }

        if status != 200 {
            warn!(status, body = %body, "Classifier returned error");
            return Err(ClassifierError::ApiError {
                status_code: status,
                message: body,
            });
        }

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Ok(ClassifierOutput::from_json(&value)),
            Err(e) => Ok(ClassifierOutput::Malformed(format!("body is not JSON: {e}"))),
        }
    }
}

/// Pull `estimated_time` out of a 503 body, defaulting to 20s.
fn estimated_load_secs(body: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["estimated_time"].as_f64())
        .map(|secs| secs.ceil() as u64)
        .unwrap_or(20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_includes_model() {
        let classifier = HuggingFaceClassifier::new(
            "j-hartmann/emotion-english-distilroberta-base",
            None,
            Duration::from_secs(5),
        );
        assert_eq!(
            classifier.url,
            "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base"
        );
    }

    #[test]
    fn loading_estimate_is_rounded_up() {
        assert_eq!(
            estimated_load_secs(r#"{"error":"Model is currently loading","estimated_time":12.3}"#),
            13
        );
        assert_eq!(estimated_load_secs("not json"), 20);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let classifier =
            HuggingFaceClassifier::with_url("http://127.0.0.1:9/classify", None, Duration::from_secs(2));
        let err = classifier.classify("hello").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Network(_)));
    }
}
