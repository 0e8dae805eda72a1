//! HTTP gateway for Solace.
//!
//! Exposes `POST /chat` and `GET /health`. The orchestrator and its
//! collaborators are built once in [`start`] and shared across requests.
//!
//! Built on Axum.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use solace_agent::{ChatOrchestrator, ChatReply};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Reject inputs longer than this many characters
    pub max_input_chars: Option<usize>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS open to any origin, method, and header
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(config: solace_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let orchestrator = Arc::new(ChatOrchestrator::from_config(&config).await?);
    let state = Arc::new(GatewayState {
        orchestrator,
        max_input_chars: config.gateway.max_input_chars,
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let chars = payload.user_input.chars().count();

    if let Some(limit) = state.max_input_chars {
        if chars > limit {
            warn!(chars, limit, "Chat input rejected as too long");
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: format!("user_input exceeds {limit} characters"),
                }),
            ));
        }
    }

    info!(chars, "Chat request received");

    state
        .orchestrator
        .handle(&payload.user_input)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".into(),
                }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use solace_agent::TracingChatLog;
    use solace_core::error::ProviderError;
    use solace_core::message::Message;
    use solace_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use solace_memory::{ConversationWindow, KeywordRetriever};
    use solace_providers::LexiconClassifier;
    use tower::ServiceExt;

    /// Answers every prompt with the same completion, or fails.
    struct CannedProvider(Option<&'static str>);

    #[async_trait::async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            match self.0 {
                Some(text) => Ok(ProviderResponse {
                    message: Message::assistant(text),
                    usage: None,
                    model: request.model,
                }),
                None => Err(ProviderError::Network("connection refused".into())),
            }
        }
    }

    fn test_state(completion: Option<&'static str>, max_input_chars: Option<usize>) -> SharedState {
        let orchestrator = ChatOrchestrator::new(
            Arc::new(LexiconClassifier),
            Arc::new(KeywordRetriever::new(Vec::new(), 2)),
            Arc::new(ConversationWindow::new(6)),
            Arc::new(CannedProvider(completion)),
            Arc::new(TracingChatLog),
            "mock-model",
        );
        Arc::new(GatewayState {
            orchestrator: Arc::new(orchestrator),
            max_input_chars,
        })
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state(Some("hi"), None));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn chat_returns_response_and_emotion() {
        let app = build_router(test_state(Some("Therapist: You're not alone."), None));

        let response = app
            .oneshot(chat_request(r#"{"user_input": "I feel so alone and sad"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["response"], "You're not alone.");
        assert_eq!(body["emotion"], "sadness (1.00)");
    }

    #[tokio::test]
    async fn missing_user_input_is_rejected() {
        let app = build_router(test_state(Some("hi"), None));
        let response = app.oneshot(chat_request(r#"{"message": "hi"}"#)).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn collaborator_failure_is_generic_500() {
        let app = build_router(test_state(None, None));
        let response = app
            .oneshot(chat_request(r#"{"user_input": "hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("emotion").is_none());
    }

    #[tokio::test]
    async fn oversized_input_is_413() {
        let app = build_router(test_state(Some("hi"), Some(10)));
        let response = app
            .oneshot(chat_request(r#"{"user_input": "this is far more than ten characters"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = build_router(test_state(Some("hi"), None));
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/chat")
            .header("origin", "http://example.org")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
