//! Analysis collaborator - fraud narrative generation via the OpenAI Chat
//! Completions API.
//!
//! Images are inlined as base64 data URIs in the vision-capable message
//! format; with no images the payload degrades to text-only. A failure here
//! never fails the submission: the handler records it as `ai_error` and
//! substitutes an explanatory narrative.

use async_trait::async_trait;
use base64::Engine;
use fraudcheck_core::Config;
use fraudcheck_processing::InlineImage;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One analysis request: role instructions, the assembled prompt, and any
/// inline images for visual review.
pub struct AnalysisRequest {
    pub system: String,
    pub prompt: String,
    pub images: Vec<InlineImage>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("analysis API error: {0}")]
    Api(String),

    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

/// External multimodal inference collaborator.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<String, AnalysisError>;
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-backed analysis client.
pub struct OpenAiAnalysis {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiAnalysis {
    pub fn new(api_key: String, model: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to create HTTP client for OpenAI API, using default client");
                reqwest::Client::default()
            });

        Self {
            http_client,
            api_key,
            model,
        }
    }

    /// Create the client from config. Returns `None` when no API key is set;
    /// the submission flow then reports the collaborator as unconfigured
    /// instead of failing.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.openai_api_key()?.to_string();
        tracing::info!(model = %config.openai_model(), "Analysis client initialized (OpenAI)");
        Some(Self::new(api_key, config.openai_model().to_string()))
    }

    fn build_request_body(&self, request: &AnalysisRequest) -> serde_json::Value {
        let mut user_content = vec![json!({ "type": "text", "text": request.prompt })];

        for image in &request.images {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&image.data);
            user_content.push(json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:{};base64,{}", image.content_type, encoded)
                }
            }));
        }

        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": user_content }
            ]
        })
    }
}

#[async_trait]
impl AnalysisClient for OpenAiAnalysis {
    async fn analyze(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
        let body = self.build_request_body(&request);

        tracing::debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            images = request.images.len(),
            "Sending analysis request to OpenAI API"
        );

        let response = self
            .http_client
            .post(OPENAI_CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the structured OpenAI error message when present
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
                if let Some(error_obj) = error_json.get("error") {
                    let message = error_obj
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("Unknown OpenAI error");
                    let error_type = error_obj
                        .get("type")
                        .and_then(|t| t.as_str())
                        .unwrap_or("api_error");
                    return Err(AnalysisError::Api(format!(
                        "{} ({}) - Status: {}",
                        message, error_type, status
                    )));
                }
            }

            return Err(AnalysisError::Api(format!("{} - {}", status, error_text)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AnalysisError::MalformedResponse("no narrative in completion".to_string())
            })
    }
}
