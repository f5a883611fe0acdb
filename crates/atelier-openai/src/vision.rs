//! Vision question-answering over chat completions.
//!
//! The image travels inline as a base64 data URL inside the user
//! message. Responses are capped at 300 tokens to keep answers short.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_core::text::preview;

use crate::config::OpenAiConfig;
use crate::errors::{OpenAiError, Result};

/// Token cap applied to every vision answer.
pub const MAX_ANSWER_TOKENS: u32 = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for image question-answering.
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    config: OpenAiConfig,
    model: String,
    max_tokens: u32,
}

impl std::fmt::Debug for VisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl VisionClient {
    /// Build a client with injected configuration and model name.
    pub fn new(config: OpenAiConfig, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            model: model.into(),
            max_tokens: MAX_ANSWER_TOKENS,
        }
    }

    /// Override the answer token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Ask `question` about a JPEG image supplied as base64 text.
    ///
    /// Returns the assistant's answer from the first choice.
    #[instrument(skip(self, question, base64_jpeg), fields(model = %self.model))]
    pub async fn ask(&self, question: &str, base64_jpeg: &str) -> Result<String> {
        tracing::debug!(question = %preview(question, 80, "..."), "asking about image");
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: question },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{base64_jpeg}"),
                        },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(self.config.api_key.expose())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Upstream { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                OpenAiError::MalformedResponse("chat completion returned no message content".into())
            })?;

        Ok(answer)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
