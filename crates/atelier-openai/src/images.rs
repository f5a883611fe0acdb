//! Image generation client.
//!
//! One POST to `{base}/v1/images/generations` per event. The response
//! carries a short-lived URL; materializing those bytes is the caller's
//! concern (`atelier-media`).

use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_core::text::preview;

use crate::config::OpenAiConfig;
use crate::errors::{OpenAiError, Result};
use crate::options::{ImageQuality, ImageSize};

/// Fallback when the payload omits a revised prompt.
const NO_REVISED_PROMPT: &str = "No revised prompt provided";

/// Result of a successful image generation.
#[derive(Debug, Clone)]
pub struct ImageGeneration {
    /// Short-lived URL of the generated image.
    pub url: String,
    /// Prompt as rewritten by the model.
    pub revised_prompt: String,
}

#[derive(Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u8,
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// Client for the image generation endpoint.
#[derive(Clone)]
pub struct ImagesClient {
    http: reqwest::Client,
    config: OpenAiConfig,
    model: String,
}

impl std::fmt::Debug for ImagesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagesClient")
            .field("model", &self.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl ImagesClient {
    /// Build a client with injected configuration.
    pub fn new(config: OpenAiConfig, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            model: model.into(),
        }
    }

    /// Generate one image. No retry, no timeout override — a hung remote
    /// call hangs this interaction.
    #[instrument(skip(self, prompt), fields(model = %self.model, size = %size, quality = %quality))]
    pub async fn generate(
        &self,
        prompt: &str,
        size: ImageSize,
        quality: ImageQuality,
    ) -> Result<ImageGeneration> {
        tracing::debug!(prompt = %preview(prompt, 80, "..."), "requesting image generation");
        let request = ImagesRequest {
            model: &self.model,
            prompt,
            size: size.as_str(),
            quality: quality.as_str(),
            n: 1,
        };

        let response = self
            .http
            .post(format!("{}/v1/images/generations", self.config.base_url))
            .bearer_auth(self.config.api_key.expose())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Upstream { status, body });
        }

        let payload: ImagesResponse = response.json().await?;
        let datum = payload
            .data
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiError::MalformedResponse("empty data array".into()))?;
        let url = datum
            .url
            .ok_or_else(|| OpenAiError::MalformedResponse("image datum missing url".into()))?;

        Ok(ImageGeneration {
            url,
            revised_prompt: datum
                .revised_prompt
                .unwrap_or_else(|| NO_REVISED_PROMPT.to_string()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
