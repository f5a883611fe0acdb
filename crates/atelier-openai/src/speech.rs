//! Text-to-speech client.
//!
//! One POST to `{base}/v1/audio/speech` per event. Unlike the JSON
//! endpoints, a success response here is raw audio bytes.

use serde::Serialize;
use tracing::instrument;

use crate::config::OpenAiConfig;
use crate::errors::{OpenAiError, Result};
use crate::options::{SpeechModel, Voice};

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

/// Client for the speech endpoint.
#[derive(Clone)]
pub struct SpeechClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl std::fmt::Debug for SpeechClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl SpeechClient {
    /// Build a client with injected configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Synthesize speech for `input`, returning the raw audio bytes.
    #[instrument(skip(self, input), fields(voice = %voice, model = %model))]
    pub async fn synthesize(
        &self,
        input: &str,
        voice: Voice,
        model: SpeechModel,
    ) -> Result<Vec<u8>> {
        let request = SpeechRequest {
            model: model.as_str(),
            input,
            voice: voice.as_str(),
        };

        let response = self
            .http
            .post(format!("{}/v1/audio/speech", self.config.base_url))
            .bearer_auth(self.config.api_key.expose())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Upstream { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
