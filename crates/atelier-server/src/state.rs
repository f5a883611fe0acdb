//! Shared state accessible from axum handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono_tz::Tz;

use atelier_history::HistoryStore;
use atelier_openai::{ImagesClient, SpeechClient, VisionClient};

/// The three outbound clients, present only when an API key was configured.
#[derive(Clone)]
pub struct GenerationClients {
    pub images: ImagesClient,
    pub speech: SpeechClient,
    pub vision: VisionClient,
}

/// Shared state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<HistoryStore>,
    /// `None` when `OPENAI_API_KEY` is absent; create endpoints then fail
    /// per request while history endpoints keep working.
    pub clients: Option<GenerationClients>,
    /// Plain client for fetching generated image URLs.
    pub http: reqwest::Client,
    pub audio_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub display_tz: Tz,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<HistoryStore>,
        clients: Option<GenerationClients>,
        audio_dir: PathBuf,
        uploads_dir: PathBuf,
        display_tz: Tz,
    ) -> Self {
        Self {
            store,
            clients,
            http: reqwest::Client::new(),
            audio_dir,
            uploads_dir,
            display_tz,
            start_time: Instant::now(),
        }
    }
}
