//! Settings type definitions with compiled defaults.
//!
//! JSON keys are camelCase to match the settings file format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtelierSettings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Local storage layout.
    pub storage: StorageSettings,
    /// Upstream OpenAI endpoint settings.
    pub openai: OpenAiSettings,
    /// History display settings.
    pub display: DisplaySettings,
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Port the HTTP surface binds to.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 8420 }
    }
}

/// Local storage layout.
///
/// All paths are resolved relative to `data_dir` unless absolute.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Root directory for all local state.
    pub data_dir: PathBuf,
    /// History database filename.
    pub database_file: String,
    /// Directory for generated audio files.
    pub audio_dir: String,
    /// Directory for persisted vision uploads.
    pub uploads_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            database_file: "atelier.db".into(),
            audio_dir: "audio".into(),
            uploads_dir: "uploads".into(),
        }
    }
}

impl StorageSettings {
    /// Absolute path of the history database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Absolute path of the audio output directory.
    pub fn audio_path(&self) -> PathBuf {
        self.data_dir.join(&self.audio_dir)
    }

    /// Absolute path of the uploads directory.
    pub fn uploads_path(&self) -> PathBuf {
        self.data_dir.join(&self.uploads_dir)
    }
}

/// Upstream OpenAI endpoint settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenAiSettings {
    /// Base URL of the API (override for tests/proxies).
    pub base_url: String,
    /// Image generation model.
    pub image_model: String,
    /// Vision chat model.
    pub vision_model: String,
    /// Fixed token cap for vision responses.
    pub vision_max_tokens: u32,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            image_model: "dall-e-3".into(),
            vision_model: "gpt-4-vision-preview".into(),
            vision_max_tokens: 300,
        }
    }
}

/// History display settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// IANA timezone name used to render stored timestamps.
    pub timezone: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            timezone: "Asia/Colombo".into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
