//! Enumerated generation options.
//!
//! These mirror the fixed choices the form surface offers; serde names are
//! the exact wire strings the endpoints accept.

use serde::{Deserialize, Serialize};

/// Image dimensions accepted by the image endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// Square.
    #[default]
    #[serde(rename = "1024x1024")]
    Square1024,
    /// Portrait.
    #[serde(rename = "1024x1792")]
    Portrait1024x1792,
    /// Landscape.
    #[serde(rename = "1792x1024")]
    Landscape1792x1024,
}

impl ImageSize {
    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square1024 => "1024x1024",
            Self::Portrait1024x1792 => "1024x1792",
            Self::Landscape1792x1024 => "1792x1024",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image quality tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Standard quality.
    #[default]
    Standard,
    /// High definition.
    Hd,
}

impl ImageQuality {
    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hd => "hd",
        }
    }
}

impl std::fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voices offered by the speech endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    /// Neutral.
    #[default]
    Alloy,
    /// Male, warm.
    Echo,
    /// British.
    Fable,
    /// Deep.
    Onyx,
    /// Female, bright.
    Nova,
    /// Female, soft.
    Shimmer,
}

impl Voice {
    /// Wire string — also used in generated audio filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }

    /// All selectable voices, in display order.
    pub fn all() -> &'static [Voice] {
        &[
            Self::Alloy,
            Self::Echo,
            Self::Fable,
            Self::Onyx,
            Self::Nova,
            Self::Shimmer,
        ]
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-to-speech models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechModel {
    /// Lower latency tier.
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    /// Higher quality tier.
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
}

impl SpeechModel {
    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
        }
    }
}

impl std::fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
