//! # atelier-openai
//!
//! Clients for the three OpenAI generation endpoints the atelier surface
//! fronts: image generation, text-to-speech, and vision chat completion.
//!
//! One blocking-from-the-user's-view HTTP call per generation event: no
//! retries, no timeout overrides, no rate limiting. Configuration (API key,
//! base URL) is injected at construction — there is no process-global key.
//!
//! ## Crate Position
//!
//! Depends on: atelier-core.
//! Depended on by: atelier-server.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod images;
pub mod options;
pub mod speech;
pub mod vision;

pub use config::{ApiKey, OpenAiConfig};
pub use errors::{OpenAiError, Result};
pub use images::{ImageGeneration, ImagesClient};
pub use options::{ImageQuality, ImageSize, SpeechModel, Voice};
pub use speech::SpeechClient;
pub use vision::VisionClient;
