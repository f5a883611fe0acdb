//! # atelier-settings
//!
//! Configuration for the atelier server, loaded from three layers
//! (in priority order):
//!
//! 1. **Compiled defaults** — [`AtelierSettings::default()`]
//! 2. **Settings file** — JSON, deep-merged over defaults
//! 3. **Environment variables** — `ATELIER_*` overrides (highest priority)
//!
//! The loaded value is injected explicitly into the components that need it;
//! there is no global singleton. The OpenAI API key is deliberately NOT part
//! of the settings file — the binary reads `OPENAI_API_KEY` once and passes
//! it into the client constructors.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path};
pub use types::{
    AtelierSettings, DisplaySettings, OpenAiSettings, ServerSettings, StorageSettings,
};
