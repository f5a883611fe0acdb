//! Client configuration: API key and endpoint base URL.
//!
//! The key is read from the environment exactly once (by the binary) and
//! injected here; clients never consult the environment themselves.

use crate::errors::{OpenAiError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default endpoint base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// An API key that never appears in Debug output or logs.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting empty strings.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(OpenAiError::MissingApiKey);
        }
        Ok(Self(key))
    }

    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Err(OpenAiError::MissingApiKey),
        }
    }

    /// The raw key for the Authorization header.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Shared client configuration.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Bearer key for every request.
    pub api_key: ApiKey,
    /// Base URL, no trailing slash.
    pub base_url: String,
}

impl OpenAiConfig {
    /// Build a config with an explicit key and the default base URL.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
