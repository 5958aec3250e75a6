/// Startup configuration
///
/// The API credential comes from the environment (optionally via a `.env`
/// file loaded in `main`). A missing credential is a fatal startup error;
/// the UI never runs without one. The resolved config is passed into the
/// client constructor so tests can use a fake credential instead.

use std::env;

/// Environment variable holding the Gemini API credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the default model id
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Resolved startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API credential
    pub api_key: String,
    /// Model id to request edits from
    pub model: String,
}

impl AppConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| format!("{} environment variable not set", API_KEY_VAR))?;

        let model =
            env::var(MODEL_VAR).unwrap_or_else(|_| crate::gemini::DEFAULT_MODEL.to_string());

        Ok(Self { api_key, model })
    }
}
