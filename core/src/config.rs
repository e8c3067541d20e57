use anyhow::{anyhow, Result};
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-fast-generate-001";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Checked in order; the first one set wins.
const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "OPENAI_API_KEY"];

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub images_enabled: bool,
    pub bind_addr: String,
    pub log_level: tracing::Level,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|&key| var(key))
            .ok_or_else(|| anyhow!("one of {} must be set in .env", API_KEY_VARS.join(", ")))?;

        let images_enabled = match var("IMAGES_ENABLED") {
            None => true,
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!("IMAGES_ENABLED='{}' is not a boolean, keeping image generation on", raw);
                true
            }),
        };

        let log_level = match var("LOG_LEVEL") {
            None => tracing::Level::INFO,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("LOG_LEVEL='{}' is not a log level, using info", raw);
                tracing::Level::INFO
            }),
        };

        Ok(Self {
            api_key,
            api_base: var("MODEL_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            text_model: var("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: var("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            images_enabled,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_level,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
