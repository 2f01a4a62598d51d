use anyhow::{anyhow, Context, Result};

use crate::models::request::Language;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Report language selected before the user picks one.
    pub default_language: Language,
    /// Kick off one analysis as soon as the server starts.
    pub run_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_language: match std::env::var("DEFAULT_LANGUAGE") {
                Ok(code) => Language::from_code(&code)
                    .ok_or_else(|| anyhow!("DEFAULT_LANGUAGE must be CN or EN, got '{code}'"))?,
                Err(_) => Language::default(),
            },
            run_on_startup: parse_flag(std::env::var("RUN_ON_STARTUP").ok().as_deref())
                .context("RUN_ON_STARTUP must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset means true.
fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(true),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(anyhow!("unrecognized flag value '{v}'")),
    }
}
