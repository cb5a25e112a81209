use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Read once at startup and treated as immutable for the process lifetime.
/// Both provider settings are optional: a missing `LOCAL_LLM_BASE_URL`
/// disables the local path, a missing `GEMINI_API_KEY` disables the hosted
/// path. Having neither is only an error at analysis time.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of an OpenAI-compatible local endpoint, e.g. `http://127.0.0.1:1234/v1`.
    pub local_llm_base_url: Option<String>,
    pub local_llm_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Maximum accepted job description length in characters.
    pub max_jd_length: usize,
    /// Timeout applied to each outbound provider request.
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            local_llm_base_url: optional_env("LOCAL_LLM_BASE_URL"),
            local_llm_model: std::env::var("LOCAL_LLM_MODEL")
                .unwrap_or_else(|_| "google/gemma-3n-e4b".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            max_jd_length: std::env::var("MAX_JD_LENGTH")
                .unwrap_or_else(|_| "10000".to_string())
                .parse::<usize>()
                .context("MAX_JD_LENGTH must be a positive integer")?,
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a positive integer")?,
        })
    }
}

/// Returns `None` for unset or empty environment variables.
fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
