//! Provider Adapters — the only modules that talk to LLM endpoints.
//!
//! ARCHITECTURAL RULE: no other module may issue an LLM request directly.
//! Both adapters implement `CompletionProvider`; the analysis orchestrator
//! only ever sees the trait, so tests can swap in doubles.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod local;
pub mod prompts;

/// Sampling temperature for all analysis calls. Low on purpose: the prompts
/// demand strict JSON and structural compliance matters more than variety.
pub const SAMPLING_TEMPERATURE: f32 = 0.1;

/// Max characters of a provider error body kept for logs.
const ERROR_BODY_LIMIT: usize = 300;

/// Which provider produced a completion. Serialized as the `_source` tag on
/// the final analysis payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderId {
    Local,
    Hosted,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Local => "local",
            ProviderId::Hosted => "hosted",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("provider request timed out")]
    Timeout,

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("provider returned empty content")]
    EmptyResponse,
}

/// A single LLM completion endpoint. One request per call: no retry, no
/// streaming. The returned text is untrusted and goes through the extraction
/// and validation pipeline before anything downstream sees it.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to build HTTP client")
}

/// Maps a reqwest transport failure to the provider error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Unreachable(err)
    }
}

/// Truncates an error body for logging, on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
