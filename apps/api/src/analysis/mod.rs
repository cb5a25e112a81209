//! JD Analysis — validates a job description, asks the configured LLM
//! providers for a structured analysis, and normalizes the reply.
//!
//! Flow: validate_input → (per provider) build prompt → complete →
//!       extract_json_object → parse_with_repair → validate_schema.
//!
//! Providers are tried in priority order (local endpoint first, hosted
//! Gemini second). Every provider except the last is wrapped in
//! suppress-and-continue: its failure is demoted to a warning and the next
//! provider takes over. Only the last provider's error reaches the caller.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub mod extract;
pub mod handlers;
pub mod input;
pub mod repair;
pub mod schema;

pub use input::AnalysisMode;

use crate::config::Config;
use crate::providers::gemini::GeminiProvider;
use crate::providers::local::LocalProvider;
use crate::providers::{prompts, CompletionProvider, ProviderError, ProviderId};

/// Everything that can go wrong between a raw request and a validated
/// payload. `Input` is caller-fixable; the rest are server-side and are
/// translated to a generic message at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid analysis request: {}", .0.join("; "))]
    Input(Vec<String>),

    #[error("no analysis provider is configured")]
    NotConfigured,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("no JSON object found in provider response")]
    NoJsonFound,

    #[error("provider response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("provider response missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// A validated analysis payload tagged with the provider that produced it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub source: ProviderId,
    pub payload: Map<String, Value>,
}

/// The analysis orchestrator. Holds the ordered provider list; construction
/// from config decides which paths exist for the process lifetime.
#[derive(Clone)]
pub struct Analyzer {
    providers: Vec<Arc<dyn CompletionProvider>>,
    max_jd_length: usize,
}

impl Analyzer {
    pub fn from_config(config: &Config) -> Self {
        let mut providers: Vec<Arc<dyn CompletionProvider>> = Vec::new();

        if let Some(base_url) = &config.local_llm_base_url {
            providers.push(Arc::new(LocalProvider::new(
                base_url.clone(),
                config.local_llm_model.clone(),
                config.llm_timeout_secs,
            )));
        }

        if let Some(api_key) = &config.gemini_api_key {
            providers.push(Arc::new(GeminiProvider::new(
                config.gemini_base_url.clone(),
                api_key.clone(),
                config.gemini_model.clone(),
                config.llm_timeout_secs,
            )));
        }

        Self::with_providers(providers, config.max_jd_length)
    }

    /// Explicit constructor used by `from_config` and by tests injecting
    /// provider doubles.
    pub fn with_providers(
        providers: Vec<Arc<dyn CompletionProvider>>,
        max_jd_length: usize,
    ) -> Self {
        Self {
            providers,
            max_jd_length,
        }
    }

    pub fn sources(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Runs the full pipeline for one request.
    pub async fn analyze(&self, jd_text: &str, mode: &str) -> Result<Analysis, AnalysisError> {
        let mode =
            input::validate_input(jd_text, mode, self.max_jd_length).map_err(AnalysisError::Input)?;

        if self.providers.is_empty() {
            return Err(AnalysisError::NotConfigured);
        }

        let request_id = Uuid::new_v4();
        let last = self.providers.len() - 1;

        for (idx, provider) in self.providers.iter().enumerate() {
            info!(%request_id, provider = %provider.id(), mode = mode.as_str(), "requesting analysis");

            match run_pipeline(provider.as_ref(), jd_text, mode).await {
                Ok(payload) => {
                    info!(%request_id, source = %provider.id(), "analysis validated");
                    return Ok(Analysis {
                        source: provider.id(),
                        payload,
                    });
                }
                Err(err) if idx < last => {
                    warn!(%request_id, provider = %provider.id(), error = %err, "provider failed, falling back");
                }
                Err(err) => return Err(err),
            }
        }

        // Loop always returns; kept for totality.
        Err(AnalysisError::NotConfigured)
    }
}

/// One provider attempt: prompt → completion → sanitize → parse → validate.
async fn run_pipeline(
    provider: &dyn CompletionProvider,
    jd_text: &str,
    mode: AnalysisMode,
) -> Result<Map<String, Value>, AnalysisError> {
    let system = prompts::system_prompt(mode);
    let user = prompts::user_prompt(jd_text);

    let raw = provider.complete(system, &user).await?;

    let candidate = extract::extract_json_object(&raw).ok_or(AnalysisError::NoJsonFound)?;

    let payload = repair::parse_with_repair(candidate).map_err(AnalysisError::MalformedJson)?;

    schema::validate_schema(&payload, mode).map_err(AnalysisError::MissingFields)?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const VALID_JD: &str = "We are seeking a Senior Backend Engineer with 5+ years \
        experience in distributed systems, Go, and Kubernetes.";

    const DEV_REPLY: &str = r#"{
        "skills": ["Go", "Kubernetes", "Distributed systems"],
        "salaryEstimation": "$140k - $180k",
        "codingTask": {
            "title": "Rate limiter service",
            "description": "Build a distributed rate limiter",
            "difficulty": "advanced",
            "requirements": ["Go", "Redis"],
            "learningResources": ["Designing Data-Intensive Applications"]
        },
        "questions": {
            "technical": ["Explain consensus"],
            "behavioral": ["Describe a failure"],
            "selfAssessment": ["Can I operate Kubernetes?"]
        },
        "skillGaps": ["Kubernetes operators"],
        "learningPath": ["Learn CRDs"]
    }"#;

    /// Provider double that returns a canned reply or a canned failure.
    struct ScriptedProvider {
        id: ProviderId,
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ProviderError> {
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => Err(ProviderError::EmptyResponse),
            }
        }
    }

    fn analyzer(providers: Vec<Arc<dyn CompletionProvider>>) -> Analyzer {
        Analyzer::with_providers(providers, 10_000)
    }

    #[tokio::test]
    async fn test_no_providers_is_configuration_error() {
        let result = analyzer(vec![]).analyze(VALID_JD, "dev").await;
        assert!(matches!(result, Err(AnalysisError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_input_violations_reported_before_any_provider_call() {
        let result = analyzer(vec![]).analyze("short", "nope").await;
        match result {
            Err(AnalysisError::Input(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_hosted_provider_success() {
        let result = analyzer(vec![Arc::new(ScriptedProvider {
            id: ProviderId::Hosted,
            reply: Some(DEV_REPLY),
        })])
        .analyze(VALID_JD, "dev")
        .await
        .unwrap();

        assert_eq!(result.source, ProviderId::Hosted);
        assert!(result.payload.contains_key("skillGaps"));
        assert!(result.payload.contains_key("learningPath"));
    }

    #[tokio::test]
    async fn test_local_failure_falls_back_to_hosted() {
        let result = analyzer(vec![
            Arc::new(ScriptedProvider {
                id: ProviderId::Local,
                reply: None,
            }),
            Arc::new(ScriptedProvider {
                id: ProviderId::Hosted,
                reply: Some(DEV_REPLY),
            }),
        ])
        .analyze(VALID_JD, "dev")
        .await
        .unwrap();

        assert_eq!(result.source, ProviderId::Hosted);
    }

    #[tokio::test]
    async fn test_local_invalid_schema_also_falls_back() {
        // Local replies with parseable JSON missing the dev fields; the
        // schema failure must be suppressed like any other local failure.
        let result = analyzer(vec![
            Arc::new(ScriptedProvider {
                id: ProviderId::Local,
                reply: Some(r#"{"skills": ["Go"], "codingTask": {}, "questions": {}}"#),
            }),
            Arc::new(ScriptedProvider {
                id: ProviderId::Hosted,
                reply: Some(DEV_REPLY),
            }),
        ])
        .analyze(VALID_JD, "dev")
        .await
        .unwrap();

        assert_eq!(result.source, ProviderId::Hosted);
    }

    #[tokio::test]
    async fn test_last_provider_error_is_surfaced() {
        let result = analyzer(vec![
            Arc::new(ScriptedProvider {
                id: ProviderId::Local,
                reply: None,
            }),
            Arc::new(ScriptedProvider {
                id: ProviderId::Hosted,
                reply: Some("I'm sorry, I cannot produce JSON today."),
            }),
        ])
        .analyze(VALID_JD, "dev")
        .await;

        assert!(matches!(result, Err(AnalysisError::NoJsonFound)));
    }

    #[tokio::test]
    async fn test_fenced_reply_with_trailing_comma_still_validates() {
        let fenced = "```json\n{\
            \"skills\": [\"Go\"],\
            \"codingTask\": {\"title\": \"t\", \"description\": \"d\", \"difficulty\": \"beginner\", \"requirements\": []},\
            \"questions\": {\"technical\": [], \"behavioral\": []},\
            \"skillGaps\": [],\
            \"learningPath\": [],\
        }\n```";

        let result = analyzer(vec![Arc::new(ScriptedProvider {
            id: ProviderId::Hosted,
            reply: Some(fenced),
        })])
        .analyze(VALID_JD, "dev")
        .await
        .unwrap();

        assert_eq!(result.source, ProviderId::Hosted);
        assert!(result.payload.contains_key("codingTask"));
    }

    #[tokio::test]
    async fn test_missing_dev_fields_from_last_provider_is_schema_error() {
        let result = analyzer(vec![Arc::new(ScriptedProvider {
            id: ProviderId::Hosted,
            reply: Some(r#"{"skills": ["Go"], "codingTask": {}, "questions": {}}"#),
        })])
        .analyze(VALID_JD, "dev")
        .await;

        match result {
            Err(AnalysisError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["skillGaps", "learningPath"]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hr_mode_accepts_core_fields_only() {
        let result = analyzer(vec![Arc::new(ScriptedProvider {
            id: ProviderId::Hosted,
            reply: Some(r#"{"skills": ["Go"], "codingTask": {}, "questions": {}}"#),
        })])
        .analyze(VALID_JD, "hr")
        .await
        .unwrap();

        assert_eq!(result.source, ProviderId::Hosted);
    }
}
