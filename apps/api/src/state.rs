use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. Configuration is read once at startup and immutable for the
/// process lifetime; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub config: Config,
}
