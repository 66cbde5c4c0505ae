//! Engine configuration, read once at startup.

use std::time::Duration;

/// Default web search endpoint (Bing Web Search v7).
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Shared deadline for one evidence-validation pass, across all probes.
pub const VALIDATION_TIMEOUT_MS: u64 = 3000;

/// How evidence is obtained for a claim. Selected once from configuration,
/// not re-decided per retrieval.
#[derive(Debug, Clone)]
pub enum SearchMode {
    /// Credentialed web-search API call
    ApiBacked { endpoint: String, api_key: String },
    /// Synthesized links into fixed reference sites
    ReferenceFallback,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub search: SearchMode,
    /// Probe evidence URLs for reachability before scoring
    pub validate_evidence: bool,
    pub validation_timeout: Duration,
}

impl EngineConfig {
    /// Read configuration from the environment. A missing API key is not an
    /// error; it selects the reference-fallback search mode.
    pub fn from_env() -> Self {
        let search = match std::env::var("BING_API_KEY") {
            Ok(key) if !key.trim().is_empty() => SearchMode::ApiBacked {
                endpoint: std::env::var("SEARCH_API_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_ENDPOINT.to_string()),
                api_key: key,
            },
            _ => SearchMode::ReferenceFallback,
        };

        let validate_evidence = std::env::var("EVIDENCE_VALIDATE")
            .map(|v| v != "false")
            .unwrap_or(true);

        Self {
            search,
            validate_evidence,
            validation_timeout: Duration::from_millis(VALIDATION_TIMEOUT_MS),
        }
    }

    /// Reference-fallback mode with validation on. Mirrors a deployment
    /// without search credentials.
    pub fn reference_fallback() -> Self {
        Self {
            search: SearchMode::ReferenceFallback,
            validate_evidence: true,
            validation_timeout: Duration::from_millis(VALIDATION_TIMEOUT_MS),
        }
    }

    /// Disable the reachability pass (EVIDENCE_VALIDATE=false).
    pub fn without_validation(mut self) -> Self {
        self.validate_evidence = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_config_validates_by_default() {
        let config = EngineConfig::reference_fallback();
        assert!(config.validate_evidence);
        assert_eq!(config.validation_timeout, Duration::from_millis(3000));
        assert!(matches!(config.search, SearchMode::ReferenceFallback));
    }

    #[test]
    fn test_without_validation_clears_flag() {
        let config = EngineConfig::reference_fallback().without_validation();
        assert!(!config.validate_evidence);
    }
}
