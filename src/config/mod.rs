mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            llm_provider: default_llm_provider(),
            openai: OpenAiConfig::default(),
            places: PlacesConfig::default(),
            reviews: ReviewsConfig::default(),
            routing: RoutingConfig::default(),
            retry: RetryConfig::default(),
            candidate_concurrency: default_candidate_concurrency(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

impl Config {
    /// Load config from a YAML file; a missing file yields the defaults so
    /// the binary works with environment variables alone.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn openai_api_key(&self) -> Option<String> {
        self.openai
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    pub fn places_api_key(&self) -> Option<String> {
        self.places
            .api_key
            .clone()
            .or_else(|| std::env::var("FOURSQUARE_API_KEY").ok())
    }

    pub fn reviews_api_key(&self) -> Option<String> {
        self.reviews
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_MAPS_API_KEY").ok())
    }

    pub fn routing_api_key(&self) -> Option<String> {
        self.routing
            .api_key
            .clone()
            .or_else(|| std::env::var("ORS_TOKEN").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config: Config = serde_yaml::from_str("version: 1").unwrap();
        assert_eq!(config.places.search_limit, 3);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.llm_provider, LlmProvider::OpenAi);
    }

    #[test]
    fn test_partial_override() {
        let yaml = "llm_provider: mock\nplaces:\n  search_limit: 5\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.llm_provider, LlmProvider::Mock);
        assert_eq!(config.places.search_limit, 5);
        assert_eq!(config.openai.model, "gpt-4o");
    }
}
