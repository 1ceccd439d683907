use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::llm::LlmProvider;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_llm_provider")]
    pub llm_provider: LlmProvider,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub reviews: ReviewsConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    /// Upper bound on in-flight relevance/enrichment calls per task.
    #[serde(default = "default_candidate_concurrency")]
    pub candidate_concurrency: usize,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct OpenAiConfig {
    /// Falls back to OPENAI_API_KEY when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PlacesConfig {
    /// Falls back to FOURSQUARE_API_KEY when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_places_api_version")]
    pub api_version: String,

    /// Candidates requested per flexible task.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: default_places_api_version(),
            search_limit: default_search_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ReviewsConfig {
    /// Falls back to GOOGLE_MAPS_API_KEY when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct RoutingConfig {
    /// Falls back to ORS_TOKEN when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}
