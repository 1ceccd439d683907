use std::path::PathBuf;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum WayplanError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Places error: {0}")]
    Places(#[from] PlacesError),

    #[error("Reviews error: {0}")]
    Reviews(#[from] ReviewsError),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    BadStatus(u16),

    #[error("No JSON object found in LLM output")]
    NoJson,

    #[error("Invalid JSON from LLM: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Empty completion from provider")]
    EmptyCompletion,
}

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Missing places API key")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API returned status {0}")]
    BadStatus(u16),
}

#[derive(Error, Debug)]
pub enum ReviewsError {
    #[error("Missing reviews API key")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reviews API returned status {0}")]
    BadStatus(u16),
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Missing routing API key")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Routing API returned status {0}")]
    BadStatus(u16),

    #[error("No route found between the requested stops")]
    NoRoute,
}

/// Fatal input-validation failures. Everything downstream of validation
/// degrades to sentinels or fallbacks instead of erroring.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Task list is empty")]
    EmptyTasks,

    #[error("Origin coordinates are not finite numbers")]
    InvalidOrigin,

    #[error("Duplicate task id '{0}'")]
    DuplicateTaskId(String),
}
