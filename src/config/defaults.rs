use crate::llm::LlmProvider;

pub fn default_version() -> u32 {
    1
}

pub fn default_llm_provider() -> LlmProvider {
    LlmProvider::OpenAi
}

pub fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

pub fn default_temperature() -> f64 {
    0.0
}

pub fn default_places_api_version() -> String {
    "2025-06-17".to_string()
}

pub fn default_search_limit() -> usize {
    3
}

pub fn default_candidate_concurrency() -> usize {
    4
}

pub fn default_timeout_sec() -> u64 {
    30
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    500
}
