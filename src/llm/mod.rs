mod json;
mod mock;
mod openai;
pub mod prompts;

pub use json::{extract_json, strip_code_fences};
pub use mock::MockClient;
pub use openai::OpenAiClient;

use crate::config::Config;
use crate::error::LlmError;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Mock,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Mock => write!(f, "mock"),
        }
    }
}

/// Free-text prompt in, free text out. Callers extract whatever structure
/// they need from the reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    #[allow(dead_code)]
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Create a client based on the configured provider.
pub fn create_client(config: &Config) -> Arc<dyn LlmClient> {
    match config.llm_provider {
        LlmProvider::OpenAi => Arc::new(OpenAiClient {
            api_key: config.openai_api_key(),
            model: config.openai.model.clone(),
            temperature: config.openai.temperature,
            timeout_sec: config.timeout_sec,
        }),
        LlmProvider::Mock => Arc::new(MockClient),
    }
}
