use super::LlmClient;
use crate::error::LlmError;
use async_trait::async_trait;

/// Offline stand-in that always answers with the extractor example output.
/// Useful for demos and for running the pipeline without credentials.
pub struct MockClient;

#[async_trait]
impl LlmClient for MockClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(r#"{
  "tasks": [
    { "id": "t1", "raw": "spa", "type": "flexible", "category_hint": "spa", "max_candidates": 3 },
    { "id": "t2", "raw": "shopping", "type": "flexible", "category_hint": "shopping", "max_candidates": 3 },
    { "id": "t3", "raw": "dinner at Chandni Chowk", "type": "fixed", "location_hint": "Chandni Chowk", "category_hint": "restaurant", "max_candidates": 3 },
    { "id": "t4", "raw": "movie", "type": "flexible", "category_hint": "movie_theater", "max_candidates": 3 }
  ]
}"#
        .to_string())
    }
}
