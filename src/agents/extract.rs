use crate::error::LlmError;
use crate::llm::prompts::PARSE_TASKS_PROMPT;
use crate::llm::{extract_json, LlmClient};
use crate::model::Task;
use serde::Deserialize;

#[derive(Deserialize)]
struct TasksWrapper {
    tasks: Vec<Task>,
}

/// Turn a free-form to-do list into structured tasks via the extractor
/// collaborator. Unlike the in-pipeline agents this propagates failures:
/// without tasks there is nothing to generate.
pub async fn parse_tasks(
    llm: &dyn LlmClient,
    text: &str,
    city: Option<&str>,
    location: Option<(f64, f64)>,
) -> Result<Vec<Task>, LlmError> {
    let mut prompt = PARSE_TASKS_PROMPT.to_string();
    if let Some(city) = city {
        prompt.push_str(&format!("\nCurrent city: {}", city));
    }
    if let Some((lat, lon)) = location {
        prompt.push_str(&format!("\nCurrent location: {},{}", lat, lon));
    }
    prompt.push_str(&format!("\nUser input: {}", text));

    let raw = llm.generate(&prompt).await?;
    let json = extract_json(&raw).ok_or(LlmError::NoJson)?;
    let wrapper: TasksWrapper = serde_json::from_str(&json)?;
    Ok(wrapper.tasks)
}
