use crate::error::LlmError;
use crate::llm::prompts::build_relevance_prompt;
use crate::llm::{extract_json, LlmClient};
use crate::model::{CandidatePlace, Task};
use serde::Deserialize;
use tracing::debug;

/// Which path produced the verdict: the natural-language classifier, or the
/// deterministic keyword heuristic it degrades to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    Classifier,
    Heuristic,
}

#[derive(Debug, Clone)]
pub struct RelevanceVerdict {
    pub relevant: bool,
    pub reason: Option<String>,
    pub source: VerdictSource,
}

#[derive(Deserialize)]
struct ClassifierReply {
    #[serde(default)]
    relevant: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Decide whether a candidate plausibly satisfies a task's intent.
///
/// Never fails: any classifier error (missing key, HTTP failure, unparseable
/// reply) falls back to the keyword heuristic, tagged accordingly.
pub async fn check_relevance(
    llm: &dyn LlmClient,
    task: &Task,
    candidate: &CandidatePlace,
    distance_km: Option<f64>,
) -> RelevanceVerdict {
    match classify(llm, task, candidate, distance_km).await {
        Ok(verdict) => verdict,
        Err(e) => {
            debug!(
                "Relevance classifier failed for {} / {}: {}. Using heuristic.",
                task.id, candidate.id, e
            );
            heuristic(task, candidate)
        }
    }
}

async fn classify(
    llm: &dyn LlmClient,
    task: &Task,
    candidate: &CandidatePlace,
    distance_km: Option<f64>,
) -> Result<RelevanceVerdict, LlmError> {
    let prompt = build_relevance_prompt(task, candidate, distance_km);
    let raw = llm.generate(&prompt).await?;
    let json = extract_json(&raw).ok_or(LlmError::NoJson)?;
    let reply: ClassifierReply = serde_json::from_str(&json)?;
    Ok(RelevanceVerdict {
        relevant: reply.relevant,
        reason: reply.reason,
        source: VerdictSource::Classifier,
    })
}

/// Keyword-overlap fallback: tokenize the task's category hint and raw text
/// into lowercase alphanumeric words; the candidate matches if its name or
/// any tag contains one as a substring. No tokens means no information, so
/// default to relevant rather than over-filter.
fn heuristic(task: &Task, candidate: &CandidatePlace) -> RelevanceVerdict {
    let name = candidate.name.to_lowercase();
    let tags: Vec<String> = candidate.tags.iter().map(|t| t.to_lowercase()).collect();

    let category = task
        .category_hint
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .replace('_', " ");
    let raw = task.raw.to_lowercase();

    let needles: Vec<String> = [category, raw]
        .iter()
        .flat_map(|s| {
            s.split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    let matched = needles.is_empty()
        || needles
            .iter()
            .any(|n| name.contains(n.as_str()) || tags.iter().any(|t| t.contains(n.as_str())));

    RelevanceVerdict {
        relevant: matched,
        reason: Some(if matched { "basic match" } else { "no basic match" }.to_string()),
        source: VerdictSource::Heuristic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coord;
    use async_trait::async_trait;

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::MissingApiKey("test".to_string()))
        }
    }

    struct CannedLlm(&'static str);

    #[async_trait]
    impl LlmClient for CannedLlm {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn task(category: Option<&str>, raw: &str) -> Task {
        Task {
            id: "t1".to_string(),
            raw: raw.to_string(),
            kind: crate::model::TaskKind::Flexible,
            category_hint: category.map(str::to_string),
            required_tags: Vec::new(),
            location: None,
            location_hint: None,
            max_candidates: None,
        }
    }

    fn candidate(name: &str, tags: &[&str]) -> CandidatePlace {
        CandidatePlace {
            id: "p1".to_string(),
            name: name.to_string(),
            location: Coord { lat: 0.0, lon: 0.0 },
            rating: None,
            review_count: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            address: None,
            review_snippets: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_classifier_verdict_parsed() {
        let llm = CannedLlm(r#"{"relevant": true, "reason": "spa matches"}"#);
        let verdict = check_relevance(&llm, &task(Some("spa"), "spa"), &candidate("Bliss Spa", &[]), None).await;
        assert!(verdict.relevant);
        assert_eq!(verdict.source, VerdictSource::Classifier);
    }

    #[tokio::test]
    async fn test_classifier_prose_wrapped_json() {
        let llm = CannedLlm("Verdict: {\"relevant\": false, \"reason\": \"burger joint\"} done");
        let verdict =
            check_relevance(&llm, &task(Some("spa"), "spa"), &candidate("Burger Barn", &[]), None).await;
        assert!(!verdict.relevant);
        assert_eq!(verdict.source, VerdictSource::Classifier);
    }

    #[tokio::test]
    async fn test_fallback_on_llm_failure() {
        let llm = FailingLlm;
        let verdict =
            check_relevance(&llm, &task(Some("spa"), "relaxing spa"), &candidate("Bliss Spa", &[]), None).await;
        assert!(verdict.relevant);
        assert_eq!(verdict.source, VerdictSource::Heuristic);
    }

    #[tokio::test]
    async fn test_fallback_on_garbage_reply() {
        let llm = CannedLlm("sure thing, sounds relevant to me!");
        let verdict = check_relevance(
            &llm,
            &task(Some("coffee"), "morning coffee"),
            &candidate("Steel Mill", &["industrial"]),
            None,
        )
        .await;
        assert!(!verdict.relevant);
        assert_eq!(verdict.source, VerdictSource::Heuristic);
    }

    #[test]
    fn test_heuristic_matches_tag_substring() {
        let verdict = heuristic(&task(Some("movie_theater"), "movie"), &candidate("PVR", &["movie theater"]));
        assert!(verdict.relevant);
    }

    #[test]
    fn test_heuristic_no_tokens_defaults_relevant() {
        let verdict = heuristic(&task(None, ""), &candidate("Anywhere", &[]));
        assert!(verdict.relevant);
        assert_eq!(verdict.source, VerdictSource::Heuristic);
    }

    #[test]
    fn test_heuristic_rejects_mismatch() {
        let verdict = heuristic(&task(Some("spa"), "spa"), &candidate("Burger Barn", &["burgers"]));
        assert!(!verdict.relevant);
    }
}
