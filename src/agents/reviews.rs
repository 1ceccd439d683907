use crate::llm::prompts::build_review_prompt;
use crate::llm::{strip_code_fences, LlmClient};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct AspectScore {
    pub aspect: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ReviewAnalysis {
    pub place_id: String,
    pub aspect_scores: Vec<AspectScore>,
    pub rating: f64,
    pub confidence: f64,
}

impl ReviewAnalysis {
    fn degraded(place_id: &str, confidence: f64) -> Self {
        Self {
            place_id: place_id.to_string(),
            aspect_scores: Vec::new(),
            rating: 0.0,
            confidence,
        }
    }
}

#[derive(Deserialize)]
struct AnalyzerReply {
    #[serde(default, rename = "aspectScores")]
    aspect_scores: Vec<Value>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Derive a quality signal from review texts via the aspect-scoring
/// collaborator. Degrades silently: empty input yields confidence 0.2
/// without a call, any call or parse failure yields confidence 0.3.
pub async fn analyze_reviews(
    llm: &dyn LlmClient,
    place_id: &str,
    reviews: &[String],
    user_query: Option<&str>,
) -> ReviewAnalysis {
    if reviews.is_empty() {
        return ReviewAnalysis::degraded(place_id, 0.2);
    }

    let prompt = build_review_prompt(place_id, reviews, user_query);
    let raw = match llm.generate(&prompt).await {
        Ok(r) => r,
        Err(e) => {
            debug!("Review analysis call failed for {}: {}", place_id, e);
            return ReviewAnalysis::degraded(place_id, 0.3);
        }
    };

    let cleaned = strip_code_fences(&raw);
    let reply: AnalyzerReply = match serde_json::from_str(&cleaned) {
        Ok(r) => r,
        Err(e) => {
            debug!("Review analysis parse failed for {}: {}", place_id, e);
            return ReviewAnalysis::degraded(place_id, 0.3);
        }
    };

    // Keep only entries with a string aspect name and a numeric score in 1..=5
    let aspect_scores: Vec<AspectScore> = reply
        .aspect_scores
        .iter()
        .filter_map(|v| {
            let aspect = v.get("aspect")?.as_str()?;
            let score = v.get("score")?.as_f64()?;
            if (1.0..=5.0).contains(&score) {
                Some(AspectScore {
                    aspect: aspect.to_string(),
                    score,
                })
            } else {
                None
            }
        })
        .collect();

    if aspect_scores.is_empty() {
        return ReviewAnalysis {
            place_id: place_id.to_string(),
            aspect_scores,
            rating: 0.0,
            confidence: 0.5,
        };
    }

    let rating = aspect_scores.iter().map(|a| a.score).sum::<f64>() / aspect_scores.len() as f64;
    let confidence = reply.confidence.unwrap_or(0.9);

    ReviewAnalysis {
        place_id: place_id.to_string(),
        aspect_scores,
        rating,
        confidence,
    }
}
