use crate::model::{CandidatePlace, Task};

/// Prompt template for the task extractor: free-form to-do list in,
/// structured task array out.
pub const PARSE_TASKS_PROMPT: &str = r#"
System: You are a JSON generator that converts a free-form "to-do" list into structured tasks for an itinerary planner. Always reply with valid JSON only.

User: Convert this input into an array of task objects. Each object must include:
 - id: unique short id (t1, t2...)
 - raw: original text chunk
 - type: "fixed" if an explicit place or address is present, otherwise "flexible"
 - location_hint: optional — the explicit place name or address if present
 - category_hint: optional — a short category string (e.g., "spa", "restaurant", "shopping", "movie_theater", "coffee")
 - max_candidates: integer (default 3)

Input:
{ "text": "SPA, shopping, dinner at Chandni Chowk, movie, home" }

Output:
{
  "tasks": [
    { "id": "t1", "raw": "SPA", "type": "flexible", "category_hint": "spa", "max_candidates": 3 },
    { "id": "t2", "raw": "shopping", "type": "flexible", "category_hint": "shopping", "max_candidates": 3 },
    { "id": "t3", "raw": "dinner at Chandni Chowk", "type": "fixed", "location_hint": "Chandni Chowk", "category_hint": "restaurant", "max_candidates": 3 },
    { "id": "t4", "raw": "movie", "type": "flexible", "category_hint": "movie_theater", "max_candidates": 3 },
    { "id": "t5", "raw": "home", "type": "fixed", "location_hint": "home", "category_hint": "home", "max_candidates": 3 }
  ]
}

Guidelines:
- Only reply with valid JSON in the specified format.
- If the user provides a location (city or lat/lon), use it to help with location_hint or candidate selection.
- Use short, relevant category_hint values.
- Do NOT return anything except the JSON object.
"#;

/// Strict yes/no relevance prompt pairing task intent against one candidate.
pub fn build_relevance_prompt(task: &Task, candidate: &CandidatePlace, distance_km: Option<f64>) -> String {
    let task_json = serde_json::json!({
        "id": task.id,
        "raw": task.raw,
        "category_hint": task.category_hint,
        "required_tags": task.required_tags,
        "location_hint": task.location_hint,
    });
    let candidate_json = serde_json::json!({
        "id": candidate.id,
        "name": candidate.name,
        "tags": candidate.tags,
        "location": candidate.location,
        "distance_km": distance_km,
    });

    let mut parts = Vec::new();
    parts.push("You are a strict filter that decides if a place is relevant for a user's task.".to_string());
    parts.push(
        r#"Return ONLY a JSON object like { "relevant": true|false, "reason": "short" } with no extra text."#
            .to_string(),
    );
    parts.push("If the place clearly doesn't fit the task intent/category, mark relevant=false.".to_string());
    parts.push(String::new());
    parts.push("Task:".to_string());
    parts.push(task_json.to_string());
    parts.push(String::new());
    parts.push("Candidate place:".to_string());
    parts.push(candidate_json.to_string());
    parts.push(String::new());
    parts.push("Rules:".to_string());
    parts.push("- Prefer category_hint and required_tags to judge intent.".to_string());
    parts.push(r#"- Generic mismatches (e.g., "spa" task but a burger joint) should be false."#.to_string());
    parts.push("- If ambiguous but likely okay, set true. Be concise.".to_string());
    parts.join("\n")
}

/// Fixed-aspect review scoring prompt. Aspects are scored 1-5 and averaged
/// into an overall rating by the caller.
pub fn build_review_prompt(place_id: &str, reviews: &[String], user_query: Option<&str>) -> String {
    format!(
        r#"System: You are a review analyzer. Read the concatenated review text and output strict JSON:

{{
  "placeId": "{place_id}",
  "aspectScores": [
    {{ "aspect": "might fulfill user need", "score": 1-5 }},
    {{ "aspect": "positiveness of reviews", "score": 1-5 }},
    {{ "aspect": "convenience", "score": 1-5 }},
    {{ "aspect": "cleanliness", "score": 1-5 }},
    {{ "aspect": "service quality", "score": 1-5 }}
  ],
  "confidence": 0.0-1.0
}}

User query: {query}
User: Here are the reviews (concatenated):
{reviews}

Score each aspect from 1 (bad) to 5 (excellent), decimals allowed. Average the scores for overall rating."#,
        place_id = place_id,
        query = user_query.unwrap_or(""),
        reviews = reviews.join(" "),
    )
}
