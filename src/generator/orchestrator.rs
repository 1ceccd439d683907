use crate::agents::{analyze_reviews, check_relevance, VerdictSource};
use crate::config::Config;
use crate::error::GeneratorError;
use crate::geo::haversine_km;
use crate::llm::LlmClient;
use crate::model::{
    CandidatePlace, Coord, GeneratorInput, GeneratorOutput, Mode, OrderedStop, RouteRequest, Task,
    NO_CANDIDATE_ID, NO_RELEVANT_CANDIDATE_ID,
};
use crate::places::{PlaceSource, ReviewSource};
use crate::progress::ProgressRegistry;
use crate::scorer::score_candidate;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::tour::nearest_neighbor_order;

/// External services the pipeline consumes. Everything here is replaceable;
/// tests inject doubles.
#[derive(Clone)]
pub struct Collaborators {
    pub llm: Arc<dyn LlmClient>,
    pub places: Arc<dyn PlaceSource>,
    pub reviews: Arc<dyn ReviewSource>,
}

pub struct Generator {
    collaborators: Collaborators,
    progress: Arc<ProgressRegistry>,
    search_limit: usize,
    candidate_concurrency: usize,
}

impl Generator {
    pub fn new(collaborators: Collaborators, progress: Arc<ProgressRegistry>, config: &Config) -> Self {
        Self {
            collaborators,
            progress,
            search_limit: config.places.search_limit,
            candidate_concurrency: config.candidate_concurrency.max(1),
        }
    }

    /// Run the full pipeline: validate, place every task in input order,
    /// optionally reorder via the greedy tour, and build the route request.
    ///
    /// Exactly one stop per input task, always; tasks with no usable
    /// candidate get a sentinel stop instead of being dropped.
    pub async fn generate(&self, input: GeneratorInput) -> Result<GeneratorOutput, GeneratorError> {
        validate(&input)?;

        let job_id = input.job_id.as_deref();
        let flexible_total = input.tasks.iter().filter(|t| !t.is_fixed()).count();

        info!(
            "Generating itinerary: {} tasks ({} flexible), mode {:?}",
            input.tasks.len(),
            flexible_total,
            input.mode
        );
        self.progress.report(job_id, "Searching locations");

        let mut stops: Vec<OrderedStop> = Vec::with_capacity(input.tasks.len());
        let mut flex_idx = 0usize;

        for task in &input.tasks {
            if let Some(location) = task.location {
                // Fixed tasks are placed directly and never searched
                stops.push(OrderedStop {
                    task_id: task.id.clone(),
                    place: CandidatePlace::sentinel(
                        &task.id,
                        task.location_hint
                            .as_deref()
                            .unwrap_or(&format!("Fixed task {}", task.id)),
                        location,
                    ),
                });
                continue;
            }

            flex_idx += 1;
            let anchor = stops.last().map(|s| s.place.location).unwrap_or(input.origin);
            let place = self
                .place_flexible_task(&input, task, anchor, job_id, flex_idx, flexible_total)
                .await;
            stops.push(OrderedStop {
                task_id: task.id.clone(),
                place,
            });
        }

        self.progress.report(job_id, "Optimizing route");
        let ordered_stops = if input.mode == Mode::Optimize && stops.len() > 2 {
            nearest_neighbor_order(&stops)
        } else {
            stops
        };

        let tasks_by_id: HashMap<&str, &Task> =
            input.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let summary_scores = ordered_stops
            .iter()
            .map(|s| {
                tasks_by_id
                    .get(s.task_id.as_str())
                    .map(|t| score_candidate(&s.place, t, &input.user_prefs, input.origin))
                    .unwrap_or(0.0)
            })
            .collect();

        let route_request = RouteRequest {
            origin: input.origin,
            destinations: ordered_stops.iter().map(|s| s.place.location).collect(),
            transport_mode: input.transport_mode,
        };

        self.progress.report(job_id, "Done");

        Ok(GeneratorOutput {
            itinerary_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            ordered_stops,
            summary_scores,
            route_request,
        })
    }

    /// Resolve one flexible task: search near the anchor, filter, sort by
    /// distance, enrich, score, pick the arg-max. No stage is fatal.
    async fn place_flexible_task(
        &self,
        input: &GeneratorInput,
        task: &Task,
        anchor: Coord,
        job_id: Option<&str>,
        flex_idx: usize,
        flexible_total: usize,
    ) -> CandidatePlace {
        self.progress.report(
            job_id,
            &format!("Searching locations for task {}/{}", flex_idx, flexible_total),
        );

        let query = build_query(task);
        let limit = task.max_candidates.unwrap_or(self.search_limit);

        let candidates = match self.collaborators.places.search(&query, anchor, limit).await {
            Ok(c) => c,
            Err(e) => {
                warn!("Candidate search failed for task {}: {}", task.id, e);
                Vec::new()
            }
        };

        if candidates.is_empty() {
            debug!("No candidates for task {} (query '{}')", task.id, query);
            return CandidatePlace::sentinel(
                NO_CANDIDATE_ID,
                "No candidate — requires user input",
                anchor,
            );
        }

        self.progress.report(
            job_id,
            &format!("Filtering locations for task {}/{}", flex_idx, flexible_total),
        );

        let mut candidates = self.filter_relevant(task, candidates, anchor).await;
        if candidates.is_empty() {
            debug!("All candidates filtered out for task {}", task.id);
            candidates = vec![CandidatePlace::sentinel(
                NO_RELEVANT_CANDIDATE_ID,
                "No relevant candidate — requires user input",
                anchor,
            )];
        }

        // Nearest first: the effective tie-break for scoring, and a bound on
        // how much enrichment work the top of the list needs
        candidates.sort_by(|a, b| {
            let da = haversine_km(anchor, a.location);
            let db = haversine_km(anchor, b.location);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

        self.progress.report(
            job_id,
            &format!("Checking reviews for task {}/{}", flex_idx, flexible_total),
        );

        let candidates: Vec<CandidatePlace> = stream::iter(candidates)
            .map(|c| self.enrich_candidate(&task.raw, c))
            .buffered(self.candidate_concurrency)
            .collect()
            .await;

        self.progress.report(
            job_id,
            &format!("Scoring candidates for task {}/{}", flex_idx, flexible_total),
        );

        let scores: Vec<f64> = candidates
            .iter()
            .map(|c| {
                let score = score_candidate(c, task, &input.user_prefs, anchor);
                debug!("Task {} candidate {} scored {:.4}", task.id, c.id, score);
                score
            })
            .collect();

        // Strict comparison keeps the earliest (nearest) candidate on ties
        let mut winner = 0;
        for i in 1..scores.len() {
            if scores[i] > scores[winner] {
                winner = i;
            }
        }

        info!(
            "Task {} resolved to {} (score {:.4})",
            task.id, candidates[winner].id, scores[winner]
        );
        let mut candidates = candidates;
        candidates.swap_remove(winner)
    }

    /// Relevance-check every candidate with bounded, order-preserving
    /// fan-out. Verdicts never fail; the classifier degrades to a keyword
    /// heuristic internally.
    async fn filter_relevant(
        &self,
        task: &Task,
        candidates: Vec<CandidatePlace>,
        anchor: Coord,
    ) -> Vec<CandidatePlace> {
        let verdicts: Vec<(CandidatePlace, _)> = stream::iter(candidates)
            .map(|c| {
                let llm = self.collaborators.llm.clone();
                async move {
                    let distance = haversine_km(anchor, c.location);
                    let verdict = check_relevance(llm.as_ref(), task, &c, Some(distance)).await;
                    (c, verdict)
                }
            })
            .buffered(self.candidate_concurrency)
            .collect()
            .await;

        verdicts
            .into_iter()
            .filter_map(|(c, v)| {
                if v.source == VerdictSource::Heuristic {
                    debug!("Heuristic verdict for {}: {}", c.id, v.relevant);
                }
                v.relevant.then_some(c)
            })
            .collect()
    }

    /// Best-effort review enrichment: resolve a provider place id, fetch
    /// review texts (falling back to the candidate's own snippets), and let
    /// the aspect scorer overwrite the rating. Every failure is swallowed.
    async fn enrich_candidate(&self, task_raw: &str, mut candidate: CandidatePlace) -> CandidatePlace {
        let mut reviews: Vec<String> = Vec::new();

        if let Some(address) = candidate.address.clone() {
            match self
                .collaborators
                .reviews
                .lookup_place_id(&candidate.name, &address)
                .await
            {
                Ok(Some(place_id)) => match self.collaborators.reviews.fetch_reviews(&place_id).await {
                    Ok(texts) => reviews = texts,
                    Err(e) => debug!("Review fetch failed for {}: {}", candidate.name, e),
                },
                Ok(None) => debug!("No provider place id for {}", candidate.name),
                Err(e) => debug!("Place id lookup failed for {}: {}", candidate.name, e),
            }
        }

        if reviews.is_empty() && !candidate.review_snippets.is_empty() {
            reviews = candidate.review_snippets.clone();
        }

        if !reviews.is_empty() {
            let analysis = analyze_reviews(
                self.collaborators.llm.as_ref(),
                &candidate.id,
                &reviews,
                Some(task_raw),
            )
            .await;
            candidate.rating = Some(analysis.rating);
        }

        candidate
    }
}

fn validate(input: &GeneratorInput) -> Result<(), GeneratorError> {
    if input.tasks.is_empty() {
        return Err(GeneratorError::EmptyTasks);
    }
    if !input.origin.lat.is_finite() || !input.origin.lon.is_finite() {
        return Err(GeneratorError::InvalidOrigin);
    }
    let mut seen = HashSet::new();
    for task in &input.tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(GeneratorError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

/// Query priority: category hint, then joined required tags, then raw text.
fn build_query(task: &Task) -> String {
    if let Some(hint) = task.category_hint.as_deref() {
        if !hint.is_empty() {
            return hint.replace('_', " ");
        }
    }
    if !task.required_tags.is_empty() {
        return task.required_tags.join(" ");
    }
    task.raw.clone()
}
