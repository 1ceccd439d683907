use crate::geo::haversine_km;
use crate::model::{CandidatePlace, Coord, Task, UserPrefs};
use std::collections::HashSet;

const RATING_WEIGHT: f64 = 0.35;
const POPULARITY_WEIGHT: f64 = 0.15;
const TAG_MATCH_WEIGHT: f64 = 0.40;
const DISTANCE_WEIGHT: f64 = 0.10;

const MIN_RATING: f64 = 3.0;
const MAX_RATING: f64 = 5.0;
const MAX_REVIEW_COUNT: f64 = 500.0;
const DISTANCE_CAP_KM: f64 = 10.0;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Composite score for one candidate against one task, in `[0,1]`.
///
/// Pure and deterministic. Missing data is never rewarded: an absent rating
/// counts as the neutral-low 3.0 and an absent review count as zero. Tag
/// relevance carries the largest weight; distance decays linearly to zero at
/// the 10 km cap.
pub fn score_candidate(
    candidate: &CandidatePlace,
    task: &Task,
    prefs: &UserPrefs,
    reference: Coord,
) -> f64 {
    let rating = candidate.rating.unwrap_or(MIN_RATING);
    let rating_score = clamp01((rating - MIN_RATING) / (MAX_RATING - MIN_RATING));

    let review_count = candidate.review_count.unwrap_or(0) as f64;
    let popularity_score = clamp01((review_count + 1.0).log10() / MAX_REVIEW_COUNT.log10());

    let wanted: HashSet<&str> = task
        .required_tags
        .iter()
        .chain(prefs.preferred_tags.iter())
        .map(String::as_str)
        .collect();
    let tag_match_score = if wanted.is_empty() {
        // No tag information either way; stay neutral
        0.5
    } else {
        let have: HashSet<&str> = candidate.tags.iter().map(String::as_str).collect();
        clamp01(wanted.intersection(&have).count() as f64 / wanted.len() as f64)
    };

    let distance_km = haversine_km(candidate.location, reference);
    let distance_score = clamp01(1.0 - distance_km.min(DISTANCE_CAP_KM) / DISTANCE_CAP_KM);

    RATING_WEIGHT * rating_score
        + POPULARITY_WEIGHT * popularity_score
        + TAG_MATCH_WEIGHT * tag_match_score
        + DISTANCE_WEIGHT * distance_score
}
