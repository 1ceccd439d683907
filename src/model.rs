use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Place id used when candidate search returns nothing for a task.
pub const NO_CANDIDATE_ID: &str = "no_candidate";

/// Place id used when every candidate was filtered out as irrelevant.
pub const NO_RELEVANT_CANDIDATE_ID: &str = "no_relevant_candidate";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Fixed,
    #[default]
    Flexible,
}

/// One intended activity, as produced by the task extractor.
///
/// Fixed tasks carry an explicit location and are never searched; flexible
/// tasks are resolved through candidate search and scoring.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    pub id: String,

    #[serde(default)]
    pub raw: String,

    #[serde(default, alias = "type")]
    pub kind: TaskKind,

    #[serde(default)]
    pub category_hint: Option<String>,

    #[serde(default)]
    pub required_tags: Vec<String>,

    #[serde(default)]
    pub location: Option<Coord>,

    #[serde(default)]
    pub location_hint: Option<String>,

    #[serde(default)]
    pub max_candidates: Option<usize>,
}

impl Task {
    /// Fixed means "has an explicit location"; the extractor sometimes tags a
    /// task fixed before geocoding resolves it, so the location wins.
    pub fn is_fixed(&self) -> bool {
        self.location.is_some()
    }
}

/// A place under evaluation for one task. Ephemeral, scoped to a single
/// task's candidate set; review enrichment may overwrite `rating` in place.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CandidatePlace {
    pub id: String,
    pub name: String,
    pub location: Coord,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub review_count: Option<u32>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub review_snippets: Vec<String>,
}

impl CandidatePlace {
    /// Synthetic placeholder keeping the one-stop-per-task invariant when no
    /// usable candidate exists.
    pub fn sentinel(id: &str, name: &str, location: Coord) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location,
            rating: None,
            review_count: None,
            tags: Vec::new(),
            address: None,
            review_snippets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OrderedStop {
    pub task_id: String,
    pub place: CandidatePlace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UserPrefs {
    #[serde(default)]
    pub preferred_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Order,
    Optimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Driving,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Walking => write!(f, "walking"),
            TransportMode::Driving => write!(f, "driving"),
        }
    }
}

/// Input to the routing collaborator, derived from the ordered stops.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouteRequest {
    pub origin: Coord,
    pub destinations: Vec<Coord>,
    pub transport_mode: TransportMode,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeneratorInput {
    pub tasks: Vec<Task>,
    pub origin: Coord,
    pub mode: Mode,
    pub transport_mode: TransportMode,

    #[serde(default)]
    pub user_prefs: UserPrefs,

    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorOutput {
    pub itinerary_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub ordered_stops: Vec<OrderedStop>,
    pub summary_scores: Vec<f64>,
    pub route_request: RouteRequest,
}
