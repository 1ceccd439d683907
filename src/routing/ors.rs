use super::{RouteLeg, RoutePlan, Router};
use crate::config::RetryConfig;
use crate::error::RoutingError;
use crate::model::{RouteRequest, TransportMode};
use crate::retry::retry_with_backoff;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub struct OpenRouteService {
    pub api_key: Option<String>,
    pub timeout_sec: u64,
    pub retry: RetryConfig,
}

fn profile_for(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walking => "foot-walking",
        TransportMode::Driving => "driving-car",
    }
}

#[derive(Deserialize)]
struct OrsResponse {
    #[serde(default)]
    routes: Vec<OrsRoute>,
}

#[derive(Deserialize)]
struct OrsRoute {
    geometry: String,
    summary: OrsSummary,
    #[serde(default)]
    segments: Vec<OrsSegment>,
}

#[derive(Deserialize)]
struct OrsSummary {
    distance: f64,
    duration: f64,
}

#[derive(Deserialize)]
struct OrsSegment {
    distance: f64,
    duration: f64,
    #[serde(default)]
    steps: Vec<OrsStep>,
}

#[derive(Deserialize)]
struct OrsStep {
    instruction: String,
}

impl OpenRouteService {
    async fn request_route(&self, api_key: &str, request: &RouteRequest) -> Result<RoutePlan, RoutingError> {
        let profile = profile_for(request.transport_mode);
        let url = format!("https://api.openrouteservice.org/v2/directions/{}", profile);

        // ORS wants lon,lat pairs, origin first
        let coordinates: Vec<[f64; 2]> = std::iter::once(request.origin)
            .chain(request.destinations.iter().copied())
            .map(|c| [c.lon, c.lat])
            .collect();

        let body = json!({
            "coordinates": coordinates,
            "instructions": true,
            "geometry": true,
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_sec))
            .build()?;

        let res = client
            .post(&url)
            .header("Authorization", api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(RoutingError::BadStatus(res.status().as_u16()));
        }

        let data: OrsResponse = res.json().await?;
        let route = data.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;

        let legs = route
            .segments
            .into_iter()
            .map(|seg| RouteLeg {
                distance: seg.distance,
                duration: seg.duration,
                summary: seg
                    .steps
                    .iter()
                    .map(|s| s.instruction.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        Ok(RoutePlan {
            geometry: route.geometry,
            distance_meters: route.summary.distance,
            duration_seconds: route.summary.duration,
            legs,
        })
    }
}

#[async_trait]
impl Router for OpenRouteService {
    async fn route(&self, request: &RouteRequest) -> Result<RoutePlan, RoutingError> {
        let api_key = self.api_key.clone().ok_or(RoutingError::MissingApiKey)?;
        retry_with_backoff(&self.retry, || self.request_route(&api_key, request)).await
    }
}
