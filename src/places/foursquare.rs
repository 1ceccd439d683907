use super::PlaceSource;
use crate::config::RetryConfig;
use crate::error::PlacesError;
use crate::model::{CandidatePlace, Coord};
use crate::retry::retry_with_backoff;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SEARCH_URL: &str = "https://places-api.foursquare.com/places/search";

pub struct FoursquarePlaces {
    pub api_key: Option<String>,
    pub api_version: String,
    pub timeout_sec: u64,
    pub retry: RetryConfig,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<FsqPlace>,
}

#[derive(Deserialize)]
struct FsqPlace {
    #[serde(default)]
    fsq_place_id: Option<String>,
    #[serde(default)]
    fsq_id: Option<String>,
    name: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    geocodes: Option<Geocodes>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    categories: Vec<FsqCategory>,
    #[serde(default)]
    location: Option<FsqLocation>,
}

#[derive(Deserialize)]
struct Geocodes {
    #[serde(default)]
    main: Option<GeocodePoint>,
}

#[derive(Deserialize)]
struct GeocodePoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct FsqCategory {
    name: String,
}

#[derive(Deserialize, Default)]
struct FsqLocation {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl FsqLocation {
    fn joined(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.address.as_deref(),
            self.locality.as_deref(),
            self.region.as_deref(),
            self.postcode.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl FoursquarePlaces {
    async fn request_search(
        &self,
        api_key: &str,
        query: &str,
        anchor: Coord,
        limit: usize,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        let ll = format!("{},{}", anchor.lat, anchor.lon);
        let limit = limit.to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_sec))
            .build()?;

        debug!("Searching places near {} with query '{}'", ll, query);

        let res = client
            .get(SEARCH_URL)
            .query(&[("ll", ll.as_str()), ("query", query), ("limit", limit.as_str())])
            .header("accept", "application/json")
            .header("X-Places-Api-Version", &self.api_version)
            .bearer_auth(api_key)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(PlacesError::BadStatus(res.status().as_u16()));
        }

        let data: SearchResponse = res.json().await?;

        let candidates = data
            .results
            .into_iter()
            .filter_map(|p| {
                let (lat, lon) = match (&p.geocodes, p.latitude, p.longitude) {
                    (Some(Geocodes { main: Some(g) }), _, _) => (g.latitude, g.longitude),
                    (_, Some(lat), Some(lon)) => (lat, lon),
                    _ => return None,
                };
                let id = p.fsq_place_id.or(p.fsq_id)?;
                Some(CandidatePlace {
                    id,
                    name: p.name,
                    location: Coord { lat, lon },
                    rating: p.rating,
                    review_count: None,
                    tags: p.categories.into_iter().map(|c| c.name).collect(),
                    address: p.location.as_ref().and_then(FsqLocation::joined),
                    review_snippets: Vec::new(),
                })
            })
            .collect();

        Ok(candidates)
    }
}

#[async_trait]
impl PlaceSource for FoursquarePlaces {
    async fn search(
        &self,
        query: &str,
        anchor: Coord,
        limit: usize,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        let api_key = self.api_key.clone().ok_or(PlacesError::MissingApiKey)?;
        retry_with_backoff(&self.retry, || {
            self.request_search(&api_key, query, anchor, limit)
        })
        .await
    }
}
