mod foursquare;
mod google;

pub use foursquare::FoursquarePlaces;
pub use google::GoogleReviews;

use crate::config::Config;
use crate::error::{PlacesError, ReviewsError};
use crate::model::{CandidatePlace, Coord};
use async_trait::async_trait;
use std::sync::Arc;

/// Geo-indexed places directory. Results come back in provider relevance
/// order, not sorted by distance.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn search(
        &self,
        query: &str,
        anchor: Coord,
        limit: usize,
    ) -> Result<Vec<CandidatePlace>, PlacesError>;
}

/// Review provider: resolve a provider-side place id from name and address,
/// then fetch review texts for it.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn lookup_place_id(&self, name: &str, address: &str) -> Result<Option<String>, ReviewsError>;

    async fn fetch_reviews(&self, place_id: &str) -> Result<Vec<String>, ReviewsError>;
}

pub fn create_place_source(config: &Config) -> Arc<dyn PlaceSource> {
    Arc::new(FoursquarePlaces {
        api_key: config.places_api_key(),
        api_version: config.places.api_version.clone(),
        timeout_sec: config.timeout_sec,
        retry: config.retry.clone(),
    })
}

pub fn create_review_source(config: &Config) -> Arc<dyn ReviewSource> {
    Arc::new(GoogleReviews {
        api_key: config.reviews_api_key(),
        timeout_sec: config.timeout_sec,
    })
}
