use super::ReviewSource;
use crate::error::ReviewsError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const FIND_PLACE_URL: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

pub struct GoogleReviews {
    pub api_key: Option<String>,
    pub timeout_sec: u64,
}

#[derive(Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<PlaceIdCandidate>,
}

#[derive(Deserialize)]
struct PlaceIdCandidate {
    place_id: String,
}

#[derive(Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Deserialize, Default)]
struct DetailsResult {
    #[serde(default)]
    reviews: Vec<Review>,
}

#[derive(Deserialize)]
struct Review {
    #[serde(default)]
    text: Option<String>,
}

impl GoogleReviews {
    fn client(&self) -> Result<reqwest::Client, ReviewsError> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_sec))
            .build()?)
    }
}

#[async_trait]
impl ReviewSource for GoogleReviews {
    async fn lookup_place_id(&self, name: &str, address: &str) -> Result<Option<String>, ReviewsError> {
        let api_key = self.api_key.as_deref().ok_or(ReviewsError::MissingApiKey)?;
        let input = format!("{}, {}", name, address);

        let res = self
            .client()?
            .get(FIND_PLACE_URL)
            .query(&[
                ("input", input.as_str()),
                ("inputtype", "textquery"),
                ("fields", "place_id"),
                ("key", api_key),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ReviewsError::BadStatus(res.status().as_u16()));
        }

        let data: FindPlaceResponse = res.json().await?;
        Ok(data.candidates.into_iter().next().map(|c| c.place_id))
    }

    async fn fetch_reviews(&self, place_id: &str) -> Result<Vec<String>, ReviewsError> {
        let api_key = self.api_key.as_deref().ok_or(ReviewsError::MissingApiKey)?;

        let res = self
            .client()?
            .get(DETAILS_URL)
            .query(&[("place_id", place_id), ("fields", "reviews"), ("key", api_key)])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ReviewsError::BadStatus(res.status().as_u16()));
        }

        let data: DetailsResponse = res.json().await?;
        Ok(data
            .result
            .unwrap_or_default()
            .reviews
            .into_iter()
            .filter_map(|r| r.text)
            .filter(|t| !t.is_empty())
            .collect())
    }
}
