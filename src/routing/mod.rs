mod ors;

pub use ors::OpenRouteService;

use crate::config::Config;
use crate::error::RoutingError;
use crate::model::RouteRequest;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Computed route returned by the routing collaborator. Route computation
/// happens after the core pipeline has produced its output; its failures are
/// a separate fatal category reported by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    /// Encoded path geometry, opaque to this crate.
    pub geometry: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
}

#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<RoutePlan, RoutingError>;
}

pub fn create_router(config: &Config) -> Arc<dyn Router> {
    Arc::new(OpenRouteService {
        api_key: config.routing_api_key(),
        timeout_sec: config.timeout_sec,
        retry: config.retry.clone(),
    })
}
