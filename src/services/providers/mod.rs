//! Recommender backend abstraction
//!
//! The orchestrator only talks to the backend through this trait, so the
//! HTTP transport can be swapped for a scripted fake in tests.

use crate::{
    error::ClientResult,
    models::{ClusterItemsResponse, RecommendResponse, RecommendationRequest},
};

pub mod http;
pub mod request_id;

pub use http::{cluster_items_path, HttpRecommender, RECOMMEND_PATH};
pub use request_id::{RequestId, REQUEST_ID_HEADER};

/// Trait for recommender backends
///
/// Implementations return `Ok` only for bodies the client can render. An
/// unreachable host, a non-success status, an unreadable body, or a body
/// carrying an `error` field all come back as `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommenderApi: Send + Sync {
    /// Ranked recommendations plus the viewed item for `request.user_item_id`
    async fn recommend(&self, request: &RecommendationRequest) -> ClientResult<RecommendResponse>;

    /// Items sharing a cluster with `item_id`.
    ///
    /// `item_id` is used exactly as given: no trimming, no escaping.
    async fn cluster_items(&self, item_id: &str) -> ClientResult<ClusterItemsResponse>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
