//! HTTP recommender backend
//!
//! Endpoints:
//! 1. Recommendations: `POST /recommend` with a JSON body
//! 2. Cluster items: `GET /cluster-items/{item_id}`

use std::time::Duration;

use reqwest::{Client as HttpClient, Response};

use crate::{
    config::Config,
    error::{ClientError, ClientResult},
    models::{BackendBody, ClusterItemsResponse, RecommendResponse, RecommendationRequest},
    services::providers::{RecommenderApi, RequestId, REQUEST_ID_HEADER},
};

pub const RECOMMEND_PATH: &str = "/recommend";

/// Path of the cluster lookup; the id is embedded verbatim
pub fn cluster_items_path(item_id: &str) -> String {
    format!("/cluster-items/{}", item_id)
}

#[derive(Clone)]
pub struct HttpRecommender {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommender {
    /// Creates a backend client for `api_url` (scheme, host and port, no trailing slash)
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        if config.recommender_api_url.is_empty() {
            return Err(ClientError::Config(
                "RECOMMENDER_API_URL cannot be empty".to_string(),
            ));
        }
        Self::new(config.recommender_api_url.clone(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Checks the status, then decodes the body permissively
    async fn read_body<T: BackendBody>(
        &self,
        response: Response,
        request_id: RequestId,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                "Recommender backend returned non-success status"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        tracing::debug!(request_id = %request_id, response = %response_text, "Raw backend response");

        let body = T::from_body(&response_text).map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Failed to decode backend response"
            );
            e
        })?;

        body.into_result()
    }
}

#[async_trait::async_trait]
impl RecommenderApi for HttpRecommender {
    async fn recommend(&self, request: &RecommendationRequest) -> ClientResult<RecommendResponse> {
        let url = format!("{}{}", self.api_url, RECOMMEND_PATH);
        let request_id = RequestId::new();

        let response = self
            .http_client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(request)
            .send()
            .await?;

        let body: RecommendResponse = self.read_body(response, request_id).await?;

        tracing::info!(
            request_id = %request_id,
            item_id = %request.user_item_id,
            viewed_item = body.viewed_item.is_some(),
            recommendations = body.recommendations.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(body)
    }

    async fn cluster_items(&self, item_id: &str) -> ClientResult<ClusterItemsResponse> {
        let url = format!("{}{}", self.api_url, cluster_items_path(item_id));
        let request_id = RequestId::new();

        let response = self
            .http_client
            .get(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        let body: ClusterItemsResponse = self.read_body(response, request_id).await?;

        tracing::info!(
            request_id = %request_id,
            item_id = %item_id,
            cluster_id = ?body.cluster_id,
            items = body.items.len(),
            provider = self.name(),
            "Cluster items fetched"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
