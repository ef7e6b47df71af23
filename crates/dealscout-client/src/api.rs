// DealScoutApiClient - facade for the list and analysis endpoints

use crate::{
    config::ClientConfig,
    constants::api_path,
    error::Result,
    http::DealScoutHttpClient,
    model::{AnalysisResponse, Deal, Goal, ListResponse, ServerSearchRequest},
};

/// Typed client for the DealScout backend
#[derive(Clone, Debug)]
pub struct DealScoutApiClient {
    http_client: DealScoutHttpClient,
}

impl DealScoutApiClient {
    /// Create a new API client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = DealScoutHttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Wrap an already configured HTTP client
    pub fn from_http_client(http_client: DealScoutHttpClient) -> Self {
        Self { http_client }
    }

    // ============================================================================
    // Search APIs
    // ============================================================================

    pub async fn search_deals(&self, request: &ServerSearchRequest) -> Result<ListResponse<Deal>> {
        self.http_client
            .post_json(api_path::DEAL_SEARCH, request)
            .await
    }

    pub async fn search_goals(&self, request: &ServerSearchRequest) -> Result<ListResponse<Goal>> {
        self.http_client
            .post_json(api_path::GOAL_SEARCH, request)
            .await
    }

    // ============================================================================
    // Analysis APIs
    // ============================================================================

    /// Ask the backend to start analysing a deal
    pub async fn request_analysis(&self, deal_id: &str) -> Result<AnalysisResponse> {
        self.http_client
            .post_empty(&api_path::deal_analysis(deal_id))
            .await
    }

    /// Read the current analysis state of a deal
    pub async fn get_analysis(&self, deal_id: &str) -> Result<AnalysisResponse> {
        self.http_client
            .get(&api_path::deal_analysis(deal_id))
            .await
    }
}
