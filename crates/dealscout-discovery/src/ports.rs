// Backend seams used by the discovery engine
// The API client implements them for real use; tests plug in fakes.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use dealscout_client::{
    AnalysisResponse, ClientError, DealScoutApiClient, Deal, Goal, ListResponse,
    ServerSearchRequest,
};

/// One page of records plus the server's total over the filtered set
pub type ListResult<R> = ListResponse<R>;

/// Which list a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Deals,
    Goals,
}

impl ListKind {
    /// Plural noun used in user-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            ListKind::Deals => "deals",
            ListKind::Goals => "goals",
        }
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.noun())
    }
}

/// Paginated search over one kind of record
#[async_trait]
pub trait SearchBackend: Send + Sync {
    type Record: Clone + Send + Sync + 'static;

    fn kind(&self) -> ListKind;

    async fn search(
        &self,
        request: &ServerSearchRequest,
    ) -> Result<ListResult<Self::Record>, ClientError>;
}

/// Analysis endpoints the poller depends on
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn request_analysis(&self, deal_id: &str) -> Result<AnalysisResponse, ClientError>;

    async fn get_analysis(&self, deal_id: &str) -> Result<AnalysisResponse, ClientError>;
}

/// Deals list backed by the HTTP API
#[derive(Clone, Debug)]
pub struct DealList {
    client: DealScoutApiClient,
}

impl DealList {
    pub fn new(client: DealScoutApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for DealList {
    type Record = Deal;

    fn kind(&self) -> ListKind {
        ListKind::Deals
    }

    async fn search(&self, request: &ServerSearchRequest) -> Result<ListResult<Deal>, ClientError> {
        self.client.search_deals(request).await
    }
}

/// Goals list backed by the HTTP API
#[derive(Clone, Debug)]
pub struct GoalList {
    client: DealScoutApiClient,
}

impl GoalList {
    pub fn new(client: DealScoutApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for GoalList {
    type Record = Goal;

    fn kind(&self) -> ListKind {
        ListKind::Goals
    }

    async fn search(&self, request: &ServerSearchRequest) -> Result<ListResult<Goal>, ClientError> {
        self.client.search_goals(request).await
    }
}

#[async_trait]
impl AnalysisBackend for DealScoutApiClient {
    async fn request_analysis(&self, deal_id: &str) -> Result<AnalysisResponse, ClientError> {
        DealScoutApiClient::request_analysis(self, deal_id).await
    }

    async fn get_analysis(&self, deal_id: &str) -> Result<AnalysisResponse, ClientError> {
        DealScoutApiClient::get_analysis(self, deal_id).await
    }
}
