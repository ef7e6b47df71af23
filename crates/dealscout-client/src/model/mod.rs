// Wire model types for the DealScout API

pub mod analysis;
pub mod common;
pub mod deal;
pub mod goal;
pub mod search;

pub use analysis::{Analysis, AnalysisResponse, AnalysisStatus};
pub use common::ListResponse;
pub use deal::Deal;
pub use goal::Goal;
pub use search::{SearchFilters, ServerSearchRequest, SortDirection, SortField};
