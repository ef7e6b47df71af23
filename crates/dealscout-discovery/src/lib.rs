//! DealScout Discovery - turns user intent into paginated search requests
//!
//! This crate provides:
//! - Search criteria with a draft/active split for staged filter edits
//! - A pure query builder producing the backend search request
//! - A generation-tagged list fetcher that discards stale responses
//! - Page reconciliation and ellipsis-compressed page-number strips
//! - A discovery session tying the above together for one list view
//! - An analysis tracker that polls a deal's AI analysis until it settles

pub mod analysis;
pub mod criteria;
pub mod error;
pub mod fetcher;
pub mod filter_state;
pub mod flag;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod session;
pub mod settings;

pub use analysis::{AnalysisState, AnalysisTracker};
pub use criteria::{FilterKey, FilterValue, PriceRange, SearchCriteria, Sort, SortOption};
pub use error::{DiscoveryError, Result, ValidationError};
pub use fetcher::{FetchOutcome, ListFetcher, ListStatus, ListView};
pub use filter_state::{FilterState, FilterStatus, is_dirty};
pub use flag::{FileFlagStore, FlagStore, FreeAnalysisFlag, MemoryFlagStore};
pub use pagination::{PageDecision, PageItem, PaginationOptions, PaginationView, Viewport};
pub use ports::{AnalysisBackend, DealList, GoalList, ListKind, ListResult, SearchBackend};
pub use query::{BuiltQuery, QueryMode, build_query, build_validated_query};
pub use session::DiscoverySession;
pub use settings::DiscoverySettings;
