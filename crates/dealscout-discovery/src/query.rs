//! Query building: active criteria to backend search request
//!
//! The builder is a pure function of the criteria. Equal criteria always
//! produce equal requests, which is what lets callers compare requests to
//! decide whether anything changed.

use dealscout_client::{SearchFilters, ServerSearchRequest};

use crate::criteria::{FilterKey, SearchCriteria};
use crate::error::ValidationError;

/// How the list is being browsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Paged browsing with pagination controls
    Browse,
    /// Free-text search on one enlarged page; pagination is hidden
    Search,
}

/// A search request together with what the rest of the view needs to know about it
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub request: ServerSearchRequest,
    pub mode: QueryMode,
    /// Whether any filter, price bound or free text narrows the results
    pub constrained: bool,
}

impl BuiltQuery {
    pub fn is_search(&self) -> bool {
        self.mode == QueryMode::Search
    }

    pub fn page(&self) -> u32 {
        self.request.page
    }

    pub fn page_size(&self) -> u32 {
        self.request.page_size
    }
}

/// Map active criteria to the backend request.
///
/// - unconstrained filters are omitted
/// - price bounds are sent only when the range is enabled
/// - free text switches to search mode: page 1 of `search_page_size`
pub fn build_query(active: &SearchCriteria) -> BuiltQuery {
    let free_text = active.free_text.trim();
    let mode = if free_text.is_empty() {
        QueryMode::Browse
    } else {
        QueryMode::Search
    };

    let mut filters = SearchFilters::default();
    for (key, value) in active.filters() {
        let Some(constraint) = value.as_constraint() else {
            continue;
        };
        let slot = match key {
            FilterKey::Category => &mut filters.category,
            FilterKey::Status => &mut filters.status,
            FilterKey::Priority => &mut filters.priority,
        };
        *slot = Some(constraint.to_string());
    }

    let (min_price, max_price) = if active.price_range.enabled {
        (Some(active.price_range.min), Some(active.price_range.max))
    } else {
        (None, None)
    };

    let (page, page_size) = match mode {
        QueryMode::Browse => (active.page, active.page_size),
        QueryMode::Search => (1, active.search_page_size),
    };

    BuiltQuery {
        request: ServerSearchRequest {
            query: (mode == QueryMode::Search).then(|| free_text.to_string()),
            filters,
            min_price,
            max_price,
            sort_by: Some(active.sort.field),
            sort_order: Some(active.sort.direction),
            page,
            page_size,
        },
        mode,
        constrained: active.is_constrained(),
    }
}

/// Validate first; invalid criteria never reach the backend
pub fn build_validated_query(active: &SearchCriteria) -> Result<BuiltQuery, ValidationError> {
    active.validate()?;
    Ok(build_query(active))
}
