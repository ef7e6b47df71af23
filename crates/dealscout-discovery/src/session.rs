//! One list view: filter panel, fetcher and pagination wired together
//!
//! Every operation that changes the effective criteria issues exactly one
//! request, plus at most one corrective re-fetch when the requested page no
//! longer exists. Operations that change nothing return `Ok(None)` without
//! touching the backend.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::criteria::{SearchCriteria, SortOption};
use crate::error::{DiscoveryError, Result};
use crate::fetcher::{FetchOutcome, ListFetcher, ListView};
use crate::filter_state::{FilterState, FilterStatus};
use crate::pagination::{PageDecision, PaginationOptions, PaginationView, Viewport, reconcile};
use crate::ports::SearchBackend;
use crate::query::{BuiltQuery, build_query, build_validated_query};

pub struct DiscoverySession<B: SearchBackend> {
    filters: FilterState,
    fetcher: ListFetcher<B>,
    pagination: PaginationView,
    options: PaginationOptions,
    viewport: Viewport,
    last_query: Option<BuiltQuery>,
}

impl<B: SearchBackend> DiscoverySession<B> {
    pub fn new(backend: Arc<B>, initial: SearchCriteria, options: PaginationOptions) -> Self {
        Self {
            filters: FilterState::new(initial),
            fetcher: ListFetcher::new(backend),
            pagination: PaginationView::default(),
            options,
            viewport: Viewport::default(),
            last_query: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // ============== Accessors ==============

    /// Active criteria
    pub fn criteria(&self) -> &SearchCriteria {
        self.filters.active()
    }

    pub fn draft(&self) -> &SearchCriteria {
        self.filters.draft()
    }

    pub fn status(&self) -> FilterStatus {
        self.filters.status()
    }

    pub fn is_dirty(&self) -> bool {
        self.filters.is_dirty()
    }

    pub fn view(&self) -> ListView<B::Record> {
        self.fetcher.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView<B::Record>> {
        self.fetcher.subscribe()
    }

    pub fn pagination(&self) -> &PaginationView {
        &self.pagination
    }

    /// Request sent by the most recent fetch
    pub fn last_query(&self) -> Option<&BuiltQuery> {
        self.last_query.as_ref()
    }

    pub fn fetcher(&self) -> &ListFetcher<B> {
        &self.fetcher
    }

    pub fn is_mounted(&self) -> bool {
        self.fetcher.is_mounted()
    }

    /// Re-render the page strip for another width; no request is issued
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !self.pagination.hidden {
            self.pagination = PaginationView::new(
                self.pagination.current,
                self.pagination.total,
                self.effective_page_size(),
                self.options.max_visible(viewport),
            );
        }
    }

    // ============== Lifecycle ==============

    /// Initial fetch with the criteria the session was created with
    pub async fn mount(&mut self) -> Result<FetchOutcome<B::Record>> {
        self.ensure_mounted()?;
        info!(kind = %self.fetcher.kind(), "Mounting list view");
        self.refresh().await
    }

    /// Stop all further updates. Later operations fail with `Unmounted`.
    pub fn unmount(&mut self) {
        self.fetcher.unmount();
    }

    // ============== Draft operations (no request) ==============

    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut SearchCriteria)) -> Result<()> {
        self.ensure_mounted()?;
        self.filters.edit_draft(edit);
        Ok(())
    }

    pub fn reset_draft(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        self.filters.reset_draft();
        Ok(())
    }

    // ============== Triggering operations ==============

    pub async fn apply_filters(&mut self) -> Result<Option<FetchOutcome<B::Record>>> {
        self.ensure_mounted()?;
        if !self.filters.apply()? {
            debug!("Nothing to apply");
            return Ok(None);
        }
        self.refresh().await.map(Some)
    }

    pub async fn select_sort(
        &mut self,
        option: SortOption,
    ) -> Result<Option<FetchOutcome<B::Record>>> {
        self.ensure_mounted()?;
        if !self.filters.select_sort(option.sort()) {
            return Ok(None);
        }
        self.refresh().await.map(Some)
    }

    pub async fn submit_search(&mut self, text: &str) -> Result<FetchOutcome<B::Record>> {
        self.ensure_mounted()?;
        self.filters.submit_search(text);
        self.refresh().await
    }

    pub async fn clear_search(&mut self) -> Result<Option<FetchOutcome<B::Record>>> {
        self.ensure_mounted()?;
        if !self.filters.clear_search() {
            return Ok(None);
        }
        self.refresh().await.map(Some)
    }

    /// Pager navigation. Ignored in search mode, where controls are hidden.
    pub async fn go_to_page(&mut self, page: u32) -> Result<Option<FetchOutcome<B::Record>>> {
        self.ensure_mounted()?;
        if self.filters.active().is_search() {
            debug!(page, "Ignoring page change in search mode");
            return Ok(None);
        }
        if !self.filters.set_page(page)? {
            return Ok(None);
        }
        self.refresh().await.map(Some)
    }

    /// Re-issue the active request
    pub async fn retry(&mut self) -> Result<FetchOutcome<B::Record>> {
        self.ensure_mounted()?;
        self.refresh().await
    }

    // ============== Internals ==============

    fn ensure_mounted(&self) -> Result<()> {
        if self.fetcher.is_mounted() {
            Ok(())
        } else {
            Err(DiscoveryError::Unmounted)
        }
    }

    fn effective_page_size(&self) -> u32 {
        self.last_query
            .as_ref()
            .map(BuiltQuery::page_size)
            .unwrap_or(self.filters.active().page_size)
    }

    async fn refresh(&mut self) -> Result<FetchOutcome<B::Record>> {
        let mut query = match build_validated_query(self.filters.active()) {
            Ok(query) => query,
            Err(e) => {
                self.filters.settle();
                return Err(e.into());
            }
        };

        let mut outcome = self.fetcher.fetch(&query).await;
        let decision = match &outcome {
            FetchOutcome::Applied(list) => reconcile(&query, list),
            _ => PageDecision::Keep,
        };
        match decision {
            PageDecision::Keep => {}
            PageDecision::AdoptServerPage(page) => {
                debug!(requested = query.page(), served = page, "Adopting server page");
                self.filters.adopt_server_page(page);
            }
            PageDecision::ClampAndRefetch => {
                warn!(
                    requested = query.page(),
                    "Requested page out of range, returning to page 1"
                );
                self.filters.adopt_server_page(1);
                query = build_query(self.filters.active());
                outcome = self.fetcher.fetch(&query).await;
            }
        }

        self.update_pagination(&query, &outcome);
        self.last_query = Some(query);
        self.filters.settle();
        Ok(outcome)
    }

    fn update_pagination(&mut self, query: &BuiltQuery, outcome: &FetchOutcome<B::Record>) {
        self.pagination = match outcome {
            FetchOutcome::Applied(list) if query.is_search() => PaginationView::hidden(list.total),
            FetchOutcome::Applied(list) => PaginationView::new(
                self.filters.active().page,
                list.total,
                list.page_size.filter(|size| *size > 0).unwrap_or(query.page_size()),
                self.options.max_visible(self.viewport),
            ),
            FetchOutcome::Failed if query.is_search() => PaginationView::hidden(0),
            FetchOutcome::Failed => PaginationView::default(),
            FetchOutcome::Stale | FetchOutcome::Unmounted => return,
        };
    }
}
