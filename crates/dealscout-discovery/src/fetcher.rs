//! Generation-tagged list fetching
//!
//! Every fetch takes the next generation number and publishes a `Loading`
//! view with the previous items cleared. When the backend answers, the
//! result is published only if no newer fetch was issued in the meantime and
//! the view is still mounted; anything else is dropped without a state
//! change.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::ports::{ListKind, ListResult, SearchBackend};
use crate::query::BuiltQuery;

/// What the list area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing fetched yet
    Idle,
    Loading,
    Ready,
    /// Zero matches; `filtered` tells "no results for these filters" apart
    /// from an empty list
    Empty { filtered: bool },
    /// Generic failure message; the cause is logged
    Failed { message: String },
}

impl ListStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListStatus::Loading)
    }
}

/// Published state of one list view
#[derive(Debug, Clone)]
pub struct ListView<R> {
    pub status: ListStatus,
    pub items: Vec<R>,
    pub total: u64,
    /// Generation this view was produced by
    pub generation: u64,
}

impl<R> Default for ListView<R> {
    fn default() -> Self {
        Self {
            status: ListStatus::Idle,
            items: Vec::new(),
            total: 0,
            generation: 0,
        }
    }
}

impl<R> ListView<R> {
    fn loading(generation: u64) -> Self {
        Self {
            status: ListStatus::Loading,
            generation,
            ..Default::default()
        }
    }

    fn failed(kind: ListKind, generation: u64) -> Self {
        Self {
            status: ListStatus::Failed {
                message: failure_message(kind),
            },
            generation,
            ..Default::default()
        }
    }
}

/// Result of a single fetch as seen by the caller
#[derive(Debug, Clone)]
pub enum FetchOutcome<R> {
    /// Latest generation; the view now shows this result
    Applied(ListResult<R>),
    /// Latest generation failed; the view shows the error
    Failed,
    /// A newer fetch was issued while this one was in flight
    Stale,
    /// The view was unmounted; nothing was published
    Unmounted,
}

impl<R> FetchOutcome<R> {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied(_))
    }
}

#[derive(Debug)]
struct FetchState {
    latest: u64,
    mounted: bool,
}

pub fn failure_message(kind: ListKind) -> String {
    format!("Failed to load {}. Please try again.", kind.noun())
}

/// Issues list requests and publishes the latest result
pub struct ListFetcher<B: SearchBackend> {
    backend: Arc<B>,
    state: Arc<Mutex<FetchState>>,
    view: Arc<watch::Sender<ListView<B::Record>>>,
}

impl<B: SearchBackend> Clone for ListFetcher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: self.state.clone(),
            view: self.view.clone(),
        }
    }
}

impl<B: SearchBackend> ListFetcher<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (view, _) = watch::channel(ListView::default());
        Self {
            backend,
            state: Arc::new(Mutex::new(FetchState {
                latest: 0,
                mounted: true,
            })),
            view: Arc::new(view),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.backend.kind()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView<B::Record>> {
        self.view.subscribe()
    }

    /// Snapshot of the published view
    pub fn view(&self) -> ListView<B::Record> {
        self.view.borrow().clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.state.lock().latest
    }

    pub fn is_mounted(&self) -> bool {
        self.state.lock().mounted
    }

    /// Stop publishing. Requests still in flight resolve into nothing.
    pub fn unmount(&self) {
        self.state.lock().mounted = false;
        debug!(kind = %self.kind(), "List view unmounted");
    }

    pub async fn fetch(&self, query: &BuiltQuery) -> FetchOutcome<B::Record> {
        let kind = self.kind();
        let generation = {
            let mut state = self.state.lock();
            if !state.mounted {
                return FetchOutcome::Unmounted;
            }
            state.latest += 1;
            self.view.send_replace(ListView::loading(state.latest));
            state.latest
        };

        debug!(
            %kind,
            generation,
            page = query.page(),
            page_size = query.page_size(),
            search = query.is_search(),
            "Issuing list request"
        );

        let result = self.backend.search(&query.request).await;

        let state = self.state.lock();
        if !state.mounted {
            debug!(%kind, generation, "Dropping response for unmounted view");
            return FetchOutcome::Unmounted;
        }
        if generation != state.latest {
            debug!(
                %kind,
                generation,
                latest = state.latest,
                "Discarding stale response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(list) => {
                let status = if list.total == 0 {
                    ListStatus::Empty {
                        filtered: query.constrained,
                    }
                } else {
                    ListStatus::Ready
                };
                self.view.send_replace(ListView {
                    status,
                    items: list.items.clone(),
                    total: list.total,
                    generation,
                });
                FetchOutcome::Applied(list)
            }
            Err(e) => {
                if e.is_server_response() {
                    warn!(%kind, generation, error = %e, "List request rejected");
                } else {
                    error!(%kind, generation, error = %e, "List request failed");
                }
                self.view.send_replace(ListView::failed(kind, generation));
                FetchOutcome::Failed
            }
        }
    }
}
