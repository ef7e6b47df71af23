//! AI analysis polling for a single deal
//!
//! `NotRequested -> Pending -> {Completed, Error}`. While pending, a
//! background task reads the analysis every poll interval until a terminal
//! status arrives. The task ends on its own at that point, and `stop()` or
//! dropping the tracker aborts it early.

use std::sync::Arc;
use std::time::Duration;

use dealscout_client::{Analysis, AnalysisResponse, AnalysisStatus, ClientError};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::error::{DiscoveryError, Result};
use crate::flag::FreeAnalysisFlag;
use crate::ports::AnalysisBackend;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const REQUEST_FAILED_MESSAGE: &str = "Failed to request analysis. Please try again.";
const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed.";

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    NotRequested,
    Pending,
    Completed(Analysis),
    Error(String),
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisState::Completed(_) | AnalysisState::Error(_))
    }

    fn from_response(response: AnalysisResponse) -> Self {
        match response.status {
            AnalysisStatus::Pending => AnalysisState::Pending,
            AnalysisStatus::Completed => {
                AnalysisState::Completed(response.analysis.unwrap_or_default())
            }
            AnalysisStatus::Error => AnalysisState::Error(
                response
                    .error
                    .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string()),
            ),
        }
    }
}

struct Shared {
    state: watch::Sender<AnalysisState>,
    live: Mutex<bool>,
    flag: Option<Arc<FreeAnalysisFlag>>,
}

impl Shared {
    fn is_live(&self) -> bool {
        *self.live.lock()
    }

    /// Publish a new state unless the tracker was stopped
    fn publish(&self, state: AnalysisState) -> bool {
        let live = self.live.lock();
        if !*live {
            return false;
        }
        if let (AnalysisState::Completed(_), Some(flag)) = (&state, &self.flag) {
            if let Err(e) = flag.mark_used() {
                warn!(error = %e, "Failed to persist free analysis flag");
            }
        }
        self.state.send_replace(state);
        true
    }
}

/// Tracks the analysis of one deal at a time
pub struct AnalysisTracker<B: AnalysisBackend + 'static> {
    backend: Arc<B>,
    shared: Arc<Shared>,
    poller: Mutex<Option<JoinHandle<()>>>,
    poll_interval: Duration,
}

impl<B: AnalysisBackend + 'static> AnalysisTracker<B> {
    pub fn new(backend: Arc<B>, poll_interval: Duration) -> Self {
        Self::build(backend, poll_interval, None)
    }

    /// Mark `flag` as used on the first completed analysis
    pub fn with_flag(backend: Arc<B>, poll_interval: Duration, flag: Arc<FreeAnalysisFlag>) -> Self {
        Self::build(backend, poll_interval, Some(flag))
    }

    fn build(backend: Arc<B>, poll_interval: Duration, flag: Option<Arc<FreeAnalysisFlag>>) -> Self {
        let (state, _) = watch::channel(AnalysisState::NotRequested);
        Self {
            backend,
            shared: Arc::new(Shared {
                state,
                live: Mutex::new(true),
                flag,
            }),
            poller: Mutex::new(None),
            poll_interval,
        }
    }

    pub fn state(&self) -> AnalysisState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.shared.state.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Load whatever analysis already exists and keep polling if it is pending.
    /// A missing analysis (404) leaves the state at `NotRequested`.
    pub async fn resume(&self, deal_id: &str) -> Result<AnalysisState> {
        self.ensure_live()?;
        match self.backend.get_analysis(deal_id).await {
            Ok(response) => Ok(self.accept(deal_id, response)),
            Err(ClientError::RequestFailed { status: 404, .. }) => {
                debug!(deal_id, "No analysis for deal yet");
                self.shared.publish(AnalysisState::NotRequested);
                Ok(self.state())
            }
            Err(e) => {
                warn!(deal_id, error = %e, "Failed to load analysis");
                Err(e.into())
            }
        }
    }

    /// Start an analysis. A pending or completed analysis is not requested again.
    pub async fn request(&self, deal_id: &str) -> Result<AnalysisState> {
        self.ensure_live()?;
        match self.state() {
            AnalysisState::Pending if self.is_polling() => return Ok(AnalysisState::Pending),
            state @ AnalysisState::Completed(_) => return Ok(state),
            _ => {}
        }

        info!(deal_id, "Requesting analysis");
        match self.backend.request_analysis(deal_id).await {
            Ok(response) => Ok(self.accept(deal_id, response)),
            Err(e) => {
                error!(deal_id, error = %e, "Analysis request failed");
                self.shared
                    .publish(AnalysisState::Error(REQUEST_FAILED_MESSAGE.to_string()));
                Ok(self.state())
            }
        }
    }

    /// Stop polling and ignore every later response
    pub fn stop(&self) {
        *self.shared.live.lock() = false;
        if let Some(handle) = self.poller.lock().take() {
            handle.abort();
            debug!("Analysis polling stopped");
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.shared.is_live() {
            Ok(())
        } else {
            Err(DiscoveryError::Unmounted)
        }
    }

    fn accept(&self, deal_id: &str, response: AnalysisResponse) -> AnalysisState {
        let state = AnalysisState::from_response(response);
        let pending = state == AnalysisState::Pending;
        self.shared.publish(state);
        if pending {
            self.start_polling(deal_id);
        }
        self.state()
    }

    fn start_polling(&self, deal_id: &str) {
        let mut poller = self.poller.lock();
        if let Some(previous) = poller.take() {
            previous.abort();
        }

        let backend = self.backend.clone();
        let shared = self.shared.clone();
        let period = self.poll_interval;
        let deal_id = deal_id.to_string();

        debug!(deal_id = %deal_id, interval_ms = period.as_millis() as u64, "Polling analysis");
        *poller = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !shared.is_live() {
                    break;
                }
                match backend.get_analysis(&deal_id).await {
                    Ok(response) => {
                        let state = AnalysisState::from_response(response);
                        let terminal = state.is_terminal();
                        if !shared.publish(state) || terminal {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(deal_id = %deal_id, error = %e, "Analysis poll failed, will retry");
                    }
                }
            }
            debug!(deal_id = %deal_id, "Analysis polling finished");
        }));
    }
}

impl<B: AnalysisBackend + 'static> Drop for AnalysisTracker<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
