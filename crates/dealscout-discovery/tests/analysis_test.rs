//! Analysis polling on a paused clock

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dealscout_client::{Analysis, AnalysisResponse, AnalysisStatus, ClientError};
use dealscout_discovery::{
    AnalysisBackend, AnalysisState, AnalysisTracker, DiscoveryError, FreeAnalysisFlag,
};
use parking_lot::Mutex;
use tokio::time::sleep;

const INTERVAL: Duration = Duration::from_secs(5);

type Reply = Result<AnalysisResponse, ClientError>;

#[derive(Default)]
struct ScriptedBackend {
    request_reply: Mutex<Option<Reply>>,
    poll_replies: Mutex<VecDeque<Reply>>,
    requests: AtomicUsize,
    polls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(request_reply: Reply, poll_replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            request_reply: Mutex::new(Some(request_reply)),
            poll_replies: Mutex::new(poll_replies.into()),
            ..Default::default()
        })
    }

    fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn request_analysis(&self, _deal_id: &str) -> Reply {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.request_reply
            .lock()
            .take()
            .unwrap_or_else(|| Ok(pending()))
    }

    async fn get_analysis(&self, _deal_id: &str) -> Reply {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.poll_replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(pending()))
    }
}

fn pending() -> AnalysisResponse {
    AnalysisResponse {
        status: AnalysisStatus::Pending,
        analysis: None,
        error: None,
    }
}

fn completed(summary: &str) -> AnalysisResponse {
    AnalysisResponse {
        status: AnalysisStatus::Completed,
        analysis: Some(Analysis {
            summary: Some(summary.to_string()),
            ..Default::default()
        }),
        error: None,
    }
}

fn not_found() -> ClientError {
    ClientError::RequestFailed {
        status: 404,
        body: String::new(),
    }
}

fn timeout() -> ClientError {
    ClientError::Other(anyhow::anyhow!("connection timed out"))
}

#[tokio::test(start_paused = true)]
async fn test_polls_until_completed() {
    let backend = ScriptedBackend::new(
        Ok(pending()),
        vec![Ok(pending()), Ok(pending()), Ok(completed("Fair price"))],
    );
    let flag = Arc::new(FreeAnalysisFlag::in_memory());
    let tracker = AnalysisTracker::with_flag(backend.clone(), INTERVAL, flag.clone());

    assert_eq!(tracker.request("d1").await.unwrap(), AnalysisState::Pending);
    assert!(tracker.is_polling());

    sleep(Duration::from_secs(4)).await;
    assert_eq!(backend.polls(), 0);

    sleep(Duration::from_secs(12)).await;
    assert_eq!(backend.polls(), 3);
    match tracker.state() {
        AnalysisState::Completed(analysis) => {
            assert_eq!(analysis.summary.as_deref(), Some("Fair price"))
        }
        other => panic!("unexpected state: {other:?}"),
    }
    assert!(flag.is_used());

    sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.polls(), 3);
    assert!(!tracker.is_polling());
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_keeps_polling() {
    let backend = ScriptedBackend::new(
        Ok(pending()),
        vec![Err(timeout()), Ok(completed("ok"))],
    );
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);
    tracker.request("d1").await.unwrap();

    sleep(Duration::from_secs(6)).await;
    assert_eq!(tracker.state(), AnalysisState::Pending);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.polls(), 2);
    assert!(tracker.state().is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_error_status_is_terminal() {
    let backend = ScriptedBackend::new(
        Ok(pending()),
        vec![Ok(AnalysisResponse {
            status: AnalysisStatus::Error,
            analysis: None,
            error: Some("Model unavailable".to_string()),
        })],
    );
    let flag = Arc::new(FreeAnalysisFlag::in_memory());
    let tracker = AnalysisTracker::with_flag(backend.clone(), INTERVAL, flag.clone());
    tracker.request("d1").await.unwrap();

    sleep(Duration::from_secs(20)).await;
    assert_eq!(
        tracker.state(),
        AnalysisState::Error("Model unavailable".to_string())
    );
    assert_eq!(backend.polls(), 1);
    assert!(!flag.is_used());
}

#[tokio::test(start_paused = true)]
async fn test_stop_tears_down_polling() {
    let backend = ScriptedBackend::new(Ok(pending()), Vec::new());
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);
    tracker.request("d1").await.unwrap();

    sleep(Duration::from_secs(6)).await;
    assert_eq!(backend.polls(), 1);

    tracker.stop();
    sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.polls(), 1);
    assert!(!tracker.is_polling());
    assert!(matches!(
        tracker.request("d1").await,
        Err(DiscoveryError::Unmounted)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_drop_tears_down_polling() {
    let backend = ScriptedBackend::new(Ok(pending()), Vec::new());
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);
    tracker.request("d1").await.unwrap();

    drop(tracker);
    sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_request_while_pending_is_not_repeated() {
    let backend = ScriptedBackend::new(Ok(pending()), Vec::new());
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);

    tracker.request("d1").await.unwrap();
    tracker.request("d1").await.unwrap();
    assert_eq!(backend.requests(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_request_surfaces_error_state() {
    let backend = ScriptedBackend::new(Err(timeout()), Vec::new());
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);

    let state = tracker.request("d1").await.unwrap();
    assert!(matches!(state, AnalysisState::Error(_)));
    assert!(!tracker.is_polling());
}

#[tokio::test(start_paused = true)]
async fn test_resume_without_analysis() {
    let backend = ScriptedBackend::new(Ok(pending()), vec![Err(not_found())]);
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);

    assert_eq!(
        tracker.resume("d1").await.unwrap(),
        AnalysisState::NotRequested
    );
    assert!(!tracker.is_polling());
}

#[tokio::test(start_paused = true)]
async fn test_resume_pending_analysis_keeps_polling() {
    let backend = ScriptedBackend::new(
        Ok(pending()),
        vec![Ok(pending()), Ok(completed("done"))],
    );
    let tracker = AnalysisTracker::new(backend.clone(), INTERVAL);

    assert_eq!(tracker.resume("d1").await.unwrap(), AnalysisState::Pending);
    sleep(Duration::from_secs(6)).await;

    assert_eq!(backend.polls(), 2);
    assert!(matches!(tracker.state(), AnalysisState::Completed(_)));
    assert_eq!(backend.requests(), 0);
}
