use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::Instrument;

use crate::{
    error::{ClientResult, ErrorKind},
    models::{InputState, RecommendationRequest},
    services::providers::RecommenderApi,
    state::{DisplayState, Operation, Store},
};

/// How a request ended, as seen by whoever awaits its [`PendingRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Response applied to the display state
    Applied,
    /// Failure recorded as an error notice
    Failed(ErrorKind),
    /// A newer request of the same operation was issued first; nothing applied
    Superseded,
    /// Task aborted before it completed
    Cancelled,
}

/// Bookkeeping for one operation: newest sequence number and its task
#[derive(Default)]
struct RequestTracker {
    latest: u64,
    in_flight: Option<AbortHandle>,
}

impl RequestTracker {
    /// Issues the next sequence number, aborting whatever is still running
    fn issue(&mut self) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.latest += 1;
        self.latest
    }
}

/// Handle to an issued request
pub struct PendingRequest {
    seq: u64,
    operation: Operation,
    handle: JoinHandle<Outcome>,
}

impl PendingRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Waits for the request to settle
    pub async fn wait(self) -> Outcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Outcome::Cancelled,
            Err(e) => {
                tracing::error!(error = %e, operation = %self.operation, "Request task failed");
                Outcome::Cancelled
            }
        }
    }
}

/// Turns form snapshots into backend calls and reconciles the answers
/// into the shared [`Store`].
///
/// The two operations are independent. Within one operation only the most
/// recently issued request may touch the display state: issuing a new one
/// aborts its predecessor, and a predecessor that completes anyway is
/// discarded by sequence number.
#[derive(Clone)]
pub struct Orchestrator {
    api: Arc<dyn RecommenderApi>,
    store: Store,
    recommend: Arc<Mutex<RequestTracker>>,
    cluster: Arc<Mutex<RequestTracker>>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn RecommenderApi>, store: Store) -> Self {
        Self {
            api,
            store,
            recommend: Arc::default(),
            cluster: Arc::default(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Requests recommendations for the item in `input`.
    ///
    /// Sets the busy flag before returning. The flag is cleared when the
    /// latest request settles, whether it succeeded or failed.
    pub fn fetch_recommendations(&self, input: &InputState) -> PendingRequest {
        let request = RecommendationRequest::from_input(input);
        let mut tracker = lock(&self.recommend);
        let seq = tracker.issue();

        self.store.update(|state| state.begin(Operation::Recommend));

        let span = tracing::info_span!(
            "fetch_recommendations",
            seq,
            item_id = %request.user_item_id,
            provider = self.api.name()
        );
        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let trackers = Arc::clone(&self.recommend);

        let handle = tokio::spawn(
            async move {
                let result = api.recommend(&request).await;
                settle(&trackers, &store, seq, Operation::Recommend, result, |state, body| {
                    state.apply_recommendations(body)
                })
            }
            .instrument(span),
        );

        tracker.in_flight = Some(handle.abort_handle());
        PendingRequest {
            seq,
            operation: Operation::Recommend,
            handle,
        }
    }

    /// Requests the items sharing a cluster with the item in `input`.
    ///
    /// The item id goes out exactly as typed. Only the cluster fields of
    /// the display state are written.
    pub fn fetch_cluster_items(&self, input: &InputState) -> PendingRequest {
        let item_id = input.item_id().to_string();
        let mut tracker = lock(&self.cluster);
        let seq = tracker.issue();

        self.store.update(|state| state.begin(Operation::ClusterItems));

        let span = tracing::info_span!(
            "fetch_cluster_items",
            seq,
            item_id = %item_id,
            provider = self.api.name()
        );
        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let trackers = Arc::clone(&self.cluster);

        let handle = tokio::spawn(
            async move {
                let result = api.cluster_items(&item_id).await;
                settle(&trackers, &store, seq, Operation::ClusterItems, result, |state, body| {
                    state.apply_cluster_items(body)
                })
            }
            .instrument(span),
        );

        tracker.in_flight = Some(handle.abort_handle());
        PendingRequest {
            seq,
            operation: Operation::ClusterItems,
            handle,
        }
    }

    pub fn dismiss_error(&self, id: u64) -> bool {
        self.store.dismiss_error(id)
    }
}

/// Applies a finished request if it is still the latest of its operation
fn settle<T, F>(
    tracker: &Mutex<RequestTracker>,
    store: &Store,
    seq: u64,
    operation: Operation,
    result: ClientResult<T>,
    apply: F,
) -> Outcome
where
    F: FnOnce(&mut DisplayState, T),
{
    // Held across the store update so a newer request cannot start in between
    let mut tracker = lock(tracker);
    if tracker.latest != seq {
        tracing::debug!(latest = tracker.latest, "Discarding superseded response");
        return Outcome::Superseded;
    }
    tracker.in_flight = None;

    match result {
        Ok(body) => {
            store.update(|state| apply(state, body));
            Outcome::Applied
        }
        Err(e) => {
            let kind = e.kind();
            tracing::error!(error = %e, kind = %kind, "Request failed");
            let notice = store.notice(operation, &e);
            store.update(|state| state.fail(notice));
            Outcome::Failed(kind)
        }
    }
}

fn lock(tracker: &Mutex<RequestTracker>) -> MutexGuard<'_, RequestTracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}
