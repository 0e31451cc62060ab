use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use super::display::{DisplayState, ErrorNotice, Operation};
use crate::error::ClientError;

/// Shared display state with change notification
///
/// Every update goes through a single `send_modify`, so subscribers observe
/// whole transitions and never a half-applied response.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: watch::Sender<DisplayState>,
    next_notice_id: AtomicU64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a store holding the initial, empty display state
    pub fn new() -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        Self {
            inner: Arc::new(StoreInner {
                state,
                next_notice_id: AtomicU64::new(1),
            }),
        }
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> DisplayState {
        self.inner.state.borrow().clone()
    }

    /// Registers a new observer; it is woken after every change
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.state.subscribe()
    }

    pub fn dismiss_error(&self, id: u64) -> bool {
        self.inner
            .state
            .send_if_modified(|state| state.dismiss_error(id))
    }

    pub(crate) fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut DisplayState),
    {
        self.inner.state.send_modify(apply);
    }

    pub(crate) fn notice(&self, operation: Operation, error: &ClientError) -> ErrorNotice {
        let id = self.inner.next_notice_id.fetch_add(1, Ordering::Relaxed);
        ErrorNotice::new(id, operation, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.update(|state| state.begin(Operation::Recommend));

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading);
        assert!(store.snapshot().loading);
    }

    #[tokio::test]
    async fn test_dismiss_notifies_only_on_change() {
        let store = Store::new();
        let notice = store.notice(Operation::Recommend, &ClientError::Backend("gone".into()));
        let id = notice.id;
        store.update(|state| state.fail(notice));

        let mut rx = store.subscribe();
        assert!(!store.dismiss_error(id + 1));
        assert!(!rx.has_changed().unwrap());

        assert!(store.dismiss_error(id));
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.snapshot().error, None);
    }

    #[test]
    fn test_notice_ids_increase() {
        let store = Store::new();
        let err = ClientError::Backend("x".into());
        let first = store.notice(Operation::Recommend, &err);
        let second = store.notice(Operation::ClusterItems, &err);
        assert!(second.id > first.id);
    }
}
