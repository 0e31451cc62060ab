use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{ClientError, ErrorKind};
use crate::models::{ClusterItemsResponse, ClusterItemView, ItemView, RecommendResponse};

/// The two independent requests a user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Recommend,
    ClusterItems,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Recommend => f.write_str("recommendations"),
            Operation::ClusterItems => f.write_str("cluster items"),
        }
    }
}

/// A dismissible error message raised by a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub id: u64,
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl ErrorNotice {
    pub fn new(id: u64, operation: Operation, error: &ClientError) -> Self {
        Self {
            id,
            operation,
            kind: error.kind(),
            message: error.to_string(),
            raised_at: Utc::now(),
        }
    }
}

/// Everything a renderer needs to draw the page
///
/// Each response overwrites its fields wholesale; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub viewed_item: Option<ItemView>,
    pub recommendations: Vec<ItemView>,
    pub cluster_items: Vec<ClusterItemView>,
    pub cluster_id: Option<i64>,
    /// Busy flag of the recommend request
    pub loading: bool,
    pub cluster_loading: bool,
    pub error: Option<ErrorNotice>,
}

impl DisplayState {
    pub fn is_busy(&self, operation: Operation) -> bool {
        match operation {
            Operation::Recommend => self.loading,
            Operation::ClusterItems => self.cluster_loading,
        }
    }

    pub(crate) fn begin(&mut self, operation: Operation) {
        self.set_busy(operation, true);
    }

    pub(crate) fn apply_recommendations(&mut self, response: RecommendResponse) {
        self.viewed_item = response.viewed_item;
        self.recommendations = response.recommendations;
        self.settle(Operation::Recommend);
    }

    pub(crate) fn apply_cluster_items(&mut self, response: ClusterItemsResponse) {
        self.cluster_items = response.items;
        self.cluster_id = response.cluster_id;
        self.settle(Operation::ClusterItems);
    }

    /// Records a failure; data from earlier responses is kept as is
    pub(crate) fn fail(&mut self, notice: ErrorNotice) {
        self.set_busy(notice.operation, false);
        self.error = Some(notice);
    }

    /// Clears the error notice if it is still the one with `id`
    pub(crate) fn dismiss_error(&mut self, id: u64) -> bool {
        match &self.error {
            Some(notice) if notice.id == id => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    fn settle(&mut self, operation: Operation) {
        self.set_busy(operation, false);
        if self
            .error
            .as_ref()
            .is_some_and(|notice| notice.operation == operation)
        {
            self.error = None;
        }
    }

    fn set_busy(&mut self, operation: Operation, busy: bool) {
        match operation {
            Operation::Recommend => self.loading = busy,
            Operation::ClusterItems => self.cluster_loading = busy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> ItemView {
        ItemView {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn notice(id: u64, operation: Operation) -> ErrorNotice {
        ErrorNotice::new(id, operation, &ClientError::Backend("Item ID not found".into()))
    }

    #[test]
    fn test_initial_state() {
        let state = DisplayState::default();
        assert_eq!(state.viewed_item, None);
        assert!(state.recommendations.is_empty());
        assert!(state.cluster_items.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_recommendations_overwrite_not_merge() {
        let mut state = DisplayState::default();
        state.begin(Operation::Recommend);
        assert!(state.loading);

        state.apply_recommendations(RecommendResponse {
            viewed_item: Some(item("Viewed")),
            recommendations: vec![item("A"), item("B")],
            error: None,
        });
        assert!(!state.loading);
        assert_eq!(state.recommendations.len(), 2);

        state.apply_recommendations(RecommendResponse::default());
        assert_eq!(state.viewed_item, None);
        assert!(state.recommendations.is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = DisplayState::default();
        state.apply_recommendations(RecommendResponse {
            viewed_item: Some(item("Viewed")),
            recommendations: vec![item("A")],
            error: None,
        });

        state.begin(Operation::Recommend);
        state.fail(notice(1, Operation::Recommend));

        assert!(!state.loading);
        assert_eq!(state.recommendations.len(), 1);
        assert!(state.viewed_item.is_some());
        assert_eq!(state.error.as_ref().map(|n| n.kind), Some(ErrorKind::Backend));
    }

    #[test]
    fn test_cluster_items_do_not_touch_recommend_state() {
        let mut state = DisplayState::default();
        state.begin(Operation::Recommend);
        state.begin(Operation::ClusterItems);
        state.apply_cluster_items(ClusterItemsResponse {
            cluster_id: Some(4),
            items: vec![ClusterItemView::default()],
            error: None,
        });

        assert!(state.loading);
        assert!(!state.cluster_loading);
        assert_eq!(state.cluster_id, Some(4));
        assert_eq!(state.viewed_item, None);
    }

    #[test]
    fn test_success_clears_own_error_only() {
        let mut state = DisplayState::default();
        state.fail(notice(1, Operation::ClusterItems));
        state.apply_recommendations(RecommendResponse::default());
        assert!(state.error.is_some());

        state.apply_cluster_items(ClusterItemsResponse::default());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_dismiss_matches_id() {
        let mut state = DisplayState::default();
        state.fail(notice(7, Operation::Recommend));
        assert!(!state.dismiss_error(6));
        assert!(state.error.is_some());
        assert!(state.dismiss_error(7));
        assert_eq!(state.error, None);
    }
}
