//! UI actions and their dispatch into the input state and orchestrator.

use crate::{
    models::{InputField, InputState},
    services::{Orchestrator, PendingRequest},
};

/// Everything the user can do on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Edit { field: InputField, value: String },
    FetchRecommendations,
    FetchClusterItems,
    /// Dismisses whichever error notice is currently shown
    DismissError,
}

/// Result of dispatching one action
pub enum Dispatch {
    Edited,
    Started(PendingRequest),
    Dismissed(bool),
    /// The trigger is disabled in the current state; nothing was sent
    Disabled(&'static str),
}

/// Owns the form and routes actions, acting as the enable/disable logic of
/// the two trigger buttons.
pub struct Controller {
    input: InputState,
    orchestrator: Orchestrator,
}

impl Controller {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            input: InputState::new(),
            orchestrator,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn dispatch(&mut self, action: UiAction) -> Dispatch {
        match action {
            UiAction::Edit { field, value } => {
                self.input.set(field, value);
                Dispatch::Edited
            }
            UiAction::FetchRecommendations => {
                let loading = self.orchestrator.store().snapshot().loading;
                if !self.input.can_fetch_recommendations(loading) {
                    let reason = if loading {
                        "recommendations are already loading"
                    } else {
                        "enter an item id first"
                    };
                    tracing::debug!(reason, "Recommend trigger disabled");
                    return Dispatch::Disabled(reason);
                }
                Dispatch::Started(self.orchestrator.fetch_recommendations(&self.input))
            }
            UiAction::FetchClusterItems => {
                if !self.input.can_fetch_cluster_items() {
                    tracing::debug!("Cluster trigger disabled");
                    return Dispatch::Disabled("enter an item id first");
                }
                Dispatch::Started(self.orchestrator.fetch_cluster_items(&self.input))
            }
            UiAction::DismissError => {
                let shown = self.orchestrator.store().snapshot().error;
                let dismissed = shown
                    .map(|notice| self.orchestrator.dismiss_error(notice.id))
                    .unwrap_or(false);
                Dispatch::Dismissed(dismissed)
            }
        }
    }
}
