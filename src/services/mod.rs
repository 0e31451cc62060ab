pub mod orchestrator;
pub mod providers;

pub use orchestrator::{Orchestrator, Outcome, PendingRequest};
pub use providers::{HttpRecommender, RecommenderApi};
