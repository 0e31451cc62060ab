pub mod input;
pub mod item;
pub mod request;
pub mod response;

pub use input::{InputField, InputState};
pub use item::{ClusterItemView, ItemView, Price};
pub use request::{RecommendationRequest, TOP_K};
pub use response::{BackendBody, ClusterItemsResponse, RecommendResponse};
