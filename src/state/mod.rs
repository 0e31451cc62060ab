pub mod display;
pub mod store;

pub use display::{DisplayState, ErrorNotice, Operation};
pub use store::Store;
