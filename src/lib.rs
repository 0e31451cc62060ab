pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

pub use config::Config;
pub use error::{ClientError, ClientResult, ErrorKind};
