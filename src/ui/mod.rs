//! Terminal front end: actions, command parsing and rendering.

pub mod commands;
pub mod controller;
pub mod render;

pub use commands::{parse_command, Command, HELP};
pub use controller::{Controller, Dispatch, UiAction};
pub use render::{render_input, render_state};
