//! Command-line interface for pluto.

mod commands;
pub mod helpers;
pub mod progress;
pub mod render;
pub mod tui;

pub use commands::{is_verbose, run};
