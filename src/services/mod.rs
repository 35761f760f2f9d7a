//! Service layer: the analysis lifecycle and its progress timer.
//!
//! Separated from UI concerns. The CLI and the terminal view only observe
//! the published `LifecycleState`.

pub mod lifecycle;
pub mod progress;

pub use lifecycle::{
    CompletedAnalysis, LifecycleState, ResultLifecycleController, DEFAULT_PROGRESS_INTERVAL,
};
pub use progress::{ProgressHandle, ProgressSimulator};
