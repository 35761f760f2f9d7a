//! Spinner for the plain (non-TUI) analysis output.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use pluto::services::LifecycleState;
use pluto::view::PIPELINE_STAGES;

/// Single-line spinner naming the active pipeline stage. Draws to stderr
/// and hides itself when stderr is not a terminal.
pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(stage_message(0));
        Self { bar }
    }

    pub fn update(&self, state: &LifecycleState) {
        if let LifecycleState::Loading { stage } = state {
            self.bar.set_message(stage_message(*stage));
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Spinner text for a stage index, e.g. `[2/6] Lemmatization`.
pub fn stage_message(stage: usize) -> String {
    match PIPELINE_STAGES.get(stage) {
        Some(label) => format!("[{}/{}] {}", stage + 1, PIPELINE_STAGES.len(), label),
        None => "Finishing up…".to_string(),
    }
}
