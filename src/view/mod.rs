//! Presentation-state dispatch.
//!
//! `select` maps a lifecycle state and the active tab to exactly one of four
//! branches. It holds no state of its own; the active tab lives in a
//! `ViewSession` owned by whatever front end draws the result.

use crate::presenters::{ClusterCard, SummaryView, WeightedTerm};
use crate::services::{CompletedAnalysis, LifecycleState};

/// Pipeline stages shown while an analysis is outstanding.
pub const PIPELINE_STAGES: [&str; 6] = [
    "Tokenization & stop-word removal",
    "Lemmatization",
    "TF-IDF / BoW feature extraction",
    "Topic modeling (LDA / K-Means)",
    "Extractive summarization",
    "Scoring & ranking",
];

/// Widths, in percent, of the loading placeholder bars.
pub const PLACEHOLDER_WIDTHS: [u16; 4] = [100, 80, 60, 85];

pub const ONBOARDING_STEPS: [&str; 3] = [
    "Add research topic keywords",
    "Upload documents (optional)",
    "Run the analysis",
];

pub const NO_TERMS: &str = "No terms found.";
pub const NO_CLUSTERS: &str = "No clusters found.";
pub const NO_SUMMARY: &str = "No summary generated.";

/// Result tabs, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    Terms,
    Clusters,
    Summary,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [ResultTab::Terms, ResultTab::Clusters, ResultTab::Summary];

    pub fn label(&self) -> &'static str {
        match self {
            ResultTab::Terms => "Key Terms",
            ResultTab::Clusters => "Topic Clusters",
            ResultTab::Summary => "Summary",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ResultTab::Terms => 0,
            ResultTab::Clusters => 1,
            ResultTab::Summary => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRow {
    pub label: &'static str,
    pub status: StageStatus,
}

/// Stage table for a stage index. Past the last stage every row is done.
pub fn stage_rows(stage: usize) -> Vec<StageRow> {
    PIPELINE_STAGES
        .into_iter()
        .enumerate()
        .map(|(i, label)| StageRow {
            label,
            status: match i.cmp(&stage) {
                std::cmp::Ordering::Less => StageStatus::Done,
                std::cmp::Ordering::Equal => StageStatus::Active,
                std::cmp::Ordering::Greater => StageStatus::Pending,
            },
        })
        .collect()
}

/// Remediation hint shown under an error.
pub fn error_guidance(service_url: &str) -> String {
    format!(
        "Make sure the analysis service is running on {} and try again.",
        service_url
    )
}

/// Content of the active tab. Only this one is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabContent<'a> {
    Terms(&'a [WeightedTerm]),
    Clusters(&'a [ClusterCard]),
    Summary(&'a SummaryView),
    NoData(&'static str),
}

impl<'a> TabContent<'a> {
    fn build(analysis: &'a CompletedAnalysis, tab: ResultTab) -> Self {
        let view = &analysis.view;
        match tab {
            ResultTab::Terms if view.terms.is_empty() => TabContent::NoData(NO_TERMS),
            ResultTab::Terms => TabContent::Terms(&view.terms),
            ResultTab::Clusters if view.clusters.is_empty() => TabContent::NoData(NO_CLUSTERS),
            ResultTab::Clusters => TabContent::Clusters(&view.clusters),
            ResultTab::Summary if view.summary.is_empty() => TabContent::NoData(NO_SUMMARY),
            ResultTab::Summary => TabContent::Summary(&view.summary),
        }
    }
}

/// What to draw for a lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    Loading {
        stages: Vec<StageRow>,
        placeholders: &'static [u16],
    },
    Error {
        message: &'a str,
        guidance: String,
    },
    Empty {
        steps: &'static [&'static str],
    },
    Success {
        analysis: &'a CompletedAnalysis,
        tab: ResultTab,
        content: TabContent<'a>,
    },
}

/// Pick the branch for `state`.
pub fn select<'a>(
    state: &'a LifecycleState,
    tab: ResultTab,
    service_url: &str,
) -> ResultView<'a> {
    match state {
        LifecycleState::Loading { stage } => ResultView::Loading {
            stages: stage_rows(*stage),
            placeholders: &PLACEHOLDER_WIDTHS,
        },
        LifecycleState::Error(message) => ResultView::Error {
            message,
            guidance: error_guidance(service_url),
        },
        LifecycleState::Idle => ResultView::Empty {
            steps: &ONBOARDING_STEPS,
        },
        LifecycleState::Success(analysis) => ResultView::Success {
            analysis,
            tab,
            content: TabContent::build(analysis, tab),
        },
    }
}

/// Per-front-end view state: the active tab.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    tab: ResultTab,
    /// Run of the last result observed, cleared while loading.
    shown_run: Option<u64>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ResultTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ResultTab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    /// Feed every observed state through here. A new run starts on the
    /// terms tab, even when its `Loading` state was never observed.
    pub fn observe(&mut self, state: &LifecycleState) {
        match state {
            LifecycleState::Loading { .. } => {
                self.tab = ResultTab::Terms;
                self.shown_run = None;
            }
            LifecycleState::Success(done) => {
                if self.shown_run.is_some_and(|run| run != done.run) {
                    self.tab = ResultTab::Terms;
                }
                self.shown_run = Some(done.run);
            }
            LifecycleState::Idle | LifecycleState::Error(_) => {}
        }
    }

    pub fn view<'a>(&self, state: &'a LifecycleState, service_url: &str) -> ResultView<'a> {
        select(state, self.tab, service_url)
    }
}
