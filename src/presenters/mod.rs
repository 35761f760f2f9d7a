//! Pure transformations from a raw result into render models.
//!
//! Each presenter is total: it accepts empty input and fills every missing
//! field, so renderers never deal with absent data.

mod clusters;
mod stats;
mod summary;
mod terms;

pub use clusters::{present_clusters, ClusterCard, PaletteColor, CLUSTER_PALETTE};
pub use stats::StatsStrip;
pub use summary::{aggregate_summary, Reported, SummarySentence, SummaryStats, SummaryView};
pub use terms::{
    font_scale_for, level_for, weigh_terms, WeightedTerm, MAX_FONT_SCALE, MIN_FONT_SCALE,
    TERM_LEVELS,
};

use crate::models::AnalysisResult;

/// Everything the success view needs, built once per result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultViewModel {
    pub stats: StatsStrip,
    pub terms: Vec<WeightedTerm>,
    pub clusters: Vec<ClusterCard>,
    pub summary: SummaryView,
}

impl ResultViewModel {
    pub fn build(result: &AnalysisResult) -> Self {
        Self {
            stats: StatsStrip::from_result(result),
            terms: weigh_terms(&result.terms),
            clusters: present_clusters(&result.clusters),
            summary: aggregate_summary(
                &result.summary,
                result.meta.word_count,
                result.meta.sent_count,
            ),
        }
    }
}
