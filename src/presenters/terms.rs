//! Key-term weighting: display order, discrete level and font scale.

use std::cmp::Ordering;

use crate::models::KeyTerm;

/// Number of discrete visual levels.
pub const TERM_LEVELS: usize = 5;
/// Font scale of the top-ranked term.
pub const MAX_FONT_SCALE: f64 = 0.95;
/// Font scale never drops below this.
pub const MIN_FONT_SCALE: f64 = 0.72;
const FONT_SCALE_STEP: f64 = 0.012;

/// A key term placed in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    pub term: String,
    pub score: Option<f64>,
    /// 0-based position in display order.
    pub rank: usize,
    /// Visual level, 0 (most relevant) to 4.
    pub level: usize,
    /// Relative font scale, `MIN_FONT_SCALE..=MAX_FONT_SCALE`.
    pub font_scale: f64,
}

impl WeightedTerm {
    /// Score badge text, three decimals. `None` for unscored terms.
    pub fn badge(&self) -> Option<String> {
        self.score.map(|s| format!("{:.3}", s))
    }

    /// Tooltip text, four decimals or `N/A`.
    pub fn tooltip(&self) -> String {
        match self.score {
            Some(s) => format!("Score: {:.4}", s),
            None => "Score: N/A".to_string(),
        }
    }
}

/// Visual level for a position in a list of `total` terms.
pub fn level_for(index: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    ((index * TERM_LEVELS) / total).min(TERM_LEVELS - 1)
}

/// Font scale for a position, floored at `MIN_FONT_SCALE`.
pub fn font_scale_for(index: usize) -> f64 {
    (MAX_FONT_SCALE - FONT_SCALE_STEP * index as f64).max(MIN_FONT_SCALE)
}

/// Descending by score; unscored terms go last. `sort_by` is stable, so
/// equal keys keep their input order.
fn by_score_desc(a: &KeyTerm, b: &KeyTerm) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order terms for display and attach their visual weight.
pub fn weigh_terms(terms: &[KeyTerm]) -> Vec<WeightedTerm> {
    let mut sorted: Vec<&KeyTerm> = terms.iter().collect();
    sorted.sort_by(|a, b| by_score_desc(a, b));

    let total = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(rank, t)| WeightedTerm {
            term: t.term.clone(),
            score: t.score,
            rank,
            level: level_for(rank, total),
            font_scale: font_scale_for(rank),
        })
        .collect()
}
