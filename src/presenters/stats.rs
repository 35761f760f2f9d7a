//! Statistics strip shown above the result tabs.

use crate::models::AnalysisResult;

/// Headline numbers for a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsStrip {
    pub key_terms: usize,
    pub clusters: usize,
    pub sentences: usize,
    /// Documents processed; 1 when the service did not say.
    pub documents: u64,
    pub elapsed_s: Option<f64>,
}

impl StatsStrip {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            key_terms: result.terms.len(),
            clusters: result.clusters.len(),
            sentences: result.summary.len(),
            documents: result.meta.doc_count.unwrap_or(1),
            elapsed_s: result.meta.elapsed_s,
        }
    }

    /// Elapsed time as `1.23s`, or a dash when unknown.
    pub fn elapsed_label(&self) -> String {
        match self.elapsed_s {
            Some(secs) => format!("{:.2}s", secs),
            None => "—".to_string(),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn items(&self) -> [(&'static str, String); 5] {
        [
            ("Key Terms", self.key_terms.to_string()),
            ("Topic Clusters", self.clusters.to_string()),
            ("Sentences", self.sentences.to_string()),
            ("Docs Processed", self.documents.to_string()),
            ("Time (s)", self.elapsed_label()),
        ]
    }
}
