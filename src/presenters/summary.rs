//! Extractive summary text and statistics.

use std::fmt;

/// One extracted sentence, trimmed, with its 1-based ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySentence {
    pub ordinal: usize,
    pub text: String,
}

impl SummarySentence {
    /// Tooltip label, e.g. `Sentence 2`.
    pub fn label(&self) -> String {
        format!("Sentence {}", self.ordinal)
    }
}

/// A count reported by the service, or an explicit unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reported {
    Known(u64),
    Unknown,
}

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Known(n) => write!(f, "{}", n),
            Reported::Unknown => write!(f, "—"),
        }
    }
}

/// Derived summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    /// Always `summary.len()`.
    pub extracted_sentences: usize,
    /// Reported word count, or the whitespace-run count of the joined text.
    pub approx_words: u64,
    /// Sentence count of the source documents.
    pub source_sentences: Reported,
}

/// Render model for the summary tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub sentences: Vec<SummarySentence>,
    /// Trimmed sentences joined with single spaces.
    pub text: String,
    pub stats: SummaryStats,
}

impl SummaryView {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Join the sentences and derive the statistics.
pub fn aggregate_summary(
    sentences: &[String],
    word_count: Option<u64>,
    sent_count: Option<u64>,
) -> SummaryView {
    let sentences: Vec<SummarySentence> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| SummarySentence {
            ordinal: i + 1,
            text: s.trim().to_string(),
        })
        .collect();

    let text = sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let stats = SummaryStats {
        extracted_sentences: sentences.len(),
        approx_words: word_count.unwrap_or_else(|| text.split_whitespace().count() as u64),
        source_sentences: sent_count.map_or(Reported::Unknown, Reported::Known),
    };

    SummaryView {
        sentences,
        text,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_without_reported_values() {
        let view = aggregate_summary(&owned(&["Hello world.", "It works."]), None, None);
        assert_eq!(view.stats.extracted_sentences, 2);
        assert_eq!(view.stats.approx_words, 4);
        assert_eq!(view.stats.source_sentences, Reported::Unknown);
        assert_eq!(view.text, "Hello world. It works.");
    }

    #[test]
    fn test_reported_values_win() {
        let view = aggregate_summary(&owned(&["One two three."]), Some(312), Some(18));
        assert_eq!(view.stats.approx_words, 312);
        assert_eq!(view.stats.source_sentences, Reported::Known(18));
        assert_eq!(view.stats.source_sentences.to_string(), "18");
    }

    #[test]
    fn test_sentences_trimmed_and_addressable() {
        let view = aggregate_summary(&owned(&["  First.\n", "\tSecond  "]), None, None);
        assert_eq!(view.text, "First. Second");
        assert_eq!(view.sentences[1].text, "Second");
        assert_eq!(view.sentences[1].label(), "Sentence 2");
    }

    #[test]
    fn test_whitespace_runs_count_once() {
        let view = aggregate_summary(&owned(&["a   b\t\tc", "d"]), None, None);
        assert_eq!(view.stats.approx_words, 4);
    }

    #[test]
    fn test_empty_summary() {
        let view = aggregate_summary(&[], None, None);
        assert!(view.is_empty());
        assert_eq!(view.text, "");
        assert_eq!(view.stats.extracted_sentences, 0);
        assert_eq!(view.stats.approx_words, 0);
        assert_eq!(Reported::Unknown.to_string(), "—");
    }
}
