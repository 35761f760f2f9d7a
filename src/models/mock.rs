//! Built-in demo result, shown when a development build cannot reach the
//! analysis service.

use super::analysis::{AnalysisResult, KeyTerm, ResultMeta, TopicCluster};

const MOCK_TERMS: &[(&str, f64)] = &[
    ("neural network", 0.872),
    ("deep learning", 0.841),
    ("natural language processing", 0.793),
    ("transformer", 0.761),
    ("attention mechanism", 0.734),
    ("text classification", 0.701),
    ("feature extraction", 0.682),
    ("TF-IDF", 0.655),
    ("topic modeling", 0.638),
    ("word embedding", 0.612),
    ("BERT", 0.589),
    ("corpus", 0.562),
    ("tokenization", 0.541),
    ("lemmatization", 0.519),
];

const MOCK_CLUSTERS: &[(&str, &[&str], u64)] = &[
    (
        "Neural Language Models",
        &["BERT", "transformer", "attention", "GPT", "pre-training"],
        12,
    ),
    (
        "Text Preprocessing",
        &["tokenization", "lemmatization", "stop-words", "stemming"],
        9,
    ),
    (
        "Feature Engineering",
        &["TF-IDF", "bag-of-words", "n-grams", "embeddings"],
        8,
    ),
    (
        "Topic Modeling",
        &["LDA", "clustering", "coherence", "topics", "k-means"],
        7,
    ),
    (
        "Summarization",
        &["extractive", "TextRank", "sentence scoring", "compression"],
        5,
    ),
];

const MOCK_SUMMARY: &[&str] = &[
    "Natural language processing (NLP) encompasses a broad set of techniques enabling computers to understand, interpret, and generate human language.",
    "TF-IDF remains a foundational method for identifying the relative importance of terms within a document corpus.",
    "Topic modeling approaches such as Latent Dirichlet Allocation (LDA) uncover hidden thematic structures across large collections of text.",
    "Extractive summarization selects the most informative sentences from source documents to produce concise, representative summaries.",
];

/// The demo result.
pub fn mock_result() -> AnalysisResult {
    AnalysisResult {
        terms: MOCK_TERMS
            .iter()
            .map(|(term, score)| KeyTerm::new(*term, *score))
            .collect(),
        clusters: MOCK_CLUSTERS
            .iter()
            .map(|(label, keywords, doc_count)| TopicCluster {
                label: Some(label.to_string()),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                doc_count: Some(*doc_count),
            })
            .collect(),
        summary: MOCK_SUMMARY.iter().map(|s| s.to_string()).collect(),
        meta: ResultMeta {
            doc_count: Some(1),
            elapsed_s: Some(1.23),
            word_count: Some(312),
            sent_count: Some(18),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_result_shape() {
        let result = mock_result();
        assert_eq!(result.terms.len(), 14);
        assert_eq!(result.clusters.len(), 5);
        assert_eq!(result.summary.len(), 4);
        assert_eq!(result.meta.word_count, Some(312));
        assert!(result.terms.iter().all(|t| t.score.is_some()));
    }
}
