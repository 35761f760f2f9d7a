//! Analysis result payload returned by the remote service.
//!
//! The service is loosely typed: lists may be missing or `null`, scores may be
//! absent or non-numeric, and key terms are occasionally sent as bare strings.
//! Deserialization fills every gap with a defined default so the presenters
//! never have to guess.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Scored key terms, in the order the service produced them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: Vec<KeyTerm>,
    /// Topic clusters, in service order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<TopicCluster>,
    /// Extracted summary sentences, in extraction order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    /// Run metadata. Every field is optional.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ResultMeta,
}

impl AnalysisResult {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// A key term with an optional relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawKeyTerm")]
pub struct KeyTerm {
    pub term: String,
    /// Relevance in `[0, 1]`. `None` when the service sent no usable number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl KeyTerm {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score: Some(score),
        }
    }

    /// A term that carries no score.
    pub fn unscored(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            score: None,
        }
    }
}

/// Wire shapes accepted for a key term.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeyTerm {
    Bare(String),
    Scored {
        #[serde(default)]
        term: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        score: Option<f64>,
    },
}

impl From<RawKeyTerm> for KeyTerm {
    fn from(raw: RawKeyTerm) -> Self {
        match raw {
            RawKeyTerm::Bare(term) => KeyTerm::unscored(term),
            RawKeyTerm::Scored { term, score } => KeyTerm { term, score },
        }
    }
}

/// A named group of related keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_count: Option<u64>,
}

/// Metadata about the run. Numeric fields that are missing, `null`, or not
/// numbers deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMeta {
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub elapsed_s: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub word_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub sent_count: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u64)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = br#"{
            "terms": [{"term": "neural network", "score": 0.87}],
            "clusters": [{"label": "Models", "keywords": ["BERT"], "doc_count": 3}],
            "summary": ["First sentence."],
            "meta": {"doc_count": 2, "elapsed_s": 1.5, "word_count": 40, "sent_count": 9}
        }"#;

        let result = AnalysisResult::from_slice(body).unwrap();
        assert_eq!(result.terms, vec![KeyTerm::new("neural network", 0.87)]);
        assert_eq!(result.clusters[0].label.as_deref(), Some("Models"));
        assert_eq!(result.clusters[0].doc_count, Some(3));
        assert_eq!(result.summary, vec!["First sentence."]);
        assert_eq!(result.meta.doc_count, Some(2));
        assert_eq!(result.meta.elapsed_s, Some(1.5));
        assert_eq!(result.meta.sent_count, Some(9));
    }

    #[test]
    fn test_missing_and_null_sections_default() {
        let result = AnalysisResult::from_slice(br#"{"terms": null, "meta": null}"#).unwrap();
        assert!(result.terms.is_empty());
        assert!(result.clusters.is_empty());
        assert!(result.summary.is_empty());
        assert_eq!(result.meta, ResultMeta::default());
    }

    #[test]
    fn test_terms_accept_bare_strings_and_bad_scores() {
        let body = br#"{"terms": ["corpus", {"term": "BERT", "score": "high"}, {"term": "LDA"}]}"#;
        let result = AnalysisResult::from_slice(body).unwrap();
        assert_eq!(
            result.terms,
            vec![
                KeyTerm::unscored("corpus"),
                KeyTerm::unscored("BERT"),
                KeyTerm::unscored("LDA"),
            ]
        );
    }

    #[test]
    fn test_cluster_fields_optional() {
        let body = br#"{"clusters": [{}, {"keywords": null, "doc_count": 4.0}]}"#;
        let result = AnalysisResult::from_slice(body).unwrap();
        assert_eq!(result.clusters[0], TopicCluster::default());
        assert!(result.clusters[1].keywords.is_empty());
        assert_eq!(result.clusters[1].doc_count, Some(4));
    }

    #[test]
    fn test_meta_ignores_non_numeric_values() {
        let body = br#"{"meta": {"doc_count": "two", "elapsed_s": null, "word_count": -3}}"#;
        let result = AnalysisResult::from_slice(body).unwrap();
        assert_eq!(result.meta, ResultMeta::default());
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(AnalysisResult::from_slice(b"[1, 2, 3]").is_err());
        assert!(AnalysisResult::from_slice(b"<html>oops</html>").is_err());
    }
}
