//! Parameters for one analysis run.

use std::path::Path;

/// Default number of topic clusters requested.
pub const DEFAULT_NUM_TOPICS: u32 = 5;
/// Default number of summary sentences requested.
pub const DEFAULT_SUMMARY_SENTENCES: u32 = 5;

/// Validated analysis parameters handed over by the input collector.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Research topic keywords, in the order given.
    pub keywords: Vec<String>,
    /// Uploaded documents.
    pub documents: Vec<DocumentBlob>,
    /// Number of topic clusters to extract.
    pub num_topics: u32,
    /// Number of sentences in the extractive summary.
    pub summary_sentences: u32,
    /// Use bag-of-words features instead of TF-IDF.
    pub use_bow: bool,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            documents: Vec::new(),
            num_topics: DEFAULT_NUM_TOPICS,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            use_bow: false,
        }
    }
}

impl AnalysisRequest {
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_document(mut self, document: DocumentBlob) -> Self {
        self.documents.push(document);
        self
    }

    /// Feature mode name as shown to users.
    pub fn feature_mode(&self) -> &'static str {
        if self.use_bow {
            "bag-of-words"
        } else {
            "TF-IDF"
        }
    }
}

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBlob {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl DocumentBlob {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Read a document from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(file_name, mime_type, content))
    }
}
