//! Data models for Pluto.

mod analysis;
mod mock;
mod request;

pub use analysis::{AnalysisResult, KeyTerm, ResultMeta, TopicCluster};
pub use mock::mock_result;
pub use request::{
    AnalysisRequest, DocumentBlob, DEFAULT_NUM_TOPICS, DEFAULT_SUMMARY_SENTENCES,
};
