//! Offline client returning the built-in demo result.

use std::time::Duration;

use async_trait::async_trait;

use super::{AnalysisClient, AnalysisError};
use crate::models::{mock_result, AnalysisRequest, AnalysisResult};

/// Answers every request with the demo result after a fixed delay, so the
/// progress display has something to show.
#[derive(Debug, Clone)]
pub struct DemoClient {
    delay: Duration,
}

impl DemoClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnalysisClient for DemoClient {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        Ok(mock_result())
    }
}
