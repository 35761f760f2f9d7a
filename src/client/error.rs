//! Analysis client error types.

use thiserror::Error;

/// Why an analysis request produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The request never reached the service (connection refused, DNS
    /// failure, reset before a response).
    #[error("Could not reach the analysis service: {0}")]
    Transport(String),
    /// The service answered with a non-success status. The message is the
    /// response body, or `HTTP <status>` when the body was empty or unreadable.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// The service answered with success but the body was not a valid result.
    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(String),
    /// The request could not be built (bad base URL, bad attachment type).
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(String),
}

impl AnalysisError {
    /// Whether the service was unreachable.
    pub fn is_transport(&self) -> bool {
        matches!(self, AnalysisError::Transport(_))
    }

    /// Build a service error from a status code and a best-effort body read.
    pub fn service(status: u16, body: Option<String>) -> Self {
        let message = body
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        AnalysisError::Service { status, message }
    }
}

/// Display of `err`, followed by its innermost cause when it has one.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut root = None;
    let mut next = err.source();
    while let Some(cause) = next {
        root = Some(cause);
        next = cause.source();
    }
    match root {
        Some(cause) => format!("{}: {}", err, cause),
        None => err.to_string(),
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            AnalysisError::InvalidRequest(describe(&e))
        } else {
            AnalysisError::Transport(describe(&e))
        }
    }
}
