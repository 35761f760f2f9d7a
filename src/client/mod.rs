//! HTTP client for the remote analysis service.
//!
//! One call per analysis: the request is sent as a multipart form and the
//! service answers with the full result as JSON.

mod config;
mod demo;
mod error;

pub use config::{ClientConfig, ANALYZE_PATH, SAME_ORIGIN_URL};
pub use demo::DemoClient;
pub use error::AnalysisError;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::models::{AnalysisRequest, AnalysisResult, DocumentBlob};

/// Anything that can turn a request into a result.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// One field of the multipart body, in send order.
#[derive(Debug, PartialEq)]
pub enum FormField<'a> {
    Text { name: &'static str, value: String },
    File { name: &'static str, document: &'a DocumentBlob },
}

/// Lay out the multipart body: repeated keywords, the scalar options, then
/// one part per document.
pub fn form_fields(request: &AnalysisRequest) -> Vec<FormField<'_>> {
    let mut fields: Vec<FormField<'_>> = request
        .keywords
        .iter()
        .map(|k| FormField::Text {
            name: "keywords",
            value: k.clone(),
        })
        .collect();

    fields.push(FormField::Text {
        name: "num_topics",
        value: request.num_topics.to_string(),
    });
    fields.push(FormField::Text {
        name: "summary_sentences",
        value: request.summary_sentences.to_string(),
    });
    fields.push(FormField::Text {
        name: "use_bow",
        value: if request.use_bow { "true" } else { "false" }.to_string(),
    });

    fields.extend(request.documents.iter().map(|document| FormField::File {
        name: "files",
        document,
    }));

    fields
}

fn encode_form(request: &AnalysisRequest) -> Result<Form, AnalysisError> {
    let mut form = Form::new();
    for field in form_fields(request) {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, document } => {
                let part = Part::bytes(document.content.clone())
                    .file_name(document.file_name.clone())
                    .mime_str(&document.mime_type)
                    .map_err(|e| {
                        AnalysisError::InvalidRequest(format!(
                            "{}: {}",
                            document.file_name, e
                        ))
                    })?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

/// Analysis client backed by reqwest.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    config: ClientConfig,
    client: Client,
}

impl HttpAnalysisClient {
    /// Create a new client. No overall request timeout is set: a run takes
    /// as long as the service needs.
    pub fn new(config: ClientConfig) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalysisError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<Url, AnalysisError> {
        let endpoint = self.config.endpoint();
        Url::parse(&endpoint)
            .map_err(|e| AnalysisError::InvalidRequest(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoint()?;
        let form = encode_form(request)?;

        debug!(
            "POST {} ({} keywords, {} documents, {} topics, {} sentences, {})",
            url,
            request.keywords.len(),
            request.documents.len(),
            request.num_topics,
            request.summary_sentences,
            request.feature_mode()
        );

        let resp = self.client.post(url).multipart(form).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.ok();
            debug!("Analysis service returned {}", status);
            return Err(AnalysisError::service(status.as_u16(), body));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        AnalysisResult::from_slice(&body)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}
