//! Analyze and demo commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use console::style;

use pluto::client::DemoClient;
use pluto::config::Settings;
use pluto::models::{AnalysisRequest, DocumentBlob};
use pluto::services::{LifecycleState, ResultLifecycleController};

use super::AnalyzeArgs;
use crate::cli::helpers::is_interactive;
use crate::cli::progress::StageSpinner;
use crate::cli::{render, tui};

/// How long the demo pretends the pipeline runs.
const DEMO_DELAY: Duration = Duration::from_millis(2500);

/// Run an analysis against the configured service.
pub async fn cmd_analyze(settings: &Settings, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = build_request(settings, &args)?;
    if request.keywords.is_empty() && request.documents.is_empty() {
        eprintln!(
            "{} No keywords or files given; the service decides what to analyze",
            style("!").yellow()
        );
    }

    let controller = ResultLifecycleController::from_config(settings.client_config())?
        .with_progress_interval(settings.progress_interval);

    if args.json {
        return print_json(&controller, request).await;
    }
    present(&controller, request, args.plain).await
}

/// Show the built-in demo result.
pub async fn cmd_demo(settings: &Settings, plain: bool) -> anyhow::Result<()> {
    let controller = ResultLifecycleController::new(
        Arc::new(DemoClient::new(DEMO_DELAY)),
        settings.client_config(),
    )
    .with_progress_interval(settings.progress_interval);

    let request = AnalysisRequest {
        num_topics: settings.num_topics,
        summary_sentences: settings.summary_sentences,
        use_bow: settings.use_bow,
        ..AnalysisRequest::default()
    };
    present(&controller, request, plain).await
}

/// Build the request from flags, falling back to configured defaults.
fn build_request(settings: &Settings, args: &AnalyzeArgs) -> anyhow::Result<AnalysisRequest> {
    let mut request = AnalysisRequest {
        num_topics: args.topics.unwrap_or(settings.num_topics),
        summary_sentences: args.sentences.unwrap_or(settings.summary_sentences),
        use_bow: args.bow || settings.use_bow,
        ..AnalysisRequest::default()
    }
    .with_keywords(args.keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty()));

    for path in &args.files {
        let document = DocumentBlob::from_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(
            "Attaching {} ({}, {} bytes)",
            document.file_name,
            document.mime_type,
            document.content.len()
        );
        request = request.with_document(document);
    }

    Ok(request)
}

/// Full-screen view when possible, otherwise spinner plus plain output.
async fn present(
    controller: &ResultLifecycleController,
    request: AnalysisRequest,
    plain: bool,
) -> anyhow::Result<()> {
    if !plain && is_interactive() {
        return tui::run_analysis_tui(controller, request).await;
    }

    let state = run_with_spinner(controller, request).await;
    render::print_state(&state, controller.config().service_url());

    if let LifecycleState::Error(_) = state {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one analysis while a spinner follows the simulated stages.
async fn run_with_spinner(
    controller: &ResultLifecycleController,
    request: AnalysisRequest,
) -> LifecycleState {
    let spinner = StageSpinner::new();
    let mut updates = controller.subscribe();

    let analysis = controller.analyze(request);
    tokio::pin!(analysis);

    loop {
        tokio::select! {
            _ = &mut analysis => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                spinner.update(&updates.borrow_and_update());
            }
        }
    }

    spinner.finish();
    controller.state()
}

async fn print_json(
    controller: &ResultLifecycleController,
    request: AnalysisRequest,
) -> anyhow::Result<()> {
    match run_with_spinner(controller, request).await {
        LifecycleState::Success(done) => {
            if done.fallback {
                eprintln!(
                    "{} Analysis service unreachable, printing demo data",
                    style("!").yellow()
                );
            }
            println!("{}", serde_json::to_string_pretty(done.result.as_ref())?);
            Ok(())
        }
        LifecycleState::Error(message) => anyhow::bail!(message),
        other => anyhow::bail!("Analysis did not complete (state: {:?})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            keywords: vec![],
            files: vec![],
            topics: None,
            sentences: None,
            bow: false,
            plain: true,
            json: false,
        }
    }

    #[test]
    fn test_request_uses_configured_defaults() {
        let settings = Settings {
            num_topics: 7,
            use_bow: true,
            ..Settings::default()
        };
        let request = build_request(&settings, &args()).unwrap();
        assert_eq!(request.num_topics, 7);
        assert_eq!(request.summary_sentences, 5);
        assert!(request.use_bow);
    }

    #[test]
    fn test_flags_override_defaults_and_blank_keywords_dropped() {
        let args = AnalyzeArgs {
            keywords: vec!["  nlp ".into(), " ".into(), "lda".into()],
            topics: Some(3),
            sentences: Some(2),
            ..args()
        };
        let request = build_request(&Settings::default(), &args).unwrap();
        assert_eq!(request.keywords, vec!["nlp", "lda"]);
        assert_eq!(request.num_topics, 3);
        assert_eq!(request.summary_sentences, 2);
    }

    #[test]
    fn test_files_are_attached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "topic modeling notes").unwrap();

        let args = AnalyzeArgs {
            files: vec![path],
            ..args()
        };
        let request = build_request(&Settings::default(), &args).unwrap();
        assert_eq!(request.documents.len(), 1);
        assert_eq!(request.documents[0].file_name, "notes.txt");
        assert_eq!(request.documents[0].mime_type, "text/plain");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let args = AnalyzeArgs {
            files: vec![PathBuf::from("/nonexistent/paper.pdf")],
            ..args()
        };
        let err = build_request(&Settings::default(), &args).unwrap_err();
        assert!(err.to_string().contains("paper.pdf"));
    }
}
