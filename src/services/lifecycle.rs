//! Result lifecycle controller.
//!
//! Owns the single in-flight analysis: submits the request, runs the
//! progress timer while it is outstanding, and publishes the resulting
//! presentation state over a watch channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use super::progress::{ProgressHandle, ProgressSimulator};
use crate::client::{AnalysisClient, AnalysisError, ClientConfig, HttpAnalysisClient};
use crate::models::{mock_result, AnalysisRequest, AnalysisResult};
use crate::presenters::ResultViewModel;

/// Default cadence of the simulated pipeline progress.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(700);

/// A finished analysis and its render model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAnalysis {
    pub result: Arc<AnalysisResult>,
    pub view: ResultViewModel,
    /// True when the service was unreachable and the demo result is shown.
    pub fallback: bool,
    /// Generation of the analysis that produced this result.
    pub run: u64,
}

impl CompletedAnalysis {
    pub fn new(result: AnalysisResult, fallback: bool) -> Self {
        let view = ResultViewModel::build(&result);
        Self {
            result: Arc::new(result),
            view,
            fallback,
            run: 0,
        }
    }

    pub fn with_run(mut self, run: u64) -> Self {
        self.run = run;
        self
    }
}

/// Presentation state. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Loading { stage: usize },
    Error(String),
    Success(Arc<CompletedAnalysis>),
}

impl LifecycleState {
    /// Current pipeline stage; 0 outside of `Loading`.
    pub fn stage_index(&self) -> usize {
        match self {
            LifecycleState::Loading { stage } => *stage,
            _ => 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading { .. })
    }

    /// True for `Error` and `Success`.
    pub fn is_settled(&self) -> bool {
        matches!(self, LifecycleState::Error(_) | LifecycleState::Success(_))
    }
}

/// Bookkeeping for the current analysis. Only the holder of the current
/// generation may publish state.
#[derive(Debug, Default)]
struct Flight {
    generation: u64,
    progress: ProgressHandle,
    request: Option<AbortHandle>,
}

impl Flight {
    fn halt(&mut self) {
        self.progress.stop();
        if let Some(request) = self.request.take() {
            request.abort();
        }
    }
}

fn lock(flight: &Mutex<Flight>) -> MutexGuard<'_, Flight> {
    flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives one analysis at a time and publishes its state.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct ResultLifecycleController {
    client: Arc<dyn AnalysisClient>,
    config: ClientConfig,
    progress_interval: Duration,
    flight: Arc<Mutex<Flight>>,
    state: Arc<watch::Sender<LifecycleState>>,
}

impl ResultLifecycleController {
    pub fn new(client: Arc<dyn AnalysisClient>, config: ClientConfig) -> Self {
        let (state, _) = watch::channel(LifecycleState::Idle);
        Self {
            client,
            config,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            flight: Arc::new(Mutex::new(Flight::default())),
            state: Arc::new(state),
        }
    }

    /// Controller talking to the HTTP service described by `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self, AnalysisError> {
        let client = HttpAnalysisClient::new(config.clone())?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn stage_index(&self) -> usize {
        self.state.borrow().stage_index()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Run one analysis to completion.
    ///
    /// Supersedes any analysis still in flight: its timer is stopped, its
    /// request aborted and its outcome discarded. Dropping the returned
    /// future before it finishes returns the controller to `Idle`.
    pub async fn analyze(&self, request: AnalysisRequest) {
        let generation = self.begin();
        let mut guard = FlightGuard {
            controller: self,
            generation,
            armed: true,
        };

        info!(
            keywords = request.keywords.len(),
            documents = request.documents.len(),
            num_topics = request.num_topics,
            mode = request.feature_mode(),
            "submitting analysis"
        );

        let client = self.client.clone();
        let task = tokio::spawn(async move { client.analyze(&request).await });
        {
            let mut flight = lock(&self.flight);
            if flight.generation == generation {
                flight.request = Some(task.abort_handle());
            } else {
                task.abort();
            }
        }

        let next = match task.await {
            Ok(outcome) => self.resolve(generation, outcome),
            Err(e) if e.is_cancelled() => {
                debug!(generation, "analysis request cancelled");
                return;
            }
            Err(e) => {
                error!("analysis task failed: {}", e);
                LifecycleState::Error(format!("Analysis failed unexpectedly: {}", e))
            }
        };

        self.commit(generation, next);
        guard.armed = false;
    }

    /// Abandon the analysis in flight, if any, and return to `Idle`.
    pub fn cancel(&self) {
        let mut flight = lock(&self.flight);
        flight.generation += 1;
        flight.halt();
        self.state.send_replace(LifecycleState::Idle);
    }

    /// Start a new generation: stop the previous timer and request, enter
    /// `Loading` and start ticking.
    fn begin(&self) -> u64 {
        let mut flight = lock(&self.flight);
        flight.halt();
        flight.generation += 1;
        let generation = flight.generation;

        self.state.send_replace(LifecycleState::Loading { stage: 0 });

        let weak_flight = Arc::downgrade(&self.flight);
        let weak_state = Arc::downgrade(&self.state);
        flight.progress = ProgressSimulator::start(self.progress_interval, move || {
            advance_stage(&weak_flight, &weak_state, generation)
        });

        generation
    }

    fn resolve(
        &self,
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> LifecycleState {
        match outcome {
            Ok(result) => {
                info!(
                    terms = result.terms.len(),
                    clusters = result.clusters.len(),
                    sentences = result.summary.len(),
                    "analysis complete"
                );
                let done = CompletedAnalysis::new(result, false).with_run(generation);
                LifecycleState::Success(Arc::new(done))
            }
            Err(e) if e.is_transport() && self.config.is_development => {
                warn!(error = %e, "analysis service unreachable, showing mock data");
                let done = CompletedAnalysis::new(mock_result(), true).with_run(generation);
                LifecycleState::Success(Arc::new(done))
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                LifecycleState::Error(e.to_string())
            }
        }
    }

    /// Publish a final state if `generation` is still current.
    fn commit(&self, generation: u64, next: LifecycleState) -> bool {
        let mut flight = lock(&self.flight);
        if flight.generation != generation {
            debug!(generation, "discarding superseded analysis outcome");
            return false;
        }
        flight.progress.stop();
        flight.request = None;
        self.state.send_replace(next);
        true
    }

    /// Called when an `analyze` future is dropped before it settled.
    fn abandon(&self, generation: u64) {
        let mut flight = lock(&self.flight);
        if flight.generation != generation {
            return;
        }
        debug!(generation, "analysis abandoned by caller");
        flight.halt();
        self.state.send_replace(LifecycleState::Idle);
    }
}

fn advance_stage(
    flight: &Weak<Mutex<Flight>>,
    state: &Weak<watch::Sender<LifecycleState>>,
    generation: u64,
) {
    let (Some(flight), Some(state)) = (flight.upgrade(), state.upgrade()) else {
        return;
    };
    let flight = lock(&flight);
    if flight.generation != generation {
        return;
    }
    state.send_if_modified(|current| match current {
        LifecycleState::Loading { stage } => {
            *stage += 1;
            true
        }
        _ => false,
    });
}

struct FlightGuard<'a> {
    controller: &'a ResultLifecycleController,
    generation: u64,
    armed: bool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon(self.generation);
        }
    }
}
