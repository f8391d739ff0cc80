// orchestrator.rs
use crate::domain::{ListingRecord, SourceRequest};
use crate::errors::PipelineError;
use crate::pipeline::{PipelineEvent, PipelineState};
use crate::scraper::{AdapterRegistry, ScraperError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// Runs the enabled sources one after another, isolating their failures,
/// and merges whatever they produce.
pub struct Orchestrator {
    registry: Arc<AdapterRegistry>,
    state: Arc<Mutex<PipelineState>>,
}

/// Handle to a run executing on the background thread.
pub struct PipelineRun {
    events: Receiver<PipelineEvent>,
    handle: JoinHandle<()>,
    state: Arc<Mutex<PipelineState>>,
}

impl PipelineRun {
    pub fn events(&self) -> &Receiver<PipelineEvent> {
        &self.events
    }

    /// Drains all events into `on_event`, then joins the worker.
    pub fn wait<F>(self, mut on_event: F) -> PipelineState
    where
        F: FnMut(PipelineEvent),
    {
        for event in self.events.iter() {
            on_event(event);
        }

        if self.handle.join().is_err() {
            error!("💥 Scraper thread panicked");
            set_state(&self.state, PipelineState::Failed);
        }
        get_state(&self.state)
    }
}

impl Orchestrator {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            state: Arc::new(Mutex::new(PipelineState::Idle)),
        }
    }

    pub fn state(&self) -> PipelineState {
        get_state(&self.state)
    }

    /// Starts a run on a dedicated background thread so the caller stays responsive.
    pub fn run(&self, request: SourceRequest) -> Result<PipelineRun, PipelineError> {
        self.begin()?;

        let (tx, rx) = mpsc::channel();
        let registry = Arc::clone(&self.registry);
        let state = Arc::clone(&self.state);

        let spawned = thread::Builder::new()
            .name("listing-scraper".to_string())
            .spawn(move || {
                info!("🧵 Scraper thread started");
                let rows = attempt_sources(&registry, &request, &mut |event: PipelineEvent| {
                    // A consumer that hung up just stops listening.
                    let _ = tx.send(event);
                });
                set_state(&state, PipelineState::Completed);
                let _ = tx.send(PipelineEvent::Finished { rows });
            });

        match spawned {
            Ok(handle) => Ok(PipelineRun {
                events: rx,
                handle,
                state: Arc::clone(&self.state),
            }),
            Err(e) => {
                set_state(&self.state, PipelineState::Failed);
                Err(PipelineError::Spawn(e.to_string()))
            }
        }
    }

    /// Same as `run`, on the calling thread.
    pub fn run_blocking<F>(
        &self,
        request: &SourceRequest,
        mut on_event: F,
    ) -> Result<(), PipelineError>
    where
        F: FnMut(PipelineEvent),
    {
        self.begin()?;
        let rows = attempt_sources(&self.registry, request, &mut on_event);
        set_state(&self.state, PipelineState::Completed);
        on_event(PipelineEvent::Finished { rows });
        Ok(())
    }

    fn begin(&self) -> Result<(), PipelineError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == PipelineState::Running {
            return Err(PipelineError::AlreadyRunning);
        }
        *state = PipelineState::Running;
        Ok(())
    }
}

/// Attempts every enabled source exactly once, emitting one progress event per
/// source (and an error event for each failure), and returns the merged rows.
fn attempt_sources(
    registry: &AdapterRegistry,
    request: &SourceRequest,
    emit: &mut dyn FnMut(PipelineEvent),
) -> Vec<ListingRecord> {
    let enabled = request.enabled();
    let total = enabled.len();

    if total == 0 {
        info!("No sources selected");
        emit(PipelineEvent::Progress {
            percent: 100,
            label: "No sources selected".to_string(),
        });
        return Vec::new();
    }

    let mut results = Vec::with_capacity(total);
    let mut completed = 0;

    for (source, pages) in enabled {
        info!(%source, pages, "🔎 Scraping {source}");

        let outcome = match registry.get(source) {
            Some(adapter) => catch_unwind(AssertUnwindSafe(|| adapter.scrape(pages)))
                .unwrap_or_else(|_| Err(ScraperError::Panicked)),
            None => Err(ScraperError::Config("no adapter registered".to_string())),
        };

        completed += 1;
        let percent = percent_complete(completed, total);

        match outcome {
            Ok(rows) => {
                info!(%source, rows = rows.len(), "✅ {source} done");
                emit(PipelineEvent::Progress {
                    percent,
                    label: format!("Finished {source} ({} listings)", rows.len()),
                });
                results.push(rows);
            }
            Err(e) => {
                warn!(%source, "❌ {source} failed: {e}");
                emit(PipelineEvent::Error {
                    source,
                    message: e.to_string(),
                });
                emit(PipelineEvent::Progress {
                    percent,
                    label: format!("{source} failed"),
                });
            }
        }
    }

    merge_results(results)
}

/// Rounded percentage of attempted sources.
pub(crate) fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed * 100 + total / 2) / total).min(100) as u8
}

/// Concatenates per-source results in attempt order. Each source keeps its
/// own internal ordering; the output is indexed contiguously from 0.
pub fn merge_results(results: Vec<Vec<ListingRecord>>) -> Vec<ListingRecord> {
    let capacity = results.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(capacity);
    for rows in results.into_iter().filter(|rows| !rows.is_empty()) {
        merged.extend(rows);
    }
    merged
}

fn get_state(state: &Mutex<PipelineState>) -> PipelineState {
    *state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_state(state: &Mutex<PipelineState>, next: PipelineState) {
    *state.lock().unwrap_or_else(PoisonError::into_inner) = next;
}
