///! Refresh scheduler
///!
///! Re-fetches one asteroid on a fixed interval, derives a fresh estimation
///! report from each record and hands every outcome to the emitter.
///!
///! The loop only starts after a successful bootstrap fetch. Cycles run
///! inline on one task, so at most one fetch is in flight, and a stop request
///! is honored between cycles, never in the middle of one.

use std::sync::Arc;
use std::time::Duration;

use prospector_common::{EstimationReport, SimulationParameters};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::renderer::ReportEmitter;
use crate::error::SchedulerError;
use crate::model::neo::{CatalogSource, extract_resources};

/// Result of one report cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Report(EstimationReport),
    /// Fetch succeeded but the record had no usable approach or diameter data
    NoData { asset_id: String },
    FetchFailed { asset_id: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for a successful bootstrap fetch
    Idle,
    Running,
    Stopped,
}

/// Per-run cycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub reports: u64,
    pub no_data: u64,
    pub fetch_failures: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Report(_) => self.reports += 1,
            CycleOutcome::NoData { .. } => self.no_data += 1,
            CycleOutcome::FetchFailed { .. } => self.fetch_failures += 1,
        }
    }
}

/// Ticker period bounds; longer periods would overflow `Instant` arithmetic.
const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

enum Wake {
    Tick,
    Signal,
    Closed,
}

pub struct RefreshScheduler {
    asset_id: String,
    params: SimulationParameters,
    interval: Duration,
    source: Arc<dyn CatalogSource>,
    emitter: Arc<dyn ReportEmitter>,
    state: watch::Sender<SchedulerState>,
}

impl RefreshScheduler {
    /// `interval` is clamped to `[1 ms, 30 years]`.
    pub fn new(
        asset_id: impl Into<String>,
        params: SimulationParameters,
        interval: Duration,
        source: Arc<dyn CatalogSource>,
        emitter: Arc<dyn ReportEmitter>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            params,
            interval: interval.clamp(MIN_PERIOD, MAX_PERIOD),
            source,
            emitter,
            state: watch::Sender::new(SchedulerState::Idle),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    fn set_state(&self, state: SchedulerState) {
        self.state.send_replace(state);
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Initial fetch gating the periodic loop.
    ///
    /// The record itself is discarded; the first report comes from the first
    /// tick's fresh fetch.
    pub async fn bootstrap(&mut self) -> Result<(), SchedulerError> {
        tracing::info!("Running bootstrap fetch for {}", self.asset_id);

        match self.source.fetch(&self.asset_id).await {
            Ok(_) => {
                self.set_state(SchedulerState::Running);
                tracing::info!("Bootstrap fetch for {} succeeded", self.asset_id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Bootstrap fetch for {} failed: {}", self.asset_id, e);
                self.emitter.emit(&CycleOutcome::FetchFailed {
                    asset_id: self.asset_id.clone(),
                    reason: e.to_string(),
                });
                Err(SchedulerError::Bootstrap {
                    asset_id: self.asset_id.clone(),
                    source: e,
                })
            }
        }
    }

    /// Fetch, extract, estimate and emit once. Never fails; every error
    /// becomes an outcome.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let outcome = match self.source.fetch(&self.asset_id).await {
            Err(e) => {
                tracing::warn!("Fetch failed for {}, skipping cycle: {}", self.asset_id, e);
                CycleOutcome::FetchFailed {
                    asset_id: self.asset_id.clone(),
                    reason: e.to_string(),
                }
            }
            Ok(record) => match extract_resources(&record) {
                Some(snapshot) => {
                    let report = EstimationReport::assemble(&snapshot, &self.params);
                    tracing::info!(
                        "Estimated {}: mass {:.3e} kg, thrust {:.3e} N, value {:.3e}",
                        report.id,
                        report.estimated_mass,
                        report.required_thrust,
                        report.estimated_value
                    );
                    CycleOutcome::Report(report)
                }
                None => {
                    tracing::warn!("No usable close approach data for {}", self.asset_id);
                    CycleOutcome::NoData {
                        asset_id: self.asset_id.clone(),
                    }
                }
            },
        };

        self.emitter.emit(&outcome);
        outcome
    }

    /// Bootstrap if needed, then cycle until `shutdown` turns true or its
    /// sender is dropped.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<RunSummary, SchedulerError> {
        if self.state() == SchedulerState::Idle {
            self.bootstrap().await?;
        }

        tracing::info!(
            "Starting refresh loop for {} (interval: {:?})",
            self.asset_id,
            self.interval
        );

        let start = Instant::now()
            .checked_add(self.interval)
            .unwrap_or_else(|| Instant::now() + MIN_PERIOD);
        let mut ticker = interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut summary = RunSummary::default();

        loop {
            if *shutdown.borrow() {
                break;
            }

            let wake = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_ok() { Wake::Signal } else { Wake::Closed }
                }
                _ = ticker.tick() => Wake::Tick,
            };

            match wake {
                Wake::Tick => {
                    let outcome = self.run_cycle().await;
                    summary.record(&outcome);
                }
                Wake::Signal => continue,
                Wake::Closed => break,
            }
        }

        self.set_state(SchedulerState::Stopped);
        tracing::info!(
            "Loop for {} stopped: {} cycles, {} reports, {} no-data, {} failed fetches",
            self.asset_id,
            summary.cycles,
            summary.reports,
            summary.no_data,
            summary.fetch_failures
        );

        Ok(summary)
    }

    /// Run on a background task.
    pub fn spawn(self) -> SchedulerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let state = self.state.subscribe();
        let task = tokio::spawn(self.run(stop_rx));
        SchedulerHandle {
            stop_tx,
            state,
            task,
        }
    }
}

/// Control handle for a spawned scheduler. Dropping it also stops the loop.
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    state: watch::Receiver<SchedulerState>,
    task: JoinHandle<Result<RunSummary, SchedulerError>>,
}

impl SchedulerHandle {
    /// Request a stop; takes effect once the current cycle, if any, finishes.
    pub fn stop(&self) {
        // Err only means the loop has already exited.
        let _ = self.stop_tx.send(true);
    }

    /// Last state published by the scheduler task. A failed bootstrap leaves it `Idle`.
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to exit on its own, e.g. after a failed bootstrap.
    /// Not to be called again once it has returned.
    pub async fn wait(&mut self) -> Result<RunSummary, SchedulerError> {
        (&mut self.task).await?
    }

    pub async fn join(self) -> Result<RunSummary, SchedulerError> {
        self.task.await?
    }
}
