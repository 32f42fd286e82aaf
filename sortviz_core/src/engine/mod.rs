//! Sorting algorithms rewritten as observable, pausable, cancellable processes.
//!
//! A normal sort finishes in microseconds. Here every comparison and every write goes through a
//! single [`Stepper::step`] call that
//!
//! 1. stops the run if it was cancelled, without touching the array,
//! 2. performs the comparison or mutation and moves the highlight cursor,
//! 3. sends a redraw, plus a sound tick if the step moved a bar and the session is not muted,
//! 4. waits `base_delay / max(1, speed)`,
//! 5. keeps waiting in short increments while the session is paused.
//!
//! The four sorters in [`sorters`] are textbook algorithms with their comparisons routed through
//! that primitive. Cancellation surfaces as the [`Cancelled`] error so it unwinds any depth of
//! recursion with `?`.
//!
//! # Example
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//! use sortviz_core::engine::{EngineConfig, RunOutcome, RunState, SortEngine, SortKind, StepEmitter};
//! use sortviz_core::model::ArrayModel;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = EngineConfig::default().with_base_delay(Duration::ZERO);
//! let model = ArrayModel::from_values(vec![5.0, 3.0, 1.0, 4.0, 2.0]).into_shared();
//! let state = Arc::new(RunState::new(&config));
//! let (emitter, _events) = StepEmitter::channel();
//!
//! let engine = SortEngine::begin(model.clone(), state, emitter, config).unwrap();
//! let report = engine.run(SortKind::Bubble).await;
//!
//! assert_eq!(report.outcome, RunOutcome::Completed);
//! assert_eq!(model.lock().values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
//! # }
//! ```

mod config;
mod emitter;
mod state;
pub mod sorters;

pub use config::EngineConfig;
pub use emitter::{Frame, StepEmitter, StepEvent, StepReceiver};
pub use sorters::{BubbleSorter, InsertionSorter, MergeSorter, SelectionSorter, SortKind};
pub use state::RunState;

use std::{fmt, sync::Arc, time::Duration};

use futures::future::BoxFuture;

use crate::model::{ArrayModel, SharedModel};

/// A sorting algorithm that reports its progress one [`Stepper::step`] at a time.
///
/// The returned future resolves to `Err(Cancelled)` as soon as a step finds the run cancelled.
pub trait Sorter: Send + Sync {
    fn sort<'a>(&'a self, stepper: &'a mut Stepper) -> BoxFuture<'a, Result<(), Cancelled>>;
}

/// What a single step did to the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Looked at bars without changing the arrangement.
    Inspect,

    /// Swapped or relocated a bar. These are the steps that tick.
    Move,
}

/// The run was cancelled. Never reported to callers as a failure, it only unwinds the sorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sort run cancelled")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Paced steps taken.
    pub steps: usize,

    /// Steps that changed the array.
    pub moves: usize,
}

impl RunStats {
    fn record(&mut self, kind: StepKind) {
        self.steps += 1;
        if kind == StepKind::Move {
            self.moves += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: SortKind,
    pub outcome: RunOutcome,
    pub stats: RunStats,
}

/// The step primitive handed to a [`Sorter`]. Owns everything a run needs: the shared array, the
/// shared run flags, the notification channel and the pacing configuration.
pub struct Stepper {
    model: SharedModel,
    state: Arc<RunState>,
    emitter: StepEmitter,
    config: EngineConfig,
    ticket: u64,
    stats: RunStats,
}

impl Stepper {
    /// Number of bars. Fixed for the whole run.
    pub fn len(&self) -> usize {
        self.model.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Fails if the run has been cancelled.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.state.is_current(self.ticket) {
            Ok(())
        } else {
            Err(Cancelled)
        }
    }

    /// Reads the array without counting as a step.
    pub fn read<R>(&self, f: impl FnOnce(&ArrayModel) -> R) -> Result<R, Cancelled> {
        let model = self.model.lock();
        self.check()?;
        Ok(f(&model))
    }

    /// Runs one visualized step.
    ///
    /// `f` does the comparison or mutation and says whether it moved anything. The cancel check,
    /// `f` and the notifications all happen under the same lock the controller takes to reset the
    /// array, so a cancelled run can never write, or redraw, after the reset.
    pub async fn step<F>(&mut self, f: F) -> Result<StepKind, Cancelled>
    where
        F: FnOnce(&mut ArrayModel) -> StepKind,
    {
        let kind = {
            let mut model = self.model.lock();
            self.check()?;
            let kind = f(&mut model);

            // Sent under the lock so a reset frame is never overtaken by a stale one.
            if self.emitter.is_open() {
                self.emitter.redraw(model.frame(Some(kind)));
            }
            if kind == StepKind::Move && !self.state.is_muted() {
                self.emitter.sound_tick();
            }
            kind
        };

        self.stats.record(kind);
        log::trace!("step {}: {kind:?}", self.stats.steps);

        self.pace().await;
        self.wait_while_paused().await;
        Ok(kind)
    }

    async fn pace(&self) {
        let delay = self.config.step_delay(self.state.speed());
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }

    async fn wait_while_paused(&self) {
        let poll = self.config.pause_poll.max(Duration::from_millis(1));
        while self.state.is_paused() && self.state.is_current(self.ticket) {
            tokio::time::sleep(poll).await;
        }
    }
}

/// Runs one algorithm against a shared array.
pub struct SortEngine {
    stepper: Stepper,
}

impl SortEngine {
    /// Claims the run flag in `state`. Returns `None` if another run already holds it.
    pub fn begin(
        model: SharedModel,
        state: Arc<RunState>,
        emitter: StepEmitter,
        config: EngineConfig,
    ) -> Option<Self> {
        let ticket = state.begin()?;
        Some(Self {
            stepper: Stepper {
                model,
                state,
                emitter,
                config,
                ticket,
                stats: RunStats::default(),
            },
        })
    }

    /// Sorts until done or cancelled, then clears the highlight, releases the run flag and sends
    /// the [`RunReport`] as the final notification.
    pub async fn run(mut self, algorithm: SortKind) -> RunReport {
        log::debug!("running {algorithm}");
        let result = algorithm.sorter().sort(&mut self.stepper).await;
        self.finish(algorithm, result)
    }

    fn finish(self, algorithm: SortKind, result: Result<(), Cancelled>) -> RunReport {
        let Stepper {
            model,
            state,
            emitter,
            ticket,
            stats,
            ..
        } = self.stepper;

        let outcome = {
            let mut model = model.lock();
            if result.is_ok() && state.finish(ticket) {
                model.set_evaluated(None);
                emitter.redraw(model.frame(None));
                RunOutcome::Completed
            } else {
                // A newer run may already own the array, leave its cursor alone.
                if !state.is_running() && model.evaluated().is_some() {
                    model.set_evaluated(None);
                    emitter.redraw(model.frame(None));
                }
                RunOutcome::Cancelled
            }
        };

        let report = RunReport {
            algorithm,
            outcome,
            stats,
        };
        log::debug!(
            "{algorithm} {outcome:?} after {} steps ({} moves)",
            stats.steps,
            stats.moves
        );
        emitter.finished(report);
        report
    }
}
