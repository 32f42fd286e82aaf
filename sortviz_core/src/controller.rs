//! The session object the UI talks to.
//!
//! A [`SortController`] owns the shared array, the run flags and the sending half of the render
//! channel. Buttons and sliders map one-to-one onto its methods. Starting a sort spawns the
//! engine on the tokio runtime and returns immediately; everything the engine does afterwards
//! reaches the UI only through the [`StepReceiver`](crate::engine::StepReceiver).

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::engine::{
    EngineConfig, Frame, RunReport, RunState, SortEngine, SortKind, StepEmitter, StepReceiver,
};
use crate::model::{ArrayModel, SharedModel};

pub struct SortController {
    model: SharedModel,
    state: Arc<RunState>,
    emitter: StepEmitter,
    config: EngineConfig,
    algorithm: SortKind,
    task: Option<JoinHandle<RunReport>>,
}

impl SortController {
    /// Creates a session with a freshly shuffled array of `config.size` bars and sends the first
    /// redraw.
    pub fn new(config: EngineConfig) -> (Self, StepReceiver) {
        let mut model = ArrayModel::new(config.size, config.max_height);
        model.shuffle();
        Self::with_model(config, model)
    }

    /// Creates a session around an existing arrangement. `config.size` is updated to match it.
    pub fn with_model(mut config: EngineConfig, model: ArrayModel) -> (Self, StepReceiver) {
        let (emitter, events) = StepEmitter::channel();
        config.size = model.len();
        emitter.redraw(model.frame(None));

        let controller = Self {
            model: model.into_shared(),
            state: Arc::new(RunState::new(&config)),
            emitter,
            config,
            algorithm: SortKind::default(),
            task: None,
        };
        (controller, events)
    }

    /// Picks the algorithm for the next [`start`](Self::start). A run already in progress keeps
    /// its algorithm.
    pub fn select_algorithm(&mut self, algorithm: SortKind) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> SortKind {
        self.algorithm
    }

    /// Starts sorting the current array in the background.
    ///
    /// Returns `false`, and does nothing, if a run is already active: a double click is not an
    /// error. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        let Some(engine) = SortEngine::begin(
            self.model.clone(),
            self.state.clone(),
            self.emitter.clone(),
            self.config.clone(),
        ) else {
            log::debug!("start ignored, a sort is already running");
            return false;
        };

        log::info!("starting {} on {} bars", self.algorithm, self.config.size);
        self.task = Some(tokio::spawn(engine.run(self.algorithm)));
        true
    }

    /// Asks the running sort to stop at its next step boundary and leaves the array as it is.
    ///
    /// The sort task is still winding down when this returns; [`wait`](Self::wait) for it if that
    /// matters.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.state.cancel();
        if cancelled {
            log::info!("cancelling {}", self.algorithm);
        }
        cancelled
    }

    /// Cancels any running sort, then rebuilds and reshuffles the array, at `new_size` bars if
    /// given.
    pub fn stop_and_reset(&mut self, new_size: Option<usize>) {
        self.cancel();

        let mut model = self.model.lock();
        model.initialize(new_size.unwrap_or(self.config.size));
        model.shuffle();
        self.config.size = model.len();
        log::info!("reset to {} bars", self.config.size);

        self.emitter.redraw(model.frame(None));
    }

    /// A new size from the size control. Same as resetting at that size.
    pub fn on_size_changed(&mut self, new_size: usize) {
        self.stop_and_reset(Some(new_size));
    }

    /// Pauses or resumes the active run and returns whether it is now paused. Does nothing while
    /// idle.
    pub fn toggle_pause(&self) -> bool {
        self.state.toggle_pause()
    }

    /// Mutes or unmutes future tick sounds and returns whether it is now muted.
    pub fn toggle_mute(&self) -> bool {
        self.state.toggle_mute()
    }

    /// Takes effect from the next step on, including for a run in progress.
    pub fn set_speed(&self, speed: f64) {
        self.state.set_speed(speed);
    }

    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    /// The array as it is right now.
    pub fn snapshot(&self) -> Frame {
        self.model.snapshot()
    }

    /// Waits for the most recently started run to end and returns its report.
    ///
    /// Returns `None` if nothing was started since the last wait, or if the sort task panicked.
    pub async fn wait(&mut self) -> Option<RunReport> {
        let task = self.task.take()?;
        match task.await {
            Ok(report) => Some(report),
            Err(err) => {
                log::error!("sort task failed: {err}");
                // The engine never got to release its run flag.
                self.state.cancel();
                None
            }
        }
    }
}
