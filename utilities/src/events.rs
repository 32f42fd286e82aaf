use std::{sync::Arc, time::Duration};

use sortviz_core::engine::{
    EngineConfig, Frame, RunReport, RunState, SortEngine, SortKind, StepEmitter, StepEvent,
    StepKind, StepReceiver,
};
use sortviz_core::model::ArrayModel;

/// Everything a renderer would have been told, in order.
#[derive(Debug, Default)]
pub struct EventLog {
    pub frames: Vec<Frame>,
    pub ticks: usize,
    pub reports: Vec<RunReport>,
}

impl EventLog {
    /// Takes whatever is already queued without waiting for more.
    pub fn drain(events: &mut StepReceiver) -> Self {
        let mut log = EventLog::default();
        while let Ok(event) = events.try_recv() {
            log.push(event);
        }
        log
    }

    /// Collects events until a run reports that it finished.
    pub async fn until_finished(events: &mut StepReceiver) -> Self {
        let mut log = EventLog::default();
        while let Some(event) = events.recv().await {
            let finished = matches!(event, StepEvent::Finished(_));
            log.push(event);
            if finished {
                break;
            }
        }
        log
    }

    fn push(&mut self, event: StepEvent) {
        match event {
            StepEvent::Redraw(frame) => self.frames.push(frame),
            StepEvent::SoundTick => self.ticks += 1,
            StepEvent::Finished(report) => self.reports.push(report),
        }
    }

    /// Frames produced by steps that moved a bar.
    pub fn moves(&self) -> impl Iterator<Item = &Frame> {
        self.frames
            .iter()
            .filter(|frame| frame.step == Some(StepKind::Move))
    }

    /// Frames produced by steps of any kind.
    pub fn steps(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|frame| frame.step.is_some())
    }
}

/// Result of [`sort_once`].
pub struct SortRun {
    pub values: Vec<f32>,
    pub evaluated: Option<usize>,
    pub report: RunReport,
    pub events: EventLog,
}

/// Sorts `values` with `algorithm` at full speed and records every notification.
pub async fn sort_once(algorithm: SortKind, values: Vec<f32>) -> SortRun {
    let config = EngineConfig::default().with_base_delay(Duration::ZERO);
    let model = ArrayModel::from_values(values).into_shared();
    let state = Arc::new(RunState::new(&config));
    let (emitter, mut events) = StepEmitter::channel();

    let engine =
        SortEngine::begin(model.clone(), state, emitter, config).expect("a fresh state is idle");
    let report = engine.run(algorithm).await;

    let snapshot = model.snapshot();
    SortRun {
        values: snapshot.values,
        evaluated: snapshot.evaluated,
        report,
        events: EventLog::drain(&mut events),
    }
}

/// The heights of a fresh `size`-bar session, in sorted order.
pub fn staircase(size: usize) -> Vec<f32> {
    ArrayModel::new(size, EngineConfig::default().max_height)
        .values()
        .to_vec()
}

/// Sorts a copy of `values`, for comparing multisets.
pub fn sorted(values: &[f32]) -> Vec<f32> {
    let mut values = values.to_vec();
    values.sort_by(f32::total_cmp);
    values
}
