//! The hand-off from the sorting task to whatever draws the bars.
//!
//! Renderers and audio players are rarely thread safe, so the sorter never calls them. It pushes
//! [`StepEvent`]s into an unbounded channel instead and the render side drains the
//! [`StepReceiver`] on its own thread or task, in order. Sending never blocks the sorter.

use tokio::sync::mpsc;

use super::{RunReport, StepKind};

/// An owned snapshot of the array, taken right after the step that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub values: Vec<f32>,
    pub evaluated: Option<usize>,

    /// The step behind this frame. `None` for redraws after a reset or at the end of a run.
    pub step: Option<StepKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    /// Draw this frame.
    Redraw(Frame),

    /// Play the short tick sound.
    SoundTick,

    /// A run ended, either naturally or because it was cancelled.
    Finished(RunReport),
}

pub type StepReceiver = mpsc::UnboundedReceiver<StepEvent>;

#[derive(Debug, Clone)]
pub struct StepEmitter {
    tx: mpsc::UnboundedSender<StepEvent>,
}

impl StepEmitter {
    /// Creates an emitter and the receiving end for the renderer.
    pub fn channel() -> (Self, StepReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// `false` once the renderer has dropped its receiver. Lets callers skip building frames
    /// nobody will look at.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    pub fn redraw(&self, frame: Frame) {
        self.send(StepEvent::Redraw(frame));
    }

    pub fn sound_tick(&self) {
        self.send(StepEvent::SoundTick);
    }

    pub fn finished(&self, report: RunReport) {
        self.send(StepEvent::Finished(report));
    }

    fn send(&self, event: StepEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("renderer is gone, dropping notification");
        }
    }
}
