use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::EngineConfig;

/// Flags shared between the controller (written from the UI side) and the sorting task (read at
/// every step boundary).
///
/// Everything is a plain atomic, so neither side ever waits on the other.
///
/// Whether a run is active is encoded in a counter: even means idle, odd means running. Starting
/// a run bumps it to the next odd value and hands that value to the run as its *ticket*;
/// cancelling or finishing bumps it again. A run may keep stepping only while the counter still
/// equals its ticket, so a cancelled run stays dead even if another run is started before the old
/// task notices.
#[derive(Debug)]
pub struct RunState {
    run: AtomicU64,
    paused: AtomicBool,
    muted: AtomicBool,
    speed: AtomicU64,
}

impl RunState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            run: AtomicU64::new(0),
            paused: AtomicBool::new(false),
            muted: AtomicBool::new(config.muted),
            speed: AtomicU64::new(config.speed.to_bits()),
        }
    }

    /// Marks a run as started and returns its ticket, or `None` if one is already running.
    pub fn begin(&self) -> Option<u64> {
        let run = self.run.load(Ordering::SeqCst);
        if is_odd(run) {
            return None;
        }

        self.run
            .compare_exchange(run, run + 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        self.paused.store(false, Ordering::SeqCst);
        Some(run + 1)
    }

    /// Asks the active run, if any, to stop at its next step boundary.
    ///
    /// Returns `true` if there was a run to cancel.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .run
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |run| {
                is_odd(run).then_some(run + 1)
            })
            .is_ok();
        self.paused.store(false, Ordering::SeqCst);
        cancelled
    }

    /// Releases the run flag held by `ticket`. Does nothing if that run was already cancelled.
    pub fn finish(&self, ticket: u64) -> bool {
        let finished = self
            .run
            .compare_exchange(ticket, ticket + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if finished {
            self.paused.store(false, Ordering::SeqCst);
        }
        finished
    }

    /// `true` while the run holding `ticket` has been neither cancelled nor finished.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.run.load(Ordering::SeqCst) == ticket
    }

    pub fn is_running(&self) -> bool {
        is_odd(self.run.load(Ordering::SeqCst))
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Flips the pause flag of the active run and returns the new value. Idle sessions cannot be
    /// paused, so this returns `false` without doing anything when nothing is running.
    pub fn toggle_pause(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Flips the mute flag and returns the new value.
    pub fn toggle_mute(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn speed(&self) -> f64 {
        f64::from_bits(self.speed.load(Ordering::Relaxed))
    }

    pub fn set_speed(&self, speed: f64) {
        if speed.is_nan() || speed <= 0.0 {
            log::warn!("speed {speed} is not a positive number, pacing at the base delay");
        }
        self.speed.store(speed.to_bits(), Ordering::Relaxed);
    }
}

fn is_odd(run: u64) -> bool {
    run % 2 == 1
}
