use std::time::Duration;

/// Tunables for a visualizer session.
///
/// ```
/// use std::time::Duration;
/// use sortviz_core::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_size(40)
///     .with_speed(8.0)
///     .with_base_delay(Duration::from_millis(500));
///
/// assert_eq!(config.step_delay(8.0), Duration::from_micros(62_500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of bars.
    pub size: usize,

    /// Pause after every step at speed 1. Higher speeds divide it.
    pub base_delay: Duration,

    /// How often a paused run wakes up to see whether it was resumed or cancelled.
    pub pause_poll: Duration,

    /// Height of the tallest bar.
    pub max_height: f32,

    /// Speed the session starts with.
    pub speed: f64,

    /// Whether the session starts muted.
    pub muted: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: 10,
            base_delay: Duration::from_secs(1),
            pause_poll: Duration::from_millis(100),
            max_height: 100.0,
            speed: 1.0,
            muted: false,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_pause_poll(mut self, pause_poll: Duration) -> Self {
        self.pause_poll = pause_poll;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// `base_delay / max(1, speed)`. Speeds below one, and NaN, pace at the base delay.
    pub fn step_delay(&self, speed: f64) -> Duration {
        // f64::max ignores a NaN operand.
        let speed = speed.max(1.0);
        if speed.is_infinite() {
            return Duration::ZERO;
        }
        self.base_delay.div_f64(speed)
    }
}
