//! Engines wired to recording sinks

use std::sync::Arc;
use std::time::Duration;

use clockity_core::{RecordingDisplay, RecordingSignals, Tick, TimeCode, TimerConfig};
use clockity_engine::{CountdownEngine, StopwatchEngine};

/// Shared recorders plus constructors for engines that write into them
#[derive(Clone, Default)]
pub struct Rig {
    pub display: Arc<RecordingDisplay>,
    pub signals: Arc<RecordingSignals>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopwatch(&self, config: TimerConfig) -> StopwatchEngine {
        StopwatchEngine::with_config(config, self.display.clone(), self.signals.clone())
    }

    pub fn countdown(&self, config: TimerConfig) -> CountdownEngine {
        CountdownEngine::with_config(config, self.display.clone(), self.signals.clone())
    }

    /// Countdown already armed with `digits`, ignoring rejected digits
    pub fn armed_countdown(&self, config: TimerConfig, digits: &[u8]) -> CountdownEngine {
        let mut countdown = self.countdown(config);
        for digit in digits {
            let _ = countdown.enter_digit(*digit);
        }
        let _ = countdown.arm();
        countdown
    }
}

/// Advance a stopwatch or countdown `n` times
pub fn advance_n<E: Tick>(engine: &mut E, n: u64) {
    for _ in 0..n {
        engine.advance();
    }
}

/// Nominal duration shown by a time code, one decisecond = 100ms
pub fn displayed_duration(time: TimeCode) -> Duration {
    Duration::from_millis(time.as_deciseconds() * 100)
}
