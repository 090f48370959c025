//! ClockApp - the facade a presentation layer talks to
//!
//! Owns both engines and one ticker per engine. At most one engine is
//! live: starting one suspends the other but keeps its state. Switching
//! screens never touches an engine. Every command is total: rejected
//! commands are logged and dropped, never surfaced.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use clockity_core::{
    ClockError, ClockResult, DisplaySink, SignalSink, TimeCode, TimerConfig,
};
use clockity_engine::{
    CountdownEngine, CountdownPhase, LapRecord, StopwatchEngine, StopwatchPhase,
};

use crate::{SharedEngine, Ticker};

/// Which screen is in front
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Wall-clock screen; no engine is live
    #[default]
    Home,
    Stopwatch,
    Countdown,
}

/// Copy of the stopwatch state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopwatchSnapshot {
    pub phase: StopwatchPhase,
    pub elapsed: TimeCode,
    pub laps: Vec<LapRecord>,
}

/// Copy of the countdown state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub phase: CountdownPhase,
    pub remaining: TimeCode,
    pub digits: String,
    pub alarm_pulses_remaining: u8,
}

/// Clock application
pub struct ClockApp {
    mode: Mode,
    stopwatch: SharedEngine<StopwatchEngine>,
    countdown: SharedEngine<CountdownEngine>,
    stopwatch_ticker: Ticker<StopwatchEngine>,
    countdown_ticker: Ticker<CountdownEngine>,
}

impl ClockApp {
    /// Create the app on the tokio runtime of the calling context
    pub fn new(
        config: TimerConfig,
        display: Arc<dyn DisplaySink>,
        signals: Arc<dyn SignalSink>,
    ) -> ClockResult<Self> {
        let runtime = Handle::try_current().map_err(|e| ClockError::Runtime(e.to_string()))?;
        Self::with_handle(config, display, signals, runtime)
    }

    pub fn with_handle(
        config: TimerConfig,
        display: Arc<dyn DisplaySink>,
        signals: Arc<dyn SignalSink>,
        runtime: Handle,
    ) -> ClockResult<Self> {
        config.validate()?;

        tracing::info!(
            tick_period_ms = config.tick_period.as_millis() as u64,
            alarm_pulses = config.alarm_pulses,
            "clock app ready"
        );

        let stopwatch = Arc::new(Mutex::new(StopwatchEngine::with_config(
            config.clone(),
            Arc::clone(&display),
            Arc::clone(&signals),
        )));
        let countdown = Arc::new(Mutex::new(CountdownEngine::with_config(
            config, display, signals,
        )));

        Ok(ClockApp {
            mode: Mode::Home,
            stopwatch_ticker: Ticker::new(Arc::clone(&stopwatch), runtime.clone()),
            countdown_ticker: Ticker::new(Arc::clone(&countdown), runtime),
            stopwatch,
            countdown,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bring a screen to the front. Engines keep running behind it.
    pub fn switch_to(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "mode switched");
        self.mode = mode;
    }

    /// Start or resume the stopwatch, suspending the countdown
    pub fn start_stopwatch(&mut self) {
        self.switch_to(Mode::Stopwatch);
        let mut stopwatch = self.stopwatch.lock();
        if accepted(stopwatch.start(), "start_stopwatch") {
            suspend_countdown(&self.countdown, &mut self.countdown_ticker);
            self.stopwatch_ticker.start_locked(&stopwatch);
        }
    }

    pub fn pause_stopwatch(&mut self) {
        let mut stopwatch = self.stopwatch.lock();
        if stopwatch.is_running() {
            self.stopwatch_ticker.stop_locked(&stopwatch);
        }
        accepted(stopwatch.pause(), "pause_stopwatch");
    }

    pub fn clear_stopwatch(&mut self) {
        let mut stopwatch = self.stopwatch.lock();
        self.stopwatch_ticker.stop_locked(&stopwatch);
        stopwatch.clear();
    }

    pub fn lap(&mut self) {
        accepted(self.stopwatch.lock().lap(), "lap");
    }

    pub fn enter_digit(&mut self, digit: u8) {
        accepted(self.countdown.lock().enter_digit(digit), "enter_digit");
    }

    pub fn arm_countdown(&mut self) {
        accepted(self.countdown.lock().arm(), "arm_countdown");
    }

    /// Start or resume the countdown, suspending the stopwatch
    pub fn start_countdown(&mut self) {
        self.switch_to(Mode::Countdown);
        let mut countdown = self.countdown.lock();
        if accepted(countdown.start(), "start_countdown") {
            suspend_stopwatch(&self.stopwatch, &mut self.stopwatch_ticker);
            self.countdown_ticker.start_locked(&countdown);
        }
    }

    pub fn pause_countdown(&mut self) {
        let mut countdown = self.countdown.lock();
        if countdown.is_running() {
            self.countdown_ticker.stop_locked(&countdown);
        }
        accepted(countdown.pause(), "pause_countdown");
    }

    pub fn clear_countdown(&mut self) {
        let mut countdown = self.countdown.lock();
        self.countdown_ticker.stop_locked(&countdown);
        countdown.clear();
    }

    pub fn stopwatch_snapshot(&self) -> StopwatchSnapshot {
        let stopwatch = self.stopwatch.lock();
        StopwatchSnapshot {
            phase: stopwatch.phase(),
            elapsed: stopwatch.elapsed(),
            laps: stopwatch.laps().to_vec(),
        }
    }

    pub fn countdown_snapshot(&self) -> CountdownSnapshot {
        let countdown = self.countdown.lock();
        CountdownSnapshot {
            phase: countdown.phase(),
            remaining: countdown.remaining(),
            digits: countdown.digit_buffer().to_string(),
            alarm_pulses_remaining: countdown.alarm_pulses_remaining(),
        }
    }

    /// Whether the stopwatch or countdown ticker is currently driving
    pub fn is_ticking(&self) -> bool {
        self.stopwatch_ticker.is_active() || self.countdown_ticker.is_active()
    }
}

/// Pause a running stopwatch so only one engine ticks
fn suspend_stopwatch(
    stopwatch: &SharedEngine<StopwatchEngine>,
    ticker: &mut Ticker<StopwatchEngine>,
) {
    let mut stopwatch = stopwatch.lock();
    if stopwatch.is_running() {
        ticker.stop_locked(&stopwatch);
        accepted(stopwatch.pause(), "pause_stopwatch");
    }
}

/// Pause a running countdown so only one engine ticks. A ringing alarm
/// cannot be paused, so it is silenced.
fn suspend_countdown(
    countdown: &SharedEngine<CountdownEngine>,
    ticker: &mut Ticker<CountdownEngine>,
) {
    let mut countdown = countdown.lock();
    match countdown.phase() {
        CountdownPhase::Running => {
            ticker.stop_locked(&countdown);
            accepted(countdown.pause(), "pause_countdown");
        }
        CountdownPhase::Alarming => {
            ticker.stop_locked(&countdown);
            countdown.clear();
        }
        _ => {}
    }
}

/// Log and drop a rejected command
fn accepted(result: ClockResult<()>, command: &'static str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::trace!(command, %err, "command ignored");
            false
        }
    }
}
