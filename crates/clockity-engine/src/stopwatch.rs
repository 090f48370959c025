//! Stopwatch engine - counts up one decisecond per tick and records laps

use std::sync::Arc;
use std::time::Duration;

use clockity_core::{
    ClockError, ClockResult, DisplaySink, SignalKind, SignalSink, Tick, TimeCode, TimerConfig,
};

/// Stopwatch phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StopwatchPhase {
    /// Cleared, showing 00:00:00.0
    #[default]
    Idle,
    Running,
    Paused,
    /// Hit the ceiling; terminal until cleared
    Overflowed,
}

impl StopwatchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            StopwatchPhase::Idle => "idle",
            StopwatchPhase::Running => "running",
            StopwatchPhase::Paused => "paused",
            StopwatchPhase::Overflowed => "overflowed",
        }
    }
}

/// One recorded split
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LapRecord {
    /// 1-based position in the lap log
    pub index: usize,
    /// Elapsed time when the lap was taken
    pub split_time: TimeCode,
    /// Time since the previous split (or since zero for the first lap)
    pub delta_from_previous: TimeCode,
}

/// Stopwatch engine
pub struct StopwatchEngine {
    phase: StopwatchPhase,
    elapsed: TimeCode,
    /// Append-only within a run, emptied by clear
    laps: Vec<LapRecord>,
    config: TimerConfig,
    display: Arc<dyn DisplaySink>,
    signals: Arc<dyn SignalSink>,
}

impl StopwatchEngine {
    /// Create a stopwatch with the default configuration
    pub fn new(display: Arc<dyn DisplaySink>, signals: Arc<dyn SignalSink>) -> Self {
        Self::with_config(TimerConfig::default(), display, signals)
    }

    pub fn with_config(
        config: TimerConfig,
        display: Arc<dyn DisplaySink>,
        signals: Arc<dyn SignalSink>,
    ) -> Self {
        StopwatchEngine {
            phase: StopwatchPhase::Idle,
            elapsed: TimeCode::ZERO,
            laps: Vec::new(),
            config,
            display,
            signals,
        }
    }

    pub fn phase(&self) -> StopwatchPhase {
        self.phase
    }

    pub fn elapsed(&self) -> TimeCode {
        self.elapsed
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn is_running(&self) -> bool {
        self.phase == StopwatchPhase::Running
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    fn reject(&self, operation: &'static str) -> ClockError {
        ClockError::InvalidPhaseTransition {
            operation,
            phase: self.phase.as_str(),
        }
    }

    /// Start from Idle or resume from Paused, keeping the elapsed time
    pub fn start(&mut self) -> ClockResult<()> {
        if !matches!(self.phase, StopwatchPhase::Idle | StopwatchPhase::Paused) {
            return Err(self.reject("start"));
        }

        tracing::debug!(
            from = self.phase.as_str(),
            elapsed = %self.elapsed,
            "stopwatch running"
        );
        self.phase = StopwatchPhase::Running;
        self.signals.emit(SignalKind::Medium);
        self.display.set_stopwatch_time(&self.elapsed.to_string());
        Ok(())
    }

    pub fn pause(&mut self) -> ClockResult<()> {
        if self.phase != StopwatchPhase::Running {
            return Err(self.reject("pause"));
        }

        tracing::debug!(elapsed = %self.elapsed, "stopwatch paused");
        self.phase = StopwatchPhase::Paused;
        self.signals.emit(SignalKind::Medium);
        Ok(())
    }

    /// Reset to Idle from any phase. Always succeeds.
    pub fn clear(&mut self) {
        tracing::debug!(
            from = self.phase.as_str(),
            laps = self.laps.len(),
            "stopwatch cleared"
        );
        self.phase = StopwatchPhase::Idle;
        self.elapsed = TimeCode::ZERO;
        self.laps.clear();
        self.signals.emit(SignalKind::Medium);
        self.display.clear_laps();
        self.display.set_stopwatch_time(&self.elapsed.to_string());
    }

    /// Record a split. Only valid while running.
    pub fn lap(&mut self) -> ClockResult<()> {
        if self.phase != StopwatchPhase::Running {
            return Err(self.reject("lap"));
        }

        let previous = self
            .laps
            .last()
            .map(|lap| lap.split_time)
            .unwrap_or(TimeCode::ZERO);
        let record = LapRecord {
            index: self.laps.len() + 1,
            split_time: self.elapsed,
            delta_from_previous: TimeCode::difference(self.elapsed, previous),
        };

        tracing::debug!(
            index = record.index,
            split = %record.split_time,
            delta = %record.delta_from_previous,
            "lap recorded"
        );
        self.signals.emit(SignalKind::Medium);
        self.display.set_lap_entry(
            record.index,
            &record.split_time.to_string(),
            &record.delta_from_previous.to_string(),
        );
        self.laps.push(record);
        Ok(())
    }

    /// One tick: add a decisecond, or stop at the ceiling
    pub fn advance(&mut self) {
        if self.phase != StopwatchPhase::Running {
            tracing::trace!(phase = self.phase.as_str(), "stopwatch advance ignored");
            return;
        }

        self.elapsed.increment();

        if self.elapsed >= self.config.overflow_ceiling {
            tracing::info!(elapsed = %self.elapsed, "stopwatch overflowed");
            self.phase = StopwatchPhase::Overflowed;
            self.display.set_stopwatch_overflow();
            return;
        }

        self.display.set_stopwatch_time(&self.elapsed.to_string());
    }
}

impl Tick for StopwatchEngine {
    fn cadence(&self) -> Option<Duration> {
        self.is_running().then_some(self.config.tick_period)
    }

    fn advance(&mut self) {
        StopwatchEngine::advance(self);
    }
}
