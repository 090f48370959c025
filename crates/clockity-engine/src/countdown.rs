//! Countdown engine - digit entry, arming, counting down and the alarm
//!
//! Phase flow:
//! - Entering -> Armed -> Running <-> Paused
//! - Running -> Alarming -> Entering
//! - any phase -> Entering (clear)
//!
//! Once the remaining time reaches zero the engine rings a bounded alarm.
//! Each pulse takes two advances: visual on (with an alarm signal), then
//! visual off. After the last pulse the engine is back in Entering.

use std::sync::Arc;
use std::time::Duration;

use clockity_core::{
    ClockError, ClockResult, DisplaySink, SignalKind, SignalSink, Tick, TimeCode, TimerConfig,
    WidthHint, MAX_ENTRY_DIGITS,
};

/// Countdown phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CountdownPhase {
    /// Accepting digits
    #[default]
    Entering,
    /// Duration fixed, waiting for start
    Armed,
    Running,
    Paused,
    /// Reached zero, pulsing the alarm
    Alarming,
}

impl CountdownPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CountdownPhase::Entering => "entering",
            CountdownPhase::Armed => "armed",
            CountdownPhase::Running => "running",
            CountdownPhase::Paused => "paused",
            CountdownPhase::Alarming => "alarming",
        }
    }
}

/// Countdown engine
pub struct CountdownEngine {
    phase: CountdownPhase,
    remaining: TimeCode,
    /// Up to six digits typed while Entering
    digits: String,
    alarm_pulses_remaining: u8,
    /// Alarm visual currently shown (first half of a pulse)
    alarm_lit: bool,
    config: TimerConfig,
    display: Arc<dyn DisplaySink>,
    signals: Arc<dyn SignalSink>,
}

impl CountdownEngine {
    /// Create a countdown with the default configuration
    pub fn new(display: Arc<dyn DisplaySink>, signals: Arc<dyn SignalSink>) -> Self {
        Self::with_config(TimerConfig::default(), display, signals)
    }

    pub fn with_config(
        config: TimerConfig,
        display: Arc<dyn DisplaySink>,
        signals: Arc<dyn SignalSink>,
    ) -> Self {
        CountdownEngine {
            phase: CountdownPhase::Entering,
            remaining: TimeCode::ZERO,
            digits: String::with_capacity(MAX_ENTRY_DIGITS),
            alarm_pulses_remaining: 0,
            alarm_lit: false,
            config,
            display,
            signals,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn remaining(&self) -> TimeCode {
        self.remaining
    }

    pub fn digit_buffer(&self) -> &str {
        &self.digits
    }

    pub fn alarm_pulses_remaining(&self) -> u8 {
        self.alarm_pulses_remaining
    }

    pub fn is_alarm_lit(&self) -> bool {
        self.alarm_lit
    }

    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// The normalized duration the current digits describe, if any
    pub fn preview(&self) -> Option<TimeCode> {
        TimeCode::parse_digits(&self.digits)
            .ok()
            .map(|raw| raw.normalize_overflow())
    }

    fn reject(&self, operation: &'static str) -> ClockError {
        ClockError::InvalidPhaseTransition {
            operation,
            phase: self.phase.as_str(),
        }
    }

    fn show(&self, time: TimeCode) {
        self.display
            .set_countdown_time(&time.to_string(), time.width_hint());
    }

    /// Append one digit while Entering.
    /// A leading zero and a seventh digit are ignored.
    pub fn enter_digit(&mut self, digit: u8) -> ClockResult<()> {
        if self.phase != CountdownPhase::Entering {
            return Err(self.reject("enter_digit"));
        }
        if digit > 9 {
            return Err(ClockError::InvalidDigit(digit));
        }
        if digit == 0 && self.digits.is_empty() {
            return Err(ClockError::LeadingZero);
        }
        if self.digits.len() >= MAX_ENTRY_DIGITS {
            return Err(ClockError::BufferOverflow {
                capacity: MAX_ENTRY_DIGITS,
            });
        }

        self.digits.push(char::from(b'0' + digit));
        let preview = TimeCode::parse_digits(&self.digits)?.normalize_overflow();

        tracing::trace!(digits = %self.digits, %preview, "digit entered");
        self.signals.emit(SignalKind::Short);
        self.show(preview);
        Ok(())
    }

    /// Fix the remaining time from the entered digits ("Set")
    pub fn arm(&mut self) -> ClockResult<()> {
        if self.phase != CountdownPhase::Entering {
            return Err(self.reject("arm"));
        }
        if self.digits.is_empty() {
            return Err(ClockError::EmptyEntry);
        }

        self.remaining = TimeCode::parse_digits(&self.digits)?.normalize_overflow();
        self.digits.clear();
        self.phase = CountdownPhase::Armed;

        tracing::debug!(remaining = %self.remaining, "countdown armed");
        self.signals.emit(SignalKind::Medium);
        self.show(self.remaining);
        Ok(())
    }

    /// Start from Armed or resume from Paused
    pub fn start(&mut self) -> ClockResult<()> {
        if !matches!(self.phase, CountdownPhase::Armed | CountdownPhase::Paused)
            || self.remaining.is_zero()
        {
            return Err(self.reject("start"));
        }

        tracing::debug!(
            from = self.phase.as_str(),
            remaining = %self.remaining,
            "countdown running"
        );
        self.phase = CountdownPhase::Running;
        self.signals.emit(SignalKind::Medium);
        Ok(())
    }

    pub fn pause(&mut self) -> ClockResult<()> {
        if self.phase != CountdownPhase::Running {
            return Err(self.reject("pause"));
        }

        tracing::debug!(remaining = %self.remaining, "countdown paused");
        self.phase = CountdownPhase::Paused;
        self.signals.emit(SignalKind::Medium);
        Ok(())
    }

    /// Back to an empty Entering state from any phase, silencing any alarm.
    /// Always succeeds.
    pub fn clear(&mut self) {
        tracing::debug!(
            from = self.phase.as_str(),
            alarm_pulses_aborted = self.alarm_pulses_remaining,
            "countdown cleared"
        );

        if self.alarm_lit {
            self.display.set_countdown_alarm_visual(false);
        }
        self.alarm_lit = false;
        self.alarm_pulses_remaining = 0;
        self.phase = CountdownPhase::Entering;
        self.digits.clear();
        self.remaining = TimeCode::ZERO;

        self.signals.emit(SignalKind::Medium);
        self.display
            .set_countdown_time(&TimeCode::ZERO.to_string(), WidthHint::Standard);
    }

    /// One tick: count down while Running, step the alarm while Alarming
    pub fn advance(&mut self) {
        match self.phase {
            CountdownPhase::Running => self.count_down(),
            CountdownPhase::Alarming => self.step_alarm(),
            _ => {
                tracing::trace!(phase = self.phase.as_str(), "countdown advance ignored");
            }
        }
    }

    fn count_down(&mut self) {
        // Running always stops at zero, so there is a decisecond to take
        debug_assert!(!self.remaining.is_zero(), "countdown ticked at zero");

        if let Err(err) = self.remaining.decrement() {
            tracing::error!(%err, "countdown decremented past zero");
            self.begin_alarm();
            return;
        }

        self.show(self.remaining);

        if self.remaining.is_zero() {
            self.begin_alarm();
        }
    }

    fn begin_alarm(&mut self) {
        tracing::info!(pulses = self.config.alarm_pulses, "countdown reached zero");
        self.phase = CountdownPhase::Alarming;
        self.alarm_pulses_remaining = self.config.alarm_pulses;
        self.alarm_lit = false;
    }

    fn step_alarm(&mut self) {
        if !self.alarm_lit {
            self.alarm_lit = true;
            self.signals.emit(SignalKind::Alarm);
            self.display.set_countdown_alarm_visual(true);
            return;
        }

        self.alarm_lit = false;
        self.display.set_countdown_alarm_visual(false);
        self.alarm_pulses_remaining = self.alarm_pulses_remaining.saturating_sub(1);

        if self.alarm_pulses_remaining == 0 {
            tracing::info!("alarm finished");
            self.phase = CountdownPhase::Entering;
            self.digits.clear();
        }
    }
}

impl Tick for CountdownEngine {
    fn cadence(&self) -> Option<Duration> {
        match self.phase {
            CountdownPhase::Running => Some(self.config.tick_period),
            CountdownPhase::Alarming => Some(self.config.pulse_half_period),
            _ => None,
        }
    }

    fn advance(&mut self) {
        CountdownEngine::advance(self);
    }
}
