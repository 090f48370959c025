//! Timer configuration

use std::time::Duration;

use crate::{ClockError, ClockResult, TimeCode};

/// Timer engine configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    /// Sleep between advances. Nominally one decisecond, shortened to leave
    /// room for redraw work; displayed time drifts from wall time by the
    /// difference and is not corrected.
    pub tick_period: Duration,
    /// How long the alarm visual stays on, then off, within one pulse
    pub pulse_half_period: Duration,
    /// Number of on/off alarm pulses once the countdown reaches zero
    pub alarm_pulses: u8,
    /// Stopwatch value at which it stops and reports overflow
    pub overflow_ceiling: TimeCode,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            tick_period: Duration::from_millis(87),
            pulse_half_period: Duration::from_millis(100),
            alarm_pulses: 14,
            overflow_ceiling: TimeCode::STOPWATCH_CEILING,
        }
    }
}

impl TimerConfig {
    /// Exact one-decisecond ticks, for hosts with no redraw cost
    pub fn nominal() -> Self {
        TimerConfig {
            tick_period: Duration::from_millis(100),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ClockResult<()> {
        if self.tick_period.is_zero() {
            return Err(ClockError::InvalidConfig("tick_period must be non-zero".into()));
        }
        if self.pulse_half_period.is_zero() {
            return Err(ClockError::InvalidConfig(
                "pulse_half_period must be non-zero".into(),
            ));
        }
        if self.alarm_pulses == 0 {
            return Err(ClockError::InvalidConfig("alarm_pulses must be at least 1".into()));
        }
        if self.overflow_ceiling.is_zero() {
            return Err(ClockError::InvalidConfig(
                "overflow_ceiling must be above zero".into(),
            ));
        }
        Ok(())
    }
}
