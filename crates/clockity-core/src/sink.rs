//! Sink interfaces between the timer engines and the presentation layer
//!
//! Both sinks are fire-and-forget: they are called once per tick while an
//! engine runs and must return without blocking for any noticeable time.

use std::time::Duration;

use crate::WidthHint;

/// Audible feedback requested by an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Key click for an accepted digit
    Short,
    /// Confirmation of a command (start, pause, clear, lap, set)
    Medium,
    /// One alarm pulse
    Alarm,
}

/// Beep parameters for a signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl SignalKind {
    pub fn tone(self) -> Tone {
        match self {
            SignalKind::Short => Tone {
                frequency_hz: 800,
                duration: Duration::from_millis(100),
            },
            SignalKind::Medium => Tone {
                frequency_hz: 500,
                duration: Duration::from_millis(100),
            },
            SignalKind::Alarm => Tone {
                frequency_hz: 2000,
                duration: Duration::from_millis(500),
            },
        }
    }
}

/// Receives formatted time strings and discrete state-change notices
pub trait DisplaySink: Send + Sync {
    fn set_stopwatch_time(&self, text: &str);

    /// Replaces the numeric readout once the stopwatch hits its ceiling
    fn set_stopwatch_overflow(&self);

    fn set_lap_entry(&self, index: usize, split: &str, delta: &str);

    fn clear_laps(&self);

    fn set_countdown_time(&self, text: &str, width: WidthHint);

    fn set_countdown_alarm_visual(&self, on: bool);
}

/// Receives discrete alert requests
pub trait SignalSink: Send + Sync {
    fn emit(&self, kind: SignalKind);
}

/// Display sink that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_stopwatch_time(&self, _text: &str) {}
    fn set_stopwatch_overflow(&self) {}
    fn set_lap_entry(&self, _index: usize, _split: &str, _delta: &str) {}
    fn clear_laps(&self) {}
    fn set_countdown_time(&self, _text: &str, _width: WidthHint) {}
    fn set_countdown_alarm_visual(&self, _on: bool) {}
}

/// Signal sink that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSignals;

impl SignalSink for NullSignals {
    fn emit(&self, _kind: SignalKind) {}
}
