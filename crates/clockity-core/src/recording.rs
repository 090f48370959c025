//! In-memory sinks that keep a log of everything they receive
//!
//! Meant for tests and diagnostics. A running engine produces one event
//! per tick, so long-lived hosts should build them with `with_limit`,
//! which keeps only the most recent events.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::{DisplaySink, SignalKind, SignalSink, WidthHint};

/// One call received by a [`RecordingDisplay`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    StopwatchTime(String),
    StopwatchOverflow,
    LapEntry {
        index: usize,
        split: String,
        delta: String,
    },
    LapsCleared,
    CountdownTime {
        text: String,
        width: WidthHint,
    },
    AlarmVisual(bool),
}

/// Append to a log, dropping the oldest entries beyond `limit`
fn push_bounded<T>(log: &mut VecDeque<T>, limit: Option<usize>, item: T) {
    if let Some(limit) = limit {
        while log.len() >= limit {
            log.pop_front();
        }
    }
    log.push_back(item);
}

/// Display sink that records every call
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    events: Mutex<VecDeque<DisplayEvent>>,
    limit: Option<usize>,
}

impl RecordingDisplay {
    /// Unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the `limit` most recent events (at least one)
    pub fn with_limit(limit: usize) -> Self {
        RecordingDisplay {
            events: Mutex::new(VecDeque::new()),
            limit: Some(limit.max(1)),
        }
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<DisplayEvent> {
        Vec::from(std::mem::take(&mut *self.events.lock()))
    }

    pub fn last_stopwatch_time(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            DisplayEvent::StopwatchTime(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_countdown_time(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            DisplayEvent::CountdownTime { text, .. } => Some(text.clone()),
            _ => None,
        })
    }

    /// Lap rows as `(index, split, delta)`, oldest first
    pub fn lap_entries(&self) -> Vec<(usize, String, String)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::LapEntry {
                    index,
                    split,
                    delta,
                } => Some((*index, split.clone(), delta.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &DisplayEvent) -> bool {
        self.events.lock().contains(event)
    }

    fn push(&self, event: DisplayEvent) {
        push_bounded(&mut *self.events.lock(), self.limit, event);
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_stopwatch_time(&self, text: &str) {
        self.push(DisplayEvent::StopwatchTime(text.to_string()));
    }

    fn set_stopwatch_overflow(&self) {
        self.push(DisplayEvent::StopwatchOverflow);
    }

    fn set_lap_entry(&self, index: usize, split: &str, delta: &str) {
        self.push(DisplayEvent::LapEntry {
            index,
            split: split.to_string(),
            delta: delta.to_string(),
        });
    }

    fn clear_laps(&self) {
        self.push(DisplayEvent::LapsCleared);
    }

    fn set_countdown_time(&self, text: &str, width: WidthHint) {
        self.push(DisplayEvent::CountdownTime {
            text: text.to_string(),
            width,
        });
    }

    fn set_countdown_alarm_visual(&self, on: bool) {
        self.push(DisplayEvent::AlarmVisual(on));
    }
}

/// Signal sink that records every emitted kind
#[derive(Debug, Default)]
pub struct RecordingSignals {
    emitted: Mutex<VecDeque<SignalKind>>,
    limit: Option<usize>,
}

impl RecordingSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        RecordingSignals {
            emitted: Mutex::new(VecDeque::new()),
            limit: Some(limit.max(1)),
        }
    }

    pub fn emitted(&self) -> Vec<SignalKind> {
        self.emitted.lock().iter().copied().collect()
    }

    pub fn count(&self, kind: SignalKind) -> usize {
        self.emitted.lock().iter().filter(|k| **k == kind).count()
    }

    pub fn take(&self) -> Vec<SignalKind> {
        Vec::from(std::mem::take(&mut *self.emitted.lock()))
    }
}

impl SignalSink for RecordingSignals {
    fn emit(&self, kind: SignalKind) {
        push_bounded(&mut *self.emitted.lock(), self.limit, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_display_helpers() {
        let display = RecordingDisplay::new();
        display.set_stopwatch_time("00:00:00.1");
        display.set_lap_entry(1, "00:00:00.1", "00:00:00.1");
        display.set_stopwatch_time("00:00:00.2");
        display.set_countdown_time("00:00:05.0", WidthHint::Standard);

        assert_eq!(display.last_stopwatch_time().as_deref(), Some("00:00:00.2"));
        assert_eq!(display.last_countdown_time().as_deref(), Some("00:00:05.0"));
        assert_eq!(display.lap_entries().len(), 1);

        assert_eq!(display.take().len(), 4);
        assert!(display.events().is_empty());
    }

    #[test]
    fn test_recording_signals_count() {
        let signals = RecordingSignals::new();
        signals.emit(SignalKind::Medium);
        signals.emit(SignalKind::Alarm);
        signals.emit(SignalKind::Alarm);

        assert_eq!(signals.count(SignalKind::Alarm), 2);
        assert_eq!(signals.count(SignalKind::Short), 0);
        assert_eq!(signals.take().len(), 3);
    }

    #[test]
    fn test_limit_keeps_most_recent() {
        let display = RecordingDisplay::with_limit(3);
        for tenth in 1..=5 {
            display.set_stopwatch_time(&format!("00:00:00.{tenth}"));
        }

        let events = display.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], DisplayEvent::StopwatchTime("00:00:00.3".to_string()));
        assert_eq!(display.last_stopwatch_time().as_deref(), Some("00:00:00.5"));

        let signals = RecordingSignals::with_limit(2);
        signals.emit(SignalKind::Short);
        signals.emit(SignalKind::Medium);
        signals.emit(SignalKind::Alarm);
        assert_eq!(signals.emitted(), vec![SignalKind::Medium, SignalKind::Alarm]);
    }
}
