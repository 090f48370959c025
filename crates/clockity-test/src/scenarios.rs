//! End-to-end scenarios across engines, sinks and the runtime

use std::time::Duration;

use clockity_core::{DisplayEvent, SignalKind, TimeCode, TimerConfig, WidthHint};
use clockity_engine::{CountdownPhase, StopwatchPhase};
use clockity_runtime::{ClockApp, Mode};

use crate::{advance_n, Rig};

// ============================================================================
// STOPWATCH
// ============================================================================

#[test]
fn stopwatch_overflow_is_terminal_until_clear() {
    let rig = Rig::new();
    let config = TimerConfig {
        overflow_ceiling: TimeCode::new(0, 1, 0, 0).unwrap(),
        ..TimerConfig::default()
    };
    let mut stopwatch = rig.stopwatch(config);

    stopwatch.start().unwrap();
    advance_n(&mut stopwatch, 599);
    assert_eq!(stopwatch.phase(), StopwatchPhase::Running);

    stopwatch.advance();
    assert_eq!(stopwatch.phase(), StopwatchPhase::Overflowed);
    assert_eq!(rig.display.events().last(), Some(&DisplayEvent::StopwatchOverflow));

    let shown = rig.display.events().len();
    advance_n(&mut stopwatch, 50);
    assert_eq!(rig.display.events().len(), shown);
    assert_eq!(stopwatch.elapsed().to_string(), "00:01:00.0");

    stopwatch.clear();
    assert_eq!(stopwatch.phase(), StopwatchPhase::Idle);
}

#[test]
fn lap_outside_running_is_ignored() {
    let rig = Rig::new();
    let mut stopwatch = rig.stopwatch(TimerConfig::default());

    assert!(stopwatch.lap().is_err());
    stopwatch.start().unwrap();
    advance_n(&mut stopwatch, 4);
    stopwatch.lap().unwrap();
    stopwatch.pause().unwrap();
    assert!(stopwatch.lap().is_err());

    assert_eq!(stopwatch.laps().len(), 1);
    assert_eq!(rig.display.lap_entries().len(), 1);
    // start, lap, pause
    assert_eq!(rig.signals.count(SignalKind::Medium), 3);
}

#[test]
fn lap_rows_match_display() {
    let rig = Rig::new();
    let mut stopwatch = rig.stopwatch(TimerConfig::default());

    stopwatch.start().unwrap();
    for gap in [3, 17, 9] {
        advance_n(&mut stopwatch, gap);
        stopwatch.lap().unwrap();
    }

    let rows = rig.display.lap_entries();
    let expected: Vec<_> = stopwatch
        .laps()
        .iter()
        .map(|lap| {
            (
                lap.index,
                lap.split_time.to_string(),
                lap.delta_from_previous.to_string(),
            )
        })
        .collect();
    assert_eq!(rows, expected);
    assert_eq!(rows[2].1, "00:00:02.9");
    assert_eq!(rows[2].2, "00:00:00.9");
}

// ============================================================================
// COUNTDOWN
// ============================================================================

#[test]
fn five_seconds_then_fourteen_pulses() {
    let rig = Rig::new();
    let mut countdown = rig.armed_countdown(TimerConfig::default(), &[5]);

    countdown.start().unwrap();
    advance_n(&mut countdown, 50);
    assert_eq!(countdown.remaining().to_string(), "00:00:00.0");
    assert_eq!(countdown.phase(), CountdownPhase::Alarming);

    for pulse in 1..=14u8 {
        advance_n(&mut countdown, 2);
        assert_eq!(countdown.alarm_pulses_remaining(), 14 - pulse);
    }

    assert_eq!(countdown.phase(), CountdownPhase::Entering);
    assert!(countdown.digit_buffer().is_empty());
    assert_eq!(rig.signals.count(SignalKind::Alarm), 14);

    let visuals: Vec<_> = rig
        .display
        .events()
        .into_iter()
        .filter(|e| matches!(e, DisplayEvent::AlarmVisual(_)))
        .collect();
    assert_eq!(visuals.len(), 28);
    assert_eq!(visuals[0], DisplayEvent::AlarmVisual(true));
    assert_eq!(visuals[27], DisplayEvent::AlarmVisual(false));
}

#[test]
fn six_digit_entry_then_one_tick() {
    let rig = Rig::new();
    let mut countdown = rig.countdown(TimerConfig::default());

    for digit in 1..=6 {
        countdown.enter_digit(digit).unwrap();
    }
    assert_eq!(rig.display.last_countdown_time().as_deref(), Some("12:34:56.0"));

    countdown.arm().unwrap();
    countdown.start().unwrap();
    countdown.advance();
    assert_eq!(countdown.remaining().to_string(), "12:34:55.9");
}

#[test]
fn clear_while_alarming_resets() {
    let rig = Rig::new();
    let mut countdown = rig.armed_countdown(TimerConfig::default(), &[1]);

    countdown.start().unwrap();
    advance_n(&mut countdown, 10 + 9);
    assert_eq!(countdown.phase(), CountdownPhase::Alarming);

    countdown.clear();
    assert_eq!(countdown.phase(), CountdownPhase::Entering);
    assert_eq!(countdown.remaining().to_string(), "00:00:00.0");
    assert_eq!(countdown.alarm_pulses_remaining(), 0);

    // The lit half of the interrupted pulse is switched off
    assert!(rig.display.events().ends_with(&[
        DisplayEvent::AlarmVisual(false),
        DisplayEvent::CountdownTime {
            text: "00:00:00.0".to_string(),
            width: WidthHint::Standard,
        },
    ]));
}

#[test]
fn wide_entry_reports_width_hint() {
    let rig = Rig::new();
    let countdown = rig.armed_countdown(TimerConfig::default(), &[9, 9, 9, 9, 9, 9]);

    assert_eq!(countdown.remaining().to_string(), "100:40:39.0");
    assert!(rig.display.contains(&DisplayEvent::CountdownTime {
        text: "100:40:39.0".to_string(),
        width: WidthHint::Wide,
    }));
}

#[test]
fn leading_zero_and_overflow_digits_are_silent() {
    let rig = Rig::new();
    let mut countdown = rig.countdown(TimerConfig::default());

    let _ = countdown.enter_digit(0);
    for digit in [4, 0, 0, 0, 0, 0, 1] {
        let _ = countdown.enter_digit(digit);
    }

    assert_eq!(countdown.digit_buffer(), "400000");
    assert_eq!(rig.signals.count(SignalKind::Short), 6);
}

// ============================================================================
// RUNTIME
// ============================================================================

#[tokio::test(start_paused = true)]
async fn app_drives_both_engines_in_turn() {
    let rig = Rig::new();
    let mut app = ClockApp::new(
        TimerConfig::nominal(),
        rig.display.clone(),
        rig.signals.clone(),
    )
    .unwrap();

    app.start_stopwatch();
    tokio::time::sleep(Duration::from_millis(2_050)).await;
    app.lap();

    app.switch_to(Mode::Countdown);
    for digit in [3, 0] {
        app.enter_digit(digit);
    }
    app.arm_countdown();
    app.start_countdown();
    tokio::time::sleep(Duration::from_millis(10_050)).await;

    let stopwatch = app.stopwatch_snapshot();
    assert_eq!(stopwatch.phase, StopwatchPhase::Paused);
    assert_eq!(stopwatch.elapsed.to_string(), "00:00:02.0");
    assert_eq!(stopwatch.laps.len(), 1);

    let countdown = app.countdown_snapshot();
    assert_eq!(countdown.phase, CountdownPhase::Running);
    assert_eq!(countdown.remaining.to_string(), "00:00:20.0");

    app.pause_countdown();
    app.clear_stopwatch();
    assert!(!app.is_ticking());
    assert!(app.stopwatch_snapshot().laps.is_empty());
    assert_eq!(app.countdown_snapshot().phase, CountdownPhase::Paused);
}
