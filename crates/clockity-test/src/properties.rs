//! Property tests over engine sequences

use proptest::prelude::*;

use clockity_core::{TimeCode, TimerConfig};
use clockity_engine::{CountdownPhase, StopwatchPhase};

use crate::{advance_n, Rig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lap_deltas_sum_to_splits(gaps in prop::collection::vec(0u64..2_000, 1..12)) {
        let rig = Rig::new();
        let mut stopwatch = rig.stopwatch(TimerConfig::default());
        stopwatch.start().unwrap();

        for gap in &gaps {
            advance_n(&mut stopwatch, *gap);
            stopwatch.lap().unwrap();
        }

        let laps = stopwatch.laps();
        prop_assert_eq!(laps.len(), gaps.len());
        prop_assert_eq!(laps[0].delta_from_previous, laps[0].split_time);
        for pair in laps.windows(2) {
            prop_assert_eq!(pair[1].index, pair[0].index + 1);
            prop_assert_eq!(pair[0].split_time + pair[1].delta_from_previous, pair[1].split_time);
        }
        let total: u64 = gaps.iter().sum();
        prop_assert_eq!(laps[laps.len() - 1].split_time.as_deciseconds(), total);
    }

    #[test]
    fn pause_resume_never_loses_ticks(segments in prop::collection::vec(1u64..300, 1..8)) {
        let rig = Rig::new();
        let mut stopwatch = rig.stopwatch(TimerConfig::default());

        for ticks in &segments {
            stopwatch.start().unwrap();
            advance_n(&mut stopwatch, *ticks);
            stopwatch.pause().unwrap();
            // Ticks while paused are dropped
            advance_n(&mut stopwatch, 5);
        }

        prop_assert_eq!(stopwatch.phase(), StopwatchPhase::Paused);
        prop_assert_eq!(stopwatch.elapsed().as_deciseconds(), segments.iter().sum::<u64>());
    }

    #[test]
    fn countdown_reaches_zero_in_exact_ticks(digits in "[1-9][0-9]{0,2}") {
        let rig = Rig::new();
        let entered: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
        let mut countdown = rig.armed_countdown(TimerConfig::default(), &entered);
        let total = countdown.remaining().as_deciseconds();
        prop_assert!(total > 0);

        countdown.start().unwrap();
        advance_n(&mut countdown, total - 1);
        prop_assert_eq!(countdown.phase(), CountdownPhase::Running);
        prop_assert_eq!(countdown.remaining(), TimeCode::from_deciseconds(1));

        countdown.advance();
        prop_assert_eq!(countdown.phase(), CountdownPhase::Alarming);
        prop_assert!(countdown.remaining().is_zero());
    }
}
