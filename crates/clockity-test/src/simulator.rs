//! Tick Simulator - drives an engine in virtual time
//!
//! Models the scheduler the runtime uses: an interval that fires every
//! `cadence`, where a tick whose redraw work overruns the period delays
//! the next one instead of being replayed. Comparing the virtual wall
//! time against the time an engine displays shows the drift of
//! fixed-period ticking.

use std::time::Duration;

use clockity_core::{Tick, TimeCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::displayed_duration;

/// Cost of redrawing after each advance
#[derive(Clone, Debug)]
pub struct RedrawModel {
    /// Fixed cost per tick
    pub fixed: Duration,
    /// Random extra cost per tick (microseconds, uniform 0..=jitter)
    pub jitter_us: u32,
}

impl RedrawModel {
    pub fn new(fixed: Duration, jitter_us: u32) -> Self {
        RedrawModel { fixed, jitter_us }
    }

    /// No redraw cost
    pub fn free() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    /// A redraw that comfortably fits inside the default period
    pub fn typical() -> Self {
        Self::new(Duration::from_millis(10), 3_000)
    }

    /// A redraw slower than a decisecond
    pub fn heavy() -> Self {
        Self::new(Duration::from_millis(120), 0)
    }

    fn sample(&self, rng: &mut StdRng) -> Duration {
        let jitter = if self.jitter_us > 0 {
            rng.gen_range(0..=self.jitter_us)
        } else {
            0
        };
        self.fixed + Duration::from_micros(jitter as u64)
    }
}

/// Displayed versus wall time after a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriftReport {
    pub wall: Duration,
    pub displayed: Duration,
}

impl DriftReport {
    /// Displayed seconds per wall second; above 1.0 the readout runs fast
    pub fn ratio(&self) -> f64 {
        if self.wall.is_zero() {
            return 1.0;
        }
        self.displayed.as_secs_f64() / self.wall.as_secs_f64()
    }

    /// Absolute gap between the readout and the wall clock
    pub fn gap(&self) -> Duration {
        if self.displayed > self.wall {
            self.displayed - self.wall
        } else {
            self.wall - self.displayed
        }
    }
}

/// Drives one engine in virtual time
pub struct TickSimulator<E: Tick> {
    engine: E,
    redraw: RedrawModel,
    rng: StdRng,
    wall: Duration,
    steps: u64,
}

impl<E: Tick> TickSimulator<E> {
    pub fn new(engine: E, redraw: RedrawModel, seed: u64) -> Self {
        TickSimulator {
            engine,
            redraw,
            rng: StdRng::seed_from_u64(seed),
            wall: Duration::ZERO,
            steps: 0,
        }
    }

    /// Wait one cadence (or the redraw, if longer) and advance.
    /// Returns false when the engine has nothing to drive.
    pub fn step(&mut self) -> bool {
        let Some(cadence) = self.engine.cadence() else {
            return false;
        };

        let redraw = self.redraw.sample(&mut self.rng);
        self.wall += cadence.max(redraw);
        self.engine.advance();
        self.steps += 1;
        true
    }

    /// Step until the engine goes idle or `max_steps` is reached
    pub fn run(&mut self, max_steps: u64) -> u64 {
        let mut taken = 0;
        while taken < max_steps && self.step() {
            taken += 1;
        }
        taken
    }

    /// Step while the virtual wall clock stays within `limit`
    pub fn run_for(&mut self, limit: Duration) -> u64 {
        let mut taken = 0;
        while let Some(cadence) = self.engine.cadence() {
            if self.wall + cadence > limit {
                break;
            }
            self.step();
            taken += 1;
        }
        taken
    }

    /// Compare the time shown by the engine with the virtual wall clock
    pub fn drift(&self, shown: TimeCode) -> DriftReport {
        DriftReport {
            wall: self.wall,
            displayed: displayed_duration(shown),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn wall_elapsed(&self) -> Duration {
        self.wall
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockity_core::TimerConfig;
    use clockity_engine::CountdownPhase;

    use crate::Rig;

    fn running_stopwatch(config: TimerConfig) -> clockity_engine::StopwatchEngine {
        let mut stopwatch = Rig::new().stopwatch(config);
        stopwatch.start().unwrap();
        stopwatch
    }

    #[test]
    fn test_default_period_runs_fast() {
        let mut sim = TickSimulator::new(
            running_stopwatch(TimerConfig::default()),
            RedrawModel::free(),
            1,
        );

        assert_eq!(sim.run(100), 100);
        let report = sim.drift(sim.engine().elapsed());

        assert_eq!(report.wall, Duration::from_millis(8_700));
        assert_eq!(report.displayed, Duration::from_secs(10));
        assert!(report.ratio() > 1.14 && report.ratio() < 1.15);
        assert_eq!(report.gap(), Duration::from_millis(1_300));
    }

    #[test]
    fn test_nominal_period_has_no_drift() {
        let mut sim = TickSimulator::new(
            running_stopwatch(TimerConfig::nominal()),
            RedrawModel::typical(),
            7,
        );

        sim.run(600);
        let report = sim.drift(sim.engine().elapsed());
        assert_eq!(report.gap(), Duration::ZERO);
    }

    #[test]
    fn test_heavy_redraw_runs_slow() {
        let mut sim = TickSimulator::new(
            running_stopwatch(TimerConfig::default()),
            RedrawModel::heavy(),
            3,
        );

        sim.run(50);
        let report = sim.drift(sim.engine().elapsed());
        assert_eq!(report.wall, Duration::from_secs(6));
        assert!(report.ratio() < 1.0);
    }

    #[test]
    fn test_run_stops_when_engine_goes_idle() {
        let rig = Rig::new();
        let mut countdown = rig.armed_countdown(TimerConfig::nominal(), &[3]);
        countdown.start().unwrap();

        let mut sim = TickSimulator::new(countdown, RedrawModel::free(), 11);
        // 30 countdown ticks plus 14 pulses of two half-steps
        assert_eq!(sim.run(10_000), 30 + 28);
        assert_eq!(sim.engine().phase(), CountdownPhase::Entering);
        assert_eq!(sim.wall_elapsed(), Duration::from_millis(3_000 + 2_800));
        assert!(!sim.step());
    }

    #[test]
    fn test_run_for_respects_limit() {
        let mut sim = TickSimulator::new(
            running_stopwatch(TimerConfig::nominal()),
            RedrawModel::free(),
            5,
        );

        assert_eq!(sim.run_for(Duration::from_millis(1_050)), 10);
        assert_eq!(sim.engine().elapsed().to_string(), "00:00:01.0");
        assert_eq!(sim.steps(), 10);
    }
}
