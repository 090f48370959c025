//! Clockity Engine - the two timer state machines
//!
//! This crate implements:
//! - Stopwatch: counts up, records laps, stops at an overflow ceiling
//! - Countdown: digit entry, arming, counting down and a bounded alarm
//!
//! Both engines are synchronous. They only move forward in time when the
//! scheduler calls `advance()`.

pub mod countdown;
pub mod stopwatch;

pub use countdown::*;
pub use stopwatch::*;
