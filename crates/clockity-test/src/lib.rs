//! Clockity Test Harness - simulation and end-to-end validation
//!
//! This crate provides:
//! - Virtual-time tick simulation with a redraw cost model
//! - Drift measurement between displayed and wall time
//! - A rig wiring engines to recording sinks
//! - End-to-end scenarios and property tests

pub mod rig;
pub mod simulator;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

pub use rig::*;
pub use simulator::*;
