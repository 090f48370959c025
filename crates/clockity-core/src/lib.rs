//! Clockity Core - Fundamental types and primitives
//!
//! This crate defines the pieces shared by both timer engines:
//! - TimeCode arithmetic (hours:minutes:seconds.deciseconds)
//! - Digit-entry parsing and overflow normalization
//! - Display and signal sink interfaces
//! - The tick contract driven by the runtime
//! - Timer configuration and the error type

pub mod config;
pub mod error;
pub mod recording;
pub mod sink;
pub mod tick;
pub mod timecode;

pub use config::*;
pub use error::*;
pub use recording::*;
pub use sink::*;
pub use tick::*;
pub use timecode::*;
