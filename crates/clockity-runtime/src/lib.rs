//! Clockity Runtime - scheduling and the application facade
//!
//! This crate provides:
//! - Ticker: drives one engine on a cancellable tokio interval
//! - ClockApp: owns both engines, keeps only the active one live
//! - Logging bootstrap for hosts that do not install their own subscriber

pub mod app;
pub mod logging;
pub mod ticker;

pub use app::*;
pub use logging::*;
pub use ticker::*;
