//! Error types for the Clockity timer engines

use thiserror::Error;

/// Core Clockity errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    // Phase errors
    #[error("Invalid phase transition: {operation} while {phase}")]
    InvalidPhaseTransition {
        operation: &'static str,
        phase: &'static str,
    },

    // Arithmetic errors
    #[error("Arithmetic underflow: cannot decrement below 00:00:00.0")]
    ArithmeticUnderflow,

    #[error("Invalid time code: {hours}:{minutes}:{seconds}.{deciseconds}")]
    InvalidTimeCode {
        hours: u32,
        minutes: u8,
        seconds: u8,
        deciseconds: u8,
    },

    // Digit entry errors
    #[error("Digit buffer full: at most {capacity} digits")]
    BufferOverflow { capacity: usize },

    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),

    #[error("Leading zero rejected")]
    LeadingZero,

    #[error("Invalid digit string: {0:?}")]
    InvalidDigits(String),

    #[error("Nothing entered")]
    EmptyEntry,

    // Runtime errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for Clockity operations
pub type ClockResult<T> = Result<T, ClockError>;
