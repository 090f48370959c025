//! TimeCode primitives for Clockity
//!
//! A TimeCode is a normalized `hours:minutes:seconds.deciseconds` value.
//! Every public operation leaves the fields in range:
//! - `0 <= deciseconds <= 9`
//! - `0 <= seconds <= 59`
//! - `0 <= minutes <= 59`
//! - `hours` unbounded (ceilings are enforced by the engines)

use std::fmt;
use std::ops::{Add, Sub};

use crate::{ClockError, ClockResult};

pub const DECISECONDS_PER_SECOND: u8 = 10;
pub const SECONDS_PER_MINUTE: u8 = 60;
pub const MINUTES_PER_HOUR: u8 = 60;

const DECISECONDS_PER_MINUTE: u64 = 600;
const DECISECONDS_PER_HOUR: u64 = 36_000;

/// Longest digit string accepted by [`TimeCode::parse_digits`]
pub const MAX_ENTRY_DIGITS: usize = 6;

/// Hours at or above this need a wide display (three or more digits)
const WIDE_HOURS: u32 = 100;

/// Layout hint for the countdown readout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WidthHint {
    /// `HH:MM:SS.D`
    #[default]
    Standard,
    /// `HHH:MM:SS.D` or longer; presentation should shrink the font
    Wide,
}

/// Normalized hours:minutes:seconds.deciseconds
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeCode {
    hours: u32,
    minutes: u8,
    seconds: u8,
    deciseconds: u8,
}

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode::from_parts(0, 0, 0, 0);

    /// Default stopwatch ceiling (99:59:59.9)
    pub const STOPWATCH_CEILING: TimeCode = TimeCode::from_parts(99, 59, 59, 9);

    const fn from_parts(hours: u32, minutes: u8, seconds: u8, deciseconds: u8) -> Self {
        TimeCode {
            hours,
            minutes,
            seconds,
            deciseconds,
        }
    }

    /// Create a TimeCode from already-normalized fields
    pub fn new(hours: u32, minutes: u8, seconds: u8, deciseconds: u8) -> ClockResult<Self> {
        if minutes >= MINUTES_PER_HOUR
            || seconds >= SECONDS_PER_MINUTE
            || deciseconds >= DECISECONDS_PER_SECOND
        {
            return Err(ClockError::InvalidTimeCode {
                hours,
                minutes,
                seconds,
                deciseconds,
            });
        }
        Ok(Self::from_parts(hours, minutes, seconds, deciseconds))
    }

    /// Build from a total count of deciseconds.
    /// Hours saturate at `u32::MAX`.
    pub fn from_deciseconds(total: u64) -> Self {
        let hours = u32::try_from(total / DECISECONDS_PER_HOUR).unwrap_or(u32::MAX);
        let rest = total % DECISECONDS_PER_HOUR;
        TimeCode::from_parts(
            hours,
            (rest / DECISECONDS_PER_MINUTE) as u8,
            ((rest % DECISECONDS_PER_MINUTE) / DECISECONDS_PER_SECOND as u64) as u8,
            (rest % DECISECONDS_PER_SECOND as u64) as u8,
        )
    }

    #[inline]
    pub fn as_deciseconds(self) -> u64 {
        self.hours as u64 * DECISECONDS_PER_HOUR
            + self.minutes as u64 * DECISECONDS_PER_MINUTE
            + self.seconds as u64 * DECISECONDS_PER_SECOND as u64
            + self.deciseconds as u64
    }

    #[inline]
    pub fn hours(self) -> u32 {
        self.hours
    }

    #[inline]
    pub fn minutes(self) -> u8 {
        self.minutes
    }

    #[inline]
    pub fn seconds(self) -> u8 {
        self.seconds
    }

    #[inline]
    pub fn deciseconds(self) -> u8 {
        self.deciseconds
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == TimeCode::ZERO
    }

    /// Add one decisecond, carrying up through seconds, minutes and hours
    pub fn increment(&mut self) {
        self.deciseconds += 1;
        if self.deciseconds < DECISECONDS_PER_SECOND {
            return;
        }
        self.deciseconds = 0;
        self.seconds += 1;
        if self.seconds < SECONDS_PER_MINUTE {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < MINUTES_PER_HOUR {
            return;
        }
        self.minutes = 0;
        self.hours = self.hours.saturating_add(1);
    }

    /// Subtract one decisecond, borrowing down from hours.
    /// Fails without modifying the value when it is already zero.
    pub fn decrement(&mut self) -> ClockResult<()> {
        if self.is_zero() {
            return Err(ClockError::ArithmeticUnderflow);
        }
        if self.deciseconds > 0 {
            self.deciseconds -= 1;
            return Ok(());
        }
        self.deciseconds = DECISECONDS_PER_SECOND - 1;
        if self.seconds > 0 {
            self.seconds -= 1;
            return Ok(());
        }
        self.seconds = SECONDS_PER_MINUTE - 1;
        if self.minutes > 0 {
            self.minutes -= 1;
            return Ok(());
        }
        self.minutes = MINUTES_PER_HOUR - 1;
        // Non-zero with every lower field at zero means hours > 0
        self.hours -= 1;
        Ok(())
    }

    /// `current - previous`, borrowing decisecond -> second -> minute -> hour.
    /// Lap splits are monotonic, so `current >= previous` is a precondition.
    pub fn difference(current: TimeCode, previous: TimeCode) -> TimeCode {
        debug_assert!(
            current >= previous,
            "difference requires current >= previous ({current} < {previous})"
        );

        let (deciseconds, borrow) = borrow_sub(
            current.deciseconds,
            previous.deciseconds,
            0,
            DECISECONDS_PER_SECOND,
        );
        let (seconds, borrow) =
            borrow_sub(current.seconds, previous.seconds, borrow, SECONDS_PER_MINUTE);
        let (minutes, borrow) =
            borrow_sub(current.minutes, previous.minutes, borrow, MINUTES_PER_HOUR);
        let hours = current
            .hours
            .saturating_sub(previous.hours)
            .saturating_sub(borrow as u32);

        TimeCode::from_parts(hours, minutes, seconds, deciseconds)
    }

    /// Right-justify 1 to 6 decimal digits into HH:MM:SS.
    ///
    /// `"5"` becomes `00:00:05`, `"1234"` becomes `00:12:34` and
    /// `"123456"` becomes `12:34:56`. Minutes and seconds may come out
    /// above 59; see [`RawTime::normalize_overflow`].
    pub fn parse_digits(digits: &str) -> ClockResult<RawTime> {
        if digits.is_empty()
            || digits.len() > MAX_ENTRY_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ClockError::InvalidDigits(digits.to_string()));
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| ClockError::InvalidDigits(digits.to_string()))?;

        Ok(RawTime {
            hours: value / 10_000,
            minutes: ((value / 100) % 100) as u8,
            seconds: (value % 100) as u8,
        })
    }

    /// `HH:MM:SS` without the decisecond
    pub fn hms(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    pub fn width_hint(self) -> WidthHint {
        if self.hours >= WIDE_HOURS {
            WidthHint::Wide
        } else {
            WidthHint::Standard
        }
    }
}

/// Subtract one normalized component with an incoming borrow.
/// Returns the component and the borrow owed to the next unit up.
fn borrow_sub(lhs: u8, rhs: u8, borrow: u8, base: u8) -> (u8, u8) {
    let subtrahend = rhs + borrow;
    // Normalized inputs never need more than one unit of borrow
    debug_assert!(
        lhs < base && subtrahend <= base,
        "borrow exceeds one unit: {lhs} - {rhs} - {borrow} (base {base})"
    );
    if lhs >= subtrahend {
        (lhs - subtrahend, 0)
    } else {
        (lhs + base - subtrahend, 1)
    }
}

/// Add one normalized component with an incoming carry
fn carry_add(lhs: u8, rhs: u8, carry: u8, base: u8) -> (u8, u8) {
    let sum = lhs + rhs + carry;
    if sum >= base {
        (sum - base, 1)
    } else {
        (sum, 0)
    }
}

impl Add<TimeCode> for TimeCode {
    type Output = TimeCode;

    fn add(self, rhs: TimeCode) -> Self::Output {
        let (deciseconds, carry) =
            carry_add(self.deciseconds, rhs.deciseconds, 0, DECISECONDS_PER_SECOND);
        let (seconds, carry) = carry_add(self.seconds, rhs.seconds, carry, SECONDS_PER_MINUTE);
        let (minutes, carry) = carry_add(self.minutes, rhs.minutes, carry, MINUTES_PER_HOUR);
        let hours = self
            .hours
            .saturating_add(rhs.hours)
            .saturating_add(carry as u32);
        TimeCode::from_parts(hours, minutes, seconds, deciseconds)
    }
}

impl Sub<TimeCode> for TimeCode {
    type Output = TimeCode;

    #[inline]
    fn sub(self, rhs: TimeCode) -> Self::Output {
        TimeCode::difference(self, rhs)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{}",
            self.hours, self.minutes, self.seconds, self.deciseconds
        )
    }
}

impl fmt::Debug for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeCode({self})")
    }
}

/// Digit entry as typed: HH:MM:SS where minutes and seconds may exceed 59
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RawTime {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
}

impl RawTime {
    /// Fold seconds >= 60 into minutes, then minutes >= 60 into hours.
    /// `00:75:90` becomes `01:16:30`.
    pub fn normalize_overflow(self) -> TimeCode {
        let seconds = self.seconds as u32;
        let minutes = self.minutes as u32 + seconds / SECONDS_PER_MINUTE as u32;
        let hours = self
            .hours
            .saturating_add(minutes / MINUTES_PER_HOUR as u32);

        TimeCode::from_parts(
            hours,
            (minutes % MINUTES_PER_HOUR as u32) as u8,
            (seconds % SECONDS_PER_MINUTE as u32) as u8,
            0,
        )
    }
}

impl From<TimeCode> for RawTime {
    fn from(time: TimeCode) -> Self {
        RawTime {
            hours: time.hours,
            minutes: time.minutes,
            seconds: time.seconds,
        }
    }
}

impl fmt::Display for RawTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
