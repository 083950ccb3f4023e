//! Option types controlling how a `GlobalDateTime` truncates its values.

use core::fmt;
use core::str::FromStr;

use jiff::Unit;

/// The truncation precision applied to a `GlobalDateTime`.
///
/// Any sub-precision component of a stored value is discarded: truncating to
/// milliseconds zeroes out the microsecond and nanosecond remainders, while
/// nanosecond precision keeps values untouched. The precision chosen at
/// construction also acts as the value's fixed default, which precision
/// resets snap back to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Truncate to whole milliseconds.
    #[default]
    Millisecond,
    /// Keep full nanosecond resolution.
    Nanosecond,
}

impl Precision {
    /// Returns the calendar unit this precision truncates to.
    #[inline]
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Millisecond => Unit::Millisecond,
            Self::Nanosecond => Unit::Nanosecond,
        }
    }
}

/// A parsing error for `Precision`.
#[derive(Debug, Clone, Copy)]
pub struct ParsePrecisionError;

impl fmt::Display for ParsePrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Precision")
    }
}

impl std::error::Error for ParsePrecisionError {}

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "nanosecond" | "nanoseconds" => Ok(Self::Nanosecond),
            _ => Err(ParsePrecisionError),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millisecond => "millisecond",
            Self::Nanosecond => "nanosecond",
        }
        .fmt(f)
    }
}
