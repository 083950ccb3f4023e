//! This module implements the error types for this crate.

use core::fmt;
use std::borrow::Cow;

/// The distinguishable failure kinds surfaced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A supplied zone identifier could not be resolved by the zone
    /// database.
    InvalidZone,
    /// A supplied string does not conform to the zoned-timestamp grammar.
    InvalidTimestamp,
    /// A value was outside the supported range (epoch counts or arithmetic
    /// amounts beyond what the calendar backend can represent).
    Range,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZone => "invalid zone",
            Self::InvalidTimestamp => "invalid timestamp string",
            Self::Range => "value out of range",
        }
        .fmt(f)
    }
}

/// The error type produced by fallible `GlobalDateTime` operations.
///
/// Errors carry a [`ErrorKind`] for programmatic handling and a best-effort
/// human readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDateTimeError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl GlobalDateTimeError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates an invalid-zone error.
    #[inline]
    #[must_use]
    pub const fn invalid_zone() -> Self {
        Self::new(ErrorKind::InvalidZone)
    }

    /// Creates an invalid-timestamp-string error.
    #[inline]
    #[must_use]
    pub const fn invalid_timestamp() -> Self {
        Self::new(ErrorKind::InvalidTimestamp)
    }

    /// Creates a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Attaches a message to this error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message attached to this error, which may be empty.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for GlobalDateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for GlobalDateTimeError {}

/// Alias for a `Result` with a [`GlobalDateTimeError`].
pub type GlobalResult<T> = Result<T, GlobalDateTimeError>;

#[cfg(test)]
mod tests {
    use super::{ErrorKind, GlobalDateTimeError};

    #[test]
    fn display_includes_kind_and_message() {
        let err = GlobalDateTimeError::invalid_zone().with_message("Mars/Olympus is unknown");
        assert_eq!(err.kind(), ErrorKind::InvalidZone);
        assert_eq!(err.to_string(), "invalid zone: Mars/Olympus is unknown");

        let bare = GlobalDateTimeError::range();
        assert_eq!(bare.to_string(), "value out of range");
        assert_eq!(bare.message(), "");
    }
}
