//! This module implements `GlobalDateTime` and its normalization model.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::time::SystemTime;

use jiff::tz::TimeZone;
use jiff::{RoundMode, Span, Timestamp, Unit, Zoned, ZonedRound};

use crate::comparand::Comparand;
use crate::error::{GlobalDateTimeError, GlobalResult};
use crate::options::Precision;
use crate::DEFAULT_REFERENCE_ZONE;


/// A date-time value normalized into a configurable reference zone.
///
/// A `GlobalDateTime` holds two zoned timestamps for the same input: the
/// *original* one, exactly as supplied at construction and keeping its own
/// originating zone, and the *current* working one, re-projected into the
/// reference zone and truncated to the active precision. Arithmetic and
/// formatting operate on the working value; the original is retained so the
/// working value can be rebased at any point via
/// [`reset_to_original`](Self::reset_to_original) or a reference-zone
/// change.
///
/// Values start out referenced to [`DEFAULT_REFERENCE_ZONE`] and truncated
/// to the [`Precision`] chosen at construction.
#[derive(Debug, Clone)]
pub struct GlobalDateTime {
    original: Zoned,
    current: Zoned,
    reference_zone: TimeZone,
    precision: Precision,
    default_precision: Precision,
}

// ==== Construction ====

impl GlobalDateTime {
    /// Creates a `GlobalDateTime` from the wall clock, read in the
    /// platform's local zone.
    pub fn now(precision: Precision) -> GlobalResult<Self> {
        Self::from_zoned(Zoned::now(), precision)
    }

    /// Creates a `GlobalDateTime` from a zoned timestamp carrying its own
    /// zone.
    pub fn from_zoned(zoned: Zoned, precision: Precision) -> GlobalResult<Self> {
        Self::from_parts(zoned, precision)
    }

    /// Creates a `GlobalDateTime` from another one's *original* value.
    ///
    /// Any arithmetic applied to `other` since construction is discarded;
    /// this is a structural copy back to the source's original value.
    pub fn from_original(other: &GlobalDateTime, precision: Precision) -> GlobalResult<Self> {
        Self::from_parts(other.original.clone(), precision)
    }

    /// Creates a `GlobalDateTime` from an RFC 9557 zoned-timestamp string
    /// such as `2017-08-20T14:20:18.811-05:00[America/Chicago]`.
    ///
    /// Fails with an invalid-timestamp error if the text does not conform
    /// to the grammar.
    pub fn parse(text: &str, precision: Precision) -> GlobalResult<Self> {
        let zoned: Zoned = text.parse().map_err(|err| {
            GlobalDateTimeError::invalid_timestamp()
                .with_message(format!("could not parse {text:?}: {err}"))
        })?;
        Self::from_parts(zoned, precision)
    }

    /// Creates a `GlobalDateTime` from a zone-less count of milliseconds
    /// since the Unix epoch, interpreted as already being in the reference
    /// zone.
    pub fn from_epoch_millis(millis: i64, precision: Precision) -> GlobalResult<Self> {
        let reference_zone = default_reference_zone()?;
        let timestamp = Timestamp::from_millisecond(millis).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("epoch millisecond count {millis} is out of range: {err}"))
        })?;
        Self::from_parts(timestamp.to_zoned(reference_zone), precision)
    }

    /// Creates a `GlobalDateTime` from a zone-less platform timestamp,
    /// interpreted as already being in the reference zone.
    pub fn from_system_time(time: SystemTime, precision: Precision) -> GlobalResult<Self> {
        let reference_zone = default_reference_zone()?;
        let timestamp = Timestamp::try_from(time).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("system time is outside the supported range: {err}"))
        })?;
        Self::from_parts(timestamp.to_zoned(reference_zone), precision)
    }

    fn from_parts(zoned: Zoned, precision: Precision) -> GlobalResult<Self> {
        let reference_zone = default_reference_zone()?;
        let original = truncated(&zoned, precision);
        let current = truncated(&original.with_time_zone(reference_zone.clone()), precision);
        Ok(Self {
            original,
            current,
            reference_zone,
            precision,
            default_precision: precision,
        })
    }
}

// ==== Accessors ====

impl GlobalDateTime {
    /// Returns the working value projected into the reference zone and
    /// truncated to the active precision.
    ///
    /// Idempotent; does not mutate the value.
    #[must_use]
    pub fn normalized(&self) -> Zoned {
        truncated(
            &self.current.with_time_zone(self.reference_zone.clone()),
            self.precision,
        )
    }

    /// Returns the original value in **its own originating zone**, truncated
    /// to the active precision.
    ///
    /// Unlike [`normalized`](Self::normalized) this does not project into
    /// the reference zone; it reveals the source-zone view of the value that
    /// was supplied at construction. Inputs that carried no zone of their
    /// own (epoch counts, platform timestamps) were given the reference zone
    /// at construction and report it here.
    #[must_use]
    pub fn original(&self) -> Zoned {
        truncated(&self.original, self.precision)
    }

    /// Returns the reference zone currently in use.
    #[inline]
    #[must_use]
    pub fn reference_zone(&self) -> &TimeZone {
        &self.reference_zone
    }

    /// Returns the active truncation precision.
    #[inline]
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the default precision this value was constructed with.
    #[inline]
    #[must_use]
    pub fn default_precision(&self) -> Precision {
        self.default_precision
    }

    /// Returns the epoch-millisecond count of the working value.
    #[inline]
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.current.timestamp().as_millisecond()
    }

    /// Returns the canonical RFC 9557 text of the working value, e.g.
    /// `2017-08-20T21:20:18.811+02:00[Europe/Madrid]`.
    #[must_use]
    pub fn to_normalized_string(&self) -> String {
        self.current.to_string()
    }

    /// Returns the working value formatted for a SQL `DATETIME` column:
    /// `year-month-day hour:minute:second.microseconds`.
    ///
    /// Numeric fields are **not** zero padded, so April 6th 09:05:03.022034
    /// renders as `"2015-4-6 9:5:3.22034"`. Consumers relying on this format
    /// expect the bare concatenation and it is kept as-is.
    #[must_use]
    pub fn to_database_string(&self) -> String {
        let micros = self.current.subsec_nanosecond() / 1_000;
        format!(
            "{}-{}-{} {}:{}:{}.{}",
            self.current.year(),
            self.current.month(),
            self.current.day(),
            self.current.hour(),
            self.current.minute(),
            self.current.second(),
            micros
        )
    }

    /// Returns a new `GlobalDateTime` built from the working value,
    /// arithmetic included; the snapshot becomes the copy's own original.
    ///
    /// Returns `None` only if reconstruction from an already-valid value
    /// fails, which indicates a broken default-zone configuration.
    #[must_use]
    pub fn copy_with_current_state(&self) -> Option<Self> {
        match Self::from_parts(self.current.clone(), self.default_precision) {
            Ok(copy) => Some(copy),
            Err(_err) => {
                debug_assert!(false, "copying a valid GlobalDateTime cannot fail");
                #[cfg(feature = "log")]
                log::warn!("could not copy a valid GlobalDateTime: {_err}");
                None
            }
        }
    }

    /// Returns a new `GlobalDateTime` built from the original value,
    /// discarding any arithmetic applied to this one.
    #[must_use]
    pub fn copy_from_original(&self) -> Option<Self> {
        match Self::from_original(self, self.default_precision) {
            Ok(copy) => Some(copy),
            Err(_err) => {
                debug_assert!(false, "copying a valid GlobalDateTime cannot fail");
                #[cfg(feature = "log")]
                log::warn!("could not copy a valid GlobalDateTime: {_err}");
                None
            }
        }
    }
}

// ==== Mutation ====

impl GlobalDateTime {
    /// Advances the working value by the given amount of a calendar or
    /// clock unit, then re-truncates.
    ///
    /// Calendar units (years, months, weeks) are added with the backend's
    /// zone-aware rules, e.g. month-end clamping. Fails with a range error
    /// if the amount or the resulting instant is unrepresentable.
    pub fn increase(&mut self, amount: i64, unit: Unit) -> GlobalResult<()> {
        let span = span_for(amount, unit)?;
        let advanced = self.current.checked_add(span).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("could not add {amount} {unit:?}(s): {err}"))
        })?;
        self.current = truncated(&advanced, self.precision);
        Ok(())
    }

    /// Moves the working value back by the given amount of a calendar or
    /// clock unit, then re-truncates.
    pub fn decrease(&mut self, amount: i64, unit: Unit) -> GlobalResult<()> {
        let span = span_for(amount, unit)?;
        let moved_back = self.current.checked_sub(span).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("could not subtract {amount} {unit:?}(s): {err}"))
        })?;
        self.current = truncated(&moved_back, self.precision);
        Ok(())
    }

    /// Recomputes the working value from the original one under the current
    /// reference zone and precision, undoing every prior
    /// [`increase`](Self::increase)/[`decrease`](Self::decrease).
    pub fn reset_to_original(&mut self) {
        self.current = truncated(
            &self.original.with_time_zone(self.reference_zone.clone()),
            self.precision,
        );
    }

    /// Validates `zone_id` against the zone database and makes it the new
    /// reference zone.
    ///
    /// On success the working value is recomputed from the original, so a
    /// zone change also discards any prior arithmetic. On failure the value
    /// is left untouched.
    pub fn change_reference_zone(&mut self, zone_id: &str) -> GlobalResult<()> {
        let zone = TimeZone::get(zone_id).map_err(|err| {
            GlobalDateTimeError::invalid_zone()
                .with_message(format!("{zone_id:?} is not a valid zone identifier: {err}"))
        })?;
        self.set_reference_zone(zone);
        Ok(())
    }

    /// Makes an already-resolved zone the new reference zone.
    ///
    /// Like [`change_reference_zone`](Self::change_reference_zone), the
    /// working value is recomputed from the original, discarding arithmetic.
    pub fn set_reference_zone(&mut self, zone: TimeZone) {
        self.reference_zone = zone;
        self.reset_to_original();
    }

    /// Resets the reference zone to [`DEFAULT_REFERENCE_ZONE`].
    ///
    /// The default identifier always resolves; a failure here indicates a
    /// broken zone database and is reported through `debug_assert`/logging
    /// rather than surfaced.
    pub fn reset_reference_zone_to_default(&mut self) {
        if let Err(_err) = self.change_reference_zone(DEFAULT_REFERENCE_ZONE) {
            debug_assert!(false, "the default reference zone must resolve");
            #[cfg(feature = "log")]
            log::warn!("could not reset to the default reference zone: {_err}");
        }
    }

    /// Resets the truncation precision.
    ///
    /// The requested unit is currently ignored: the precision always snaps
    /// back to the default this value was constructed with, the original
    /// value is re-truncated, and the working value is recomputed from it
    /// (discarding arithmetic).
    // TODO: honor `_unit` instead of snapping to the construction default;
    // needs sign-off from consumers relying on the reset behavior.
    pub fn change_precision(&mut self, _unit: Unit) {
        self.precision = self.default_precision;
        self.original = truncated(&self.original, self.precision);
        self.reset_to_original();
    }

    /// Resets the truncation precision to the construction default.
    pub fn reset_precision_to_default(&mut self) {
        self.change_precision(self.default_precision.unit());
    }
}

// ==== Comparison ====

impl GlobalDateTime {
    /// Checks whether this value and `other` denote the same instant.
    ///
    /// Zone-aware comparands are projected into the reference zone and
    /// truncated to the active precision before their epoch counts are
    /// compared, so two representations of one instant in different zones
    /// are equal. String comparands fail with an invalid-timestamp error if
    /// they do not parse.
    pub fn is_equal_to<C: Comparand>(&self, other: C) -> GlobalResult<bool> {
        let other_millis = other.comparable_epoch_millis(&self.reference_zone, self.precision)?;
        Ok(self.epoch_millis() == other_millis)
    }

    /// Checks whether this value denotes an earlier instant than `other`.
    pub fn is_before<C: Comparand>(&self, other: C) -> GlobalResult<bool> {
        let other_millis = other.comparable_epoch_millis(&self.reference_zone, self.precision)?;
        Ok(self.epoch_millis() < other_millis)
    }

    /// Checks whether this value denotes a later instant than `other`.
    pub fn is_after<C: Comparand>(&self, other: C) -> GlobalResult<bool> {
        let other_millis = other.comparable_epoch_millis(&self.reference_zone, self.precision)?;
        Ok(self.epoch_millis() > other_millis)
    }
}

// ==== Temporal predicates ====

impl GlobalDateTime {
    /// Checks whether the working value lies in the past.
    #[must_use]
    pub fn has_already_happened(&self) -> bool {
        self.epoch_millis() < self.reference_now_millis()
    }

    /// Checks whether the working value lies more than `amount` units in
    /// the past.
    pub fn has_happened_since_more_than(&self, amount: i64, unit: Unit) -> GlobalResult<bool> {
        let boundary = self.reference_now_shifted_millis(-amount, unit)?;
        Ok(self.epoch_millis() < boundary)
    }

    /// Checks whether the working value lies in the past but within the
    /// last `amount` units.
    ///
    /// Unlike [`has_happened_since_more_than`](Self::has_happened_since_more_than)
    /// this guards on which side of "now" the value falls: future values
    /// are never within the window.
    pub fn has_happened_since_less_than(&self, amount: i64, unit: Unit) -> GlobalResult<bool> {
        let now = self.reference_now_millis();
        let boundary = self.reference_now_shifted_millis(-amount, unit)?;
        Ok(self.epoch_millis() < now && self.epoch_millis() >= boundary)
    }

    /// Checks whether the working value lies in the future and within the
    /// next `amount` units.
    pub fn is_going_to_happen_in_less_than(&self, amount: i64, unit: Unit) -> GlobalResult<bool> {
        let now = self.reference_now_millis();
        let boundary = self.reference_now_shifted_millis(amount, unit)?;
        Ok(self.epoch_millis() > now && self.epoch_millis() < boundary)
    }

    /// Checks whether the working value lies before "now plus `amount`
    /// units".
    ///
    /// This is the unguarded sibling of
    /// [`is_going_to_happen_in_less_than`](Self::is_going_to_happen_in_less_than):
    /// it holds for every past instant as well, since those trivially
    /// precede the boundary. Both flavors are kept because callers depend on
    /// each.
    pub fn is_coming_in_less_than(&self, amount: i64, unit: Unit) -> GlobalResult<bool> {
        let boundary = self.reference_now_shifted_millis(amount, unit)?;
        Ok(self.epoch_millis() < boundary)
    }

    fn reference_now_millis(&self) -> i64 {
        let now = Zoned::now().with_time_zone(self.reference_zone.clone());
        truncated(&now, self.precision).timestamp().as_millisecond()
    }

    fn reference_now_shifted_millis(&self, amount: i64, unit: Unit) -> GlobalResult<i64> {
        let span = span_for(amount, unit)?;
        let now = Zoned::now().with_time_zone(self.reference_zone.clone());
        let shifted = now.checked_add(span).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("could not shift the clock by {amount} {unit:?}(s): {err}"))
        })?;
        Ok(truncated(&shifted, self.precision)
            .timestamp()
            .as_millisecond())
    }
}

// ==== Trait impls ====

impl PartialEq for GlobalDateTime {
    /// Two values are equal iff the epoch-millisecond counts of their
    /// truncated working values are equal, irrespective of either value's
    /// reference zone or precision configuration.
    fn eq(&self, other: &Self) -> bool {
        self.epoch_millis() == other.epoch_millis()
    }
}

impl Eq for GlobalDateTime {}

impl PartialOrd for GlobalDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GlobalDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_millis().cmp(&other.epoch_millis())
    }
}

impl FromStr for GlobalDateTime {
    type Err = GlobalDateTimeError;

    /// Parses with the default (millisecond) precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Precision::default())
    }
}

impl fmt::Display for GlobalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.current.fmt(f)
    }
}

// ==== Internal helpers ====

/// Resolves the built-in default reference zone.
pub(crate) fn default_reference_zone() -> GlobalResult<TimeZone> {
    TimeZone::get(DEFAULT_REFERENCE_ZONE).map_err(|err| {
        GlobalDateTimeError::invalid_zone().with_message(format!(
            "the default reference zone {DEFAULT_REFERENCE_ZONE:?} did not resolve: {err}"
        ))
    })
}

/// Truncates a zoned value to the given precision, discarding sub-precision
/// components.
///
/// Truncation to millisecond or nanosecond granularity cannot fail for any
/// representable value; a failure is an internal-invariant violation and
/// falls back to the untruncated value.
pub(crate) fn truncated(value: &Zoned, precision: Precision) -> Zoned {
    let options = ZonedRound::new()
        .smallest(precision.unit())
        .mode(RoundMode::Trunc);
    match value.round(options) {
        Ok(rounded) => rounded,
        Err(_err) => {
            debug_assert!(false, "sub-second truncation cannot fail");
            #[cfg(feature = "log")]
            log::warn!("truncation failed on a valid datetime: {_err}");
            value.clone()
        }
    }
}

/// Builds a span of `amount` units, rejecting amounts beyond what the
/// calendar backend can represent.
fn span_for(amount: i64, unit: Unit) -> GlobalResult<Span> {
    let span = match unit {
        Unit::Year => Span::new().try_years(amount),
        Unit::Month => Span::new().try_months(amount),
        Unit::Week => Span::new().try_weeks(amount),
        Unit::Day => Span::new().try_days(amount),
        Unit::Hour => Span::new().try_hours(amount),
        Unit::Minute => Span::new().try_minutes(amount),
        Unit::Second => Span::new().try_seconds(amount),
        Unit::Millisecond => Span::new().try_milliseconds(amount),
        Unit::Microsecond => Span::new().try_microseconds(amount),
        Unit::Nanosecond => Span::new().try_nanoseconds(amount),
    };
    span.map_err(|err| {
        GlobalDateTimeError::range()
            .with_message(format!("{amount} is out of range for {unit:?}(s): {err}"))
    })
}
