//! This module implements [`Comparand`], the bridge between the comparison
//! methods on `GlobalDateTime` and the various shapes a "other point in
//! time" argument can take.

use std::time::SystemTime;

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::error::{GlobalDateTimeError, GlobalResult};
use crate::global_datetime::truncated;
use crate::options::Precision;
use crate::GlobalDateTime;

/// A point in time that a `GlobalDateTime` can be compared against.
///
/// Every comparison reduces to comparing epoch-millisecond counts; an
/// implementation derives that count from the argument, projecting
/// zone-aware values into the caller's reference zone and truncating them to
/// the caller's precision first. Zone-less inputs (raw epoch counts,
/// [`SystemTime`]) are used as-is.
pub trait Comparand {
    /// Returns the normalized epoch-millisecond count of this value.
    fn comparable_epoch_millis(
        &self,
        reference_zone: &TimeZone,
        precision: Precision,
    ) -> GlobalResult<i64>;
}

impl Comparand for i64 {
    fn comparable_epoch_millis(
        &self,
        _reference_zone: &TimeZone,
        _precision: Precision,
    ) -> GlobalResult<i64> {
        Ok(*self)
    }
}

impl Comparand for SystemTime {
    fn comparable_epoch_millis(
        &self,
        _reference_zone: &TimeZone,
        _precision: Precision,
    ) -> GlobalResult<i64> {
        let timestamp = Timestamp::try_from(*self).map_err(|err| {
            GlobalDateTimeError::range()
                .with_message(format!("system time is outside the supported range: {err}"))
        })?;
        Ok(timestamp.as_millisecond())
    }
}

impl Comparand for Zoned {
    fn comparable_epoch_millis(
        &self,
        reference_zone: &TimeZone,
        precision: Precision,
    ) -> GlobalResult<i64> {
        let projected = truncated(&self.with_time_zone(reference_zone.clone()), precision);
        Ok(projected.timestamp().as_millisecond())
    }
}

impl Comparand for GlobalDateTime {
    fn comparable_epoch_millis(
        &self,
        _reference_zone: &TimeZone,
        _precision: Precision,
    ) -> GlobalResult<i64> {
        Ok(self.epoch_millis())
    }
}

impl Comparand for str {
    fn comparable_epoch_millis(
        &self,
        reference_zone: &TimeZone,
        precision: Precision,
    ) -> GlobalResult<i64> {
        let zoned: Zoned = self.parse().map_err(|err| {
            GlobalDateTimeError::invalid_timestamp()
                .with_message(format!("could not parse {self:?}: {err}"))
        })?;
        zoned.comparable_epoch_millis(reference_zone, precision)
    }
}

impl<C> Comparand for &C
where
    C: Comparand + ?Sized,
{
    fn comparable_epoch_millis(
        &self,
        reference_zone: &TimeZone,
        precision: Precision,
    ) -> GlobalResult<i64> {
        (**self).comparable_epoch_millis(reference_zone, precision)
    }
}
