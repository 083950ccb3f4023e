//! The `global-datetime` crate provides a small value object for handling
//! date-times in an international context: whatever shape an input instant
//! arrives in (a wall-clock read, an RFC 9557 string, an epoch-millisecond
//! count, a zone-less platform timestamp), it is normalized into a single
//! configurable *reference* time zone and truncation precision so that
//! values originating in different zones can be compared, shifted, and
//! formatted consistently.
//!
//! The original value supplied at construction is retained, in its own
//! originating zone, so that any arithmetic applied to the working value can
//! be undone with [`GlobalDateTime::reset_to_original`].
//!
//! ```rust
//! use global_datetime::{GlobalDateTime, Precision, Unit};
//!
//! let mut meeting = GlobalDateTime::parse(
//!     "2017-08-20T14:20:18.811-05:00[America/Chicago]",
//!     Precision::Millisecond,
//! )?;
//!
//! // The instant is zone-independent.
//! assert_eq!(meeting.epoch_millis(), 1_503_256_818_811);
//!
//! // 14:20 in Chicago is 21:20 in Madrid during August.
//! meeting.change_reference_zone("Europe/Madrid")?;
//! assert_eq!(meeting.normalized().hour(), 21);
//!
//! // Arithmetic applies to the working value only and is reversible.
//! meeting.increase(4, Unit::Minute)?;
//! assert_eq!(meeting.epoch_millis(), 1_503_256_818_811 + 240_000);
//! meeting.reset_to_original();
//! assert_eq!(meeting.epoch_millis(), 1_503_256_818_811);
//! # Ok::<(), global_datetime::GlobalDateTimeError>(())
//! ```
//!
//! Calendar and zone-database behavior (DST transition tables, month-end
//! clamping during calendar arithmetic, the zoned-timestamp text grammar) is
//! delegated to [`jiff`], whose core types are re-exported here for
//! convenience.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

pub mod comparand;
pub mod error;
pub mod options;

mod global_datetime;

pub use comparand::Comparand;
pub use error::{ErrorKind, GlobalDateTimeError, GlobalResult};
pub use global_datetime::GlobalDateTime;
pub use options::Precision;

/// Re-export of the zone handle used for reference zones.
pub use jiff::tz::TimeZone;
/// Re-export of the calendar/clock unit set accepted by arithmetic and the
/// temporal predicates.
pub use jiff::Unit;
/// Re-export of the zoned timestamp value produced by the accessors.
pub use jiff::Zoned;

/// The reference zone identifier every value starts out with.
///
/// Constructors and [`GlobalDateTime::reset_reference_zone_to_default`]
/// resolve this identifier through the zone database; it can be replaced per
/// instance with [`GlobalDateTime::change_reference_zone`].
pub const DEFAULT_REFERENCE_ZONE: &str = "Europe/Madrid";
