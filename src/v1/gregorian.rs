//! Gregorian timestamps of UUIDv1

use std::{fmt, time};

use crate::{error::RangeError, source::TimeSource};

/// The number of 100-nanosecond intervals from 1582-10-15T00:00:00Z to the Unix epoch.
const GREGORIAN_TO_UNIX_OFFSET: i128 = 122_192_928_000_000_000;

/// The number of 100-nanosecond intervals in one second.
const SECOND_INTERVALS: i128 = 10_000_000;

const MAX_TICKS: u64 = (1 << 60) - 1;

/// Represents a 60-bit count of 100-nanosecond intervals since the Gregorian calendar reform
/// (1582-10-15T00:00:00Z), which is the timestamp field of a UUIDv1.
///
/// Conversions to and from calendar time are computed on 128-bit integers, so no precision is
/// lost other than the truncation to 100-nanosecond resolution.
///
/// # Examples
///
/// ```rust
/// use rfc4122::v1::GregorianTime;
///
/// let t = GregorianTime::from_calendar(1693426201, 201233)?;
/// assert_eq!(t.ticks(), 139127190012012330);
/// assert_eq!(t.to_calendar(), (1693426201, 201233));
/// # Ok::<(), rfc4122::RangeError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct GregorianTime(u64);

impl GregorianTime {
    /// Creates a timestamp from a raw tick count.
    pub const fn from_ticks(ticks: u64) -> Result<Self, RangeError> {
        if ticks > MAX_TICKS {
            Err(RangeError {
                what: "Gregorian timestamp",
                value: ticks as i128,
            })
        } else {
            Ok(Self(ticks))
        }
    }

    /// Creates a timestamp from 8 big-endian bytes, discarding bits above the 60th.
    pub(crate) const fn from_be_bytes_truncated(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes) & MAX_TICKS)
    }

    /// Creates a timestamp from seconds and microseconds since the Unix epoch.
    ///
    /// Fails if `microseconds` is not less than one million.
    pub fn from_calendar(seconds: i64, microseconds: u32) -> Result<Self, RangeError> {
        if microseconds >= 1_000_000 {
            return Err(RangeError {
                what: "microseconds",
                value: microseconds as i128,
            });
        }
        Self::from_unix_ticks(
            seconds as i128 * SECOND_INTERVALS + microseconds as i128 * 10,
        )
    }

    /// Creates a timestamp from seconds and nanoseconds since the Unix epoch.
    ///
    /// Nanoseconds are truncated to 100-nanosecond resolution.
    pub fn from_unix(seconds: i64, nanoseconds: u32) -> Result<Self, RangeError> {
        Self::from_unix_ticks(
            seconds as i128 * SECOND_INTERVALS + nanoseconds as i128 / 100,
        )
    }

    /// Creates a timestamp from a [`SystemTime`](time::SystemTime).
    ///
    /// Like [`from_unix`](Self::from_unix), the instant is rounded down to 100-nanosecond
    /// resolution, including before the Unix epoch.
    pub fn from_system_time(src: time::SystemTime) -> Result<Self, RangeError> {
        let ticks = match src.duration_since(time::UNIX_EPOCH) {
            Ok(d) => d.as_nanos() as i128 / 100,
            Err(err) => (-(err.duration().as_nanos() as i128)).div_euclid(100),
        };
        Self::from_unix_ticks(ticks)
    }

    fn from_unix_ticks(ticks: i128) -> Result<Self, RangeError> {
        let value = ticks + GREGORIAN_TO_UNIX_OFFSET;
        match u64::try_from(value) {
            Ok(ticks) if ticks <= MAX_TICKS => Ok(Self(ticks)),
            _ => Err(RangeError {
                what: "Gregorian timestamp",
                value,
            }),
        }
    }

    /// Reads the current time from `clock`.
    ///
    /// # Panics
    ///
    /// Panics if the clock reports a time before 1582-10-15 or after the year 5236.
    pub fn now<T: TimeSource + ?Sized>(clock: &mut T) -> Self {
        let (seconds, nanoseconds) = clock.unix_time();
        Self::from_unix(seconds, nanoseconds).expect("clock out of range of Gregorian timestamp")
    }

    /// Returns the number of 100-nanosecond intervals since 1582-10-15T00:00:00Z.
    pub const fn ticks(&self) -> u64 {
        self.0
    }

    /// Returns the tick count as 8 big-endian bytes, of which the top 4 bits are always zero.
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Returns seconds and microseconds since the Unix epoch.
    ///
    /// The fraction below one microsecond is dropped.
    pub fn to_calendar(&self) -> (i64, u32) {
        let (seconds, remainder) = self.to_unix_parts();
        (seconds, (remainder / 10) as u32)
    }

    /// Returns seconds and nanoseconds since the Unix epoch; nanoseconds are always a multiple
    /// of 100.
    pub fn to_unix(&self) -> (i64, u32) {
        let (seconds, remainder) = self.to_unix_parts();
        (seconds, (remainder * 100) as u32)
    }

    /// Returns the timestamp as a [`SystemTime`](time::SystemTime).
    pub fn to_system_time(&self) -> time::SystemTime {
        let ticks = self.0 as i128 - GREGORIAN_TO_UNIX_OFFSET;
        let abs = ticks.unsigned_abs();
        let d = time::Duration::new(
            (abs / SECOND_INTERVALS as u128) as u64,
            (abs % SECOND_INTERVALS as u128 * 100) as u32,
        );
        if ticks < 0 {
            time::UNIX_EPOCH - d
        } else {
            time::UNIX_EPOCH + d
        }
    }

    fn to_unix_parts(&self) -> (i64, i128) {
        let ticks = self.0 as i128 - GREGORIAN_TO_UNIX_OFFSET;
        (
            ticks.div_euclid(SECOND_INTERVALS) as i64,
            ticks.rem_euclid(SECOND_INTERVALS),
        )
    }
}

impl fmt::Display for GregorianTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
