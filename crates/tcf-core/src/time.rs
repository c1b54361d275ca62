//! Time primitives for TCF
//!
//! Two opaque kinds take part in arithmetic next to plain numbers:
//! - Instant: an absolute point in time, exact to the nanosecond
//! - Duration: an elapsed, calendar-aware span of time
//!
//! Both are immutable; every operation returns a new value.

use std::cmp::Ordering;
use std::fmt;

use jiff::{Span, Timestamp};

use crate::{TcfError, TcfResult};

const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_MICRO: i128 = 1_000;

/// Absolute time point
/// Represented as nanoseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(Timestamp);

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant(Timestamp::UNIX_EPOCH);

    pub fn from_nanoseconds(nanos: i128) -> TcfResult<Self> {
        Ok(Instant(Timestamp::from_nanosecond(nanos)?))
    }

    /// Milliseconds are widened exactly: `millis × 1,000,000`
    pub fn from_milliseconds(millis: i64) -> TcfResult<Self> {
        Instant::from_nanoseconds(millis as i128 * NANOS_PER_MILLI)
    }

    #[inline]
    pub fn from_timestamp(ts: Timestamp) -> Self {
        Instant(ts)
    }

    #[inline]
    pub fn as_nanoseconds(self) -> i128 {
        self.0.as_nanosecond()
    }

    #[inline]
    pub fn as_timestamp(self) -> Timestamp {
        self.0
    }

    pub fn checked_add(self, duration: Duration) -> TcfResult<Instant> {
        Ok(Instant(self.0.checked_add(duration.0)?))
    }

    pub fn checked_sub(self, duration: Duration) -> TcfResult<Instant> {
        Ok(Instant(self.0.checked_sub(duration.0)?))
    }

    /// Signed span elapsed from `earlier` to `self`
    pub fn since(self, earlier: Instant) -> TcfResult<Duration> {
        Ok(Duration(self.0.since(earlier.0)?))
    }

    #[inline]
    pub fn compare(self, other: Instant) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({})", self.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Elapsed span of time
///
/// Equality goes through the span's own normalized comparison, so `==`
/// always agrees with `compare`: 90 minutes equals 1.5 hours.
#[derive(Clone, Copy)]
pub struct Duration(Span);

impl Duration {
    pub fn zero() -> Self {
        Duration(Span::new())
    }

    #[inline]
    pub fn from_span(span: Span) -> Self {
        Duration(span)
    }

    #[inline]
    pub fn as_span(self) -> Span {
        self.0
    }

    /// Build from a (possibly fractional) millisecond count
    ///
    /// Sub-millisecond digits are kept down to the nearest nanosecond and
    /// stored as millisecond, microsecond and nanosecond fields of one sign.
    pub fn from_milliseconds(millis: f64) -> TcfResult<Self> {
        if !millis.is_finite() {
            return Err(TcfError::coercion(format!(
                "{millis} milliseconds is not a finite duration"
            )));
        }
        let nanos = (millis * NANOS_PER_MILLI as f64).round();
        if nanos.abs() >= i128::MAX as f64 {
            return Err(TcfError::OutOfRange(format!("{millis} milliseconds")));
        }
        Duration::from_nanoseconds(nanos as i128)
    }

    pub fn from_nanoseconds(nanos: i128) -> TcfResult<Self> {
        let millis = i64::try_from(nanos / NANOS_PER_MILLI)
            .map_err(|_| TcfError::OutOfRange(format!("{nanos} nanoseconds")))?;
        let rem = nanos % NANOS_PER_MILLI;
        // |rem| < 1e6 so both fit comfortably
        let micros = (rem / NANOS_PER_MICRO) as i64;
        let nanos = (rem % NANOS_PER_MICRO) as i64;

        let span = Span::new()
            .try_milliseconds(millis)?
            .try_microseconds(micros)?
            .try_nanoseconds(nanos)?;
        Ok(Duration(span))
    }

    /// Total length in milliseconds
    pub fn total_milliseconds(self) -> TcfResult<f64> {
        Ok(self.0.total(jiff::Unit::Millisecond)?)
    }

    pub fn checked_add(self, other: Duration) -> TcfResult<Duration> {
        Ok(Duration(self.0.checked_add(other.0)?))
    }

    pub fn checked_sub(self, other: Duration) -> TcfResult<Duration> {
        Ok(Duration(self.0.checked_sub(other.0)?))
    }

    /// Normalized comparison, valid across differently-balanced spans
    pub fn compare(self, other: Duration) -> TcfResult<Ordering> {
        Ok(self.0.compare(other.0)?)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn signum(self) -> i8 {
        self.0.signum()
    }
}

/// `==` holds exactly when `compare` reports `Equal`
///
/// Spans with calendar units (months, years) have no comparison without a
/// reference date. `compare` fails for them and `==` is `false`, even for
/// identical fields, the same way NaN never equals itself.
impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other).is_ok_and(Ordering::is_eq)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;

    #[test]
    fn test_instant_from_milliseconds_is_exact() {
        let i = Instant::from_milliseconds(1_704_067_200_000).unwrap();
        assert_eq!(i.as_nanoseconds(), 1_704_067_200_000_000_000);
        assert_eq!(i.to_string(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_instant_equality_is_nanosecond_equality() {
        let a = Instant::from_nanoseconds(1).unwrap();
        let b = Instant::from_nanoseconds(1).unwrap();
        let c = Instant::from_nanoseconds(2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.compare(c), Ordering::Less);
    }

    #[test]
    fn test_instant_out_of_range() {
        let err = Instant::from_nanoseconds(i128::MAX).unwrap_err();
        assert!(matches!(err, TcfError::OutOfRange(_)));
    }

    #[test]
    fn test_instant_since_is_signed() {
        let a = Instant::from_milliseconds(1_000).unwrap();
        let b = Instant::from_milliseconds(4_000).unwrap();
        let forward = b.since(a).unwrap();
        let backward = a.since(b).unwrap();
        assert_eq!(forward.total_milliseconds().unwrap(), 3_000.0);
        assert_eq!(backward.total_milliseconds().unwrap(), -3_000.0);
        assert!(a.since(a).unwrap().is_zero());
    }

    #[test]
    fn test_instant_add_sub_duration() {
        let a = Instant::from_milliseconds(0).unwrap();
        let day = Duration::from_milliseconds(86_400_000.0).unwrap();
        let b = a.checked_add(day).unwrap();
        assert_eq!(b.as_nanoseconds(), 86_400_000_000_000);
        assert_eq!(b.checked_sub(day).unwrap(), a);
    }

    #[test]
    fn test_duration_fractional_millis() {
        let d = Duration::from_milliseconds(1.5).unwrap();
        let span = d.as_span();
        assert_eq!(span.get_milliseconds(), 1);
        assert_eq!(span.get_microseconds(), 500);
        assert_eq!(span.get_nanoseconds(), 0);

        let d = Duration::from_milliseconds(-2.000_25).unwrap();
        let span = d.as_span();
        assert_eq!(span.get_milliseconds(), -2);
        assert_eq!(span.get_nanoseconds(), -250);
        assert_eq!(d.signum(), -1);
    }

    #[test]
    fn test_duration_rejects_non_finite() {
        assert!(matches!(
            Duration::from_milliseconds(f64::INFINITY),
            Err(TcfError::Coercion { .. })
        ));
        assert!(Duration::from_milliseconds(f64::NAN).is_err());
    }

    #[test]
    fn test_duration_equality_is_normalized() {
        let a = Duration::from_span(90.minutes());
        let b = Duration::from_span(1.hour().minutes(30));
        assert_eq!(a, b);
        assert_eq!(a.compare(b).unwrap(), Ordering::Equal);

        let c = Duration::from_milliseconds(5_400_000.0).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_calendar_durations_never_equal() {
        let a = Duration::from_span(1.month());
        let b = Duration::from_span(1.month());
        assert!(a.compare(b).is_err());
        assert!(a != b);
        assert_ne!(Duration::from_span(1.year()), Duration::from_span(12.months()));
    }

    #[test]
    fn test_duration_arithmetic() {
        let a = Duration::from_milliseconds(1_000.0).unwrap();
        let b = Duration::from_milliseconds(250.0).unwrap();
        assert_eq!(a.checked_add(b).unwrap().total_milliseconds().unwrap(), 1_250.0);
        assert_eq!(b.checked_sub(a).unwrap().total_milliseconds().unwrap(), -750.0);
        assert!(Duration::zero().is_zero());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_millisecond_totals_survive_construction(
                millis in -1_000_000_000_000i64..1_000_000_000_000i64,
                micros in 0u32..1000,
            ) {
                let total = millis as f64 + micros as f64 / 1000.0;
                let d = Duration::from_milliseconds(total).unwrap();
                let nanos = (total * 1e6).round() as i128;
                prop_assert_eq!(d, Duration::from_nanoseconds(nanos).unwrap());
                prop_assert_eq!(d.signum(), total.signum() as i8 * (nanos != 0) as i8);
            }

            #[test]
            fn test_instant_ordering_matches_nanoseconds(
                a in -1_000_000_000_000_000_000i128..1_000_000_000_000_000_000i128,
                b in -1_000_000_000_000_000_000i128..1_000_000_000_000_000_000i128,
            ) {
                let x = Instant::from_nanoseconds(a).unwrap();
                let y = Instant::from_nanoseconds(b).unwrap();
                prop_assert_eq!(x.compare(y), a.cmp(&b));
                prop_assert_eq!(x == y, a == b);
            }
        }
    }
}
