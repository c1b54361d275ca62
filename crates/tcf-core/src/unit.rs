//! Unit-tagged quantities
//!
//! A `Quantity` is a magnitude paired with a measurement unit. Units live in a
//! static catalogue grouped by dimension; each unit carries its factor relative
//! to the dimension's base unit:
//! - Time: nanoseconds (every factor is an exact integer)
//! - Length: millimetres
//! - Mass: milligrams

use std::fmt;

use crate::{TcfError, TcfResult};

/// Physical dimension of a unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Time,
    Length,
    Mass,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Time => "time",
            Dimension::Length => "length",
            Dimension::Mass => "mass",
        };
        f.write_str(name)
    }
}

/// Catalogue entry for a measurement unit
#[derive(Debug)]
pub struct Unit {
    /// Canonical symbol
    pub name: &'static str,
    /// Other accepted spellings
    pub aliases: &'static [&'static str],
    pub dimension: Dimension,
    /// Size in base units of the dimension
    pub factor: f64,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Unit {}

const NS: f64 = 1.0;
const US: f64 = 1_000.0;
const MS: f64 = 1_000_000.0;
const SEC: f64 = 1_000_000_000.0;
const MIN: f64 = 60.0 * SEC;
const HOUR: f64 = 60.0 * MIN;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
// Julian year; month is a twelfth of it
const YEAR: f64 = 31_557_600.0 * SEC;
const MONTH: f64 = 2_629_800.0 * SEC;

const fn time(name: &'static str, aliases: &'static [&'static str], factor: f64) -> Unit {
    Unit {
        name,
        aliases,
        dimension: Dimension::Time,
        factor,
    }
}

const fn length(name: &'static str, aliases: &'static [&'static str], factor: f64) -> Unit {
    Unit {
        name,
        aliases,
        dimension: Dimension::Length,
        factor,
    }
}

const fn mass(name: &'static str, aliases: &'static [&'static str], factor: f64) -> Unit {
    Unit {
        name,
        aliases,
        dimension: Dimension::Mass,
        factor,
    }
}

static UNITS: &[Unit] = &[
    time("ns", &["nanosecond", "nanoseconds"], NS),
    time("us", &["µs", "μs", "microsecond", "microseconds"], US),
    time("ms", &["millisecond", "milliseconds"], MS),
    time("s", &["sec", "secs", "second", "seconds"], SEC),
    time("min", &["mins", "minute", "minutes"], MIN),
    time("h", &["hr", "hrs", "hour", "hours"], HOUR),
    time("day", &["days"], DAY),
    time("week", &["weeks"], WEEK),
    time("month", &["months"], MONTH),
    time("year", &["years"], YEAR),
    time("decade", &["decades"], 10.0 * YEAR),
    time("century", &["centuries"], 100.0 * YEAR),
    length("mm", &["millimeter", "millimeters", "millimetre", "millimetres"], 1.0),
    length("cm", &["centimeter", "centimeters", "centimetre", "centimetres"], 10.0),
    length("m", &["meter", "meters", "metre", "metres"], 1_000.0),
    length("km", &["kilometer", "kilometers", "kilometre", "kilometres"], 1_000_000.0),
    length("in", &["inch", "inches"], 25.4),
    length("ft", &["foot", "feet"], 304.8),
    length("mi", &["mile", "miles"], 1_609_344.0),
    mass("mg", &["milligram", "milligrams"], 1.0),
    mass("g", &["gram", "grams"], 1_000.0),
    mass("kg", &["kilogram", "kilograms"], 1_000_000.0),
    mass("lb", &["lbs", "pound", "pounds"], 453_592.37),
];

impl Unit {
    /// Look up a unit by symbol or alias
    pub fn find(name: &str) -> Option<&'static Unit> {
        let name = name.trim();
        UNITS
            .iter()
            .find(|u| u.name == name || u.aliases.contains(&name))
    }

    /// Look up a unit, failing with `UnknownUnit`
    pub fn parse(name: &str) -> TcfResult<&'static Unit> {
        Unit::find(name).ok_or_else(|| TcfError::UnknownUnit(name.to_string()))
    }

    /// All catalogued units
    pub fn all() -> &'static [Unit] {
        UNITS
    }

    pub fn nanosecond() -> &'static Unit {
        &UNITS[0]
    }

    pub fn millisecond() -> &'static Unit {
        &UNITS[2]
    }

    #[inline]
    pub fn is_time(&self) -> bool {
        self.dimension == Dimension::Time
    }

    /// Exact nanoseconds per unit, for time units only
    pub fn nanos_per_unit(&self) -> Option<i128> {
        self.is_time().then_some(self.factor as i128)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A magnitude tagged with a unit
///
/// `value` is the floating-point magnitude used by host arithmetic. A time
/// quantity projected from an exact nanosecond count also keeps that count,
/// so converting it back or into another time unit loses nothing.
#[derive(Clone, Copy, Debug)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static Unit,
    exact_nanos: Option<i128>,
}

impl Quantity {
    pub fn new(value: f64, unit: &'static Unit) -> Self {
        Quantity {
            value,
            unit,
            exact_nanos: None,
        }
    }

    /// Build from a magnitude and a unit name
    pub fn parse(value: f64, unit: &str) -> TcfResult<Self> {
        Ok(Quantity::new(value, Unit::parse(unit)?))
    }

    #[inline]
    pub fn is_time(&self) -> bool {
        self.unit.is_time()
    }

    /// Exact nanosecond count, if this quantity carries one
    #[inline]
    pub fn exact_nanoseconds(&self) -> Option<i128> {
        self.exact_nanos
    }

    /// Exact whole magnitude in `unit`, when the exact count divides evenly
    pub fn exact_integral(&self) -> Option<i128> {
        let per = self.unit.nanos_per_unit()?;
        let nanos = self.exact_nanos?;
        (nanos % per == 0).then_some(nanos / per)
    }

    /// Convert into another unit of the same dimension
    pub fn to(&self, target: &'static Unit) -> TcfResult<Quantity> {
        match self.exact_nanos {
            Some(nanos) if target.is_time() => Quantity::from_nanoseconds(nanos, target),
            _ => Ok(Quantity::new(self.magnitude_in(target)?, target)),
        }
    }

    /// Magnitude expressed in `target`
    pub fn magnitude_in(&self, target: &Unit) -> TcfResult<f64> {
        if self.unit.dimension != target.dimension {
            return Err(TcfError::coercion(format!(
                "cannot convert {} ({}) to {} ({})",
                self.unit, self.unit.dimension, target, target.dimension
            )));
        }
        if self.unit == target {
            return Ok(self.value);
        }
        Ok(self.value * self.unit.factor / target.factor)
    }

    /// Whole nanoseconds, truncating toward zero
    ///
    /// An exact count is returned as is. Integer magnitudes multiply exactly;
    /// fractional ones go through floating point and drop any sub-nanosecond
    /// remainder.
    pub fn to_nanoseconds(&self) -> TcfResult<i128> {
        let per = self.unit.nanos_per_unit().ok_or_else(|| {
            TcfError::coercion(format!("{} is not a unit of time", self.unit))
        })?;
        if let Some(nanos) = self.exact_nanos {
            return Ok(nanos);
        }
        if !self.value.is_finite() {
            return Err(TcfError::coercion(format!(
                "magnitude {} is not finite",
                self.value
            )));
        }

        if self.value.fract() == 0.0 && self.value.abs() < i128::MAX as f64 {
            return (self.value as i128)
                .checked_mul(per)
                .ok_or_else(|| TcfError::coercion("nanosecond count overflows"));
        }

        let nanos = (self.value * per as f64).trunc();
        if nanos.abs() >= i128::MAX as f64 {
            return Err(TcfError::coercion("nanosecond count overflows"));
        }
        Ok(nanos as i128)
    }

    /// Project an exact nanosecond count into a time unit
    ///
    /// The count itself is kept alongside the floating-point magnitude, which
    /// is only as precise as an f64 allows.
    pub fn from_nanoseconds(nanos: i128, target: &'static Unit) -> TcfResult<Quantity> {
        let per = target.nanos_per_unit().ok_or_else(|| {
            TcfError::coercion(format!("{} is not a unit of time", target))
        })?;
        let whole = nanos / per;
        let rem = nanos % per;
        Ok(Quantity {
            value: whole as f64 + rem as f64 / per as f64,
            unit: target,
            exact_nanos: Some(nanos),
        })
    }
}

/// Exact counts decide equality when both sides carry one
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        if self.unit != other.unit {
            return false;
        }
        match (self.exact_nanos, other.exact_nanos) {
            (Some(a), Some(b)) => a == b,
            _ => self.value == other.value,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exact_integral() {
            Some(whole) => write!(f, "{} {}", whole, self.unit),
            None => write!(f, "{} {}", self.value, self.unit),
        }
    }
}
