//! Coercion of raw input into canonical time values
//!
//! Three shapes of input are accepted:
//! - text, handed to a text parser
//! - a unit-tagged quantity with a unit of time
//! - a value that is already canonical, passed through

use jiff::Zoned;
use tracing::trace;

use tcf_core::{Duration, Instant, ParseKind, Quantity, TcfError, TcfResult, Unit, Value};

use crate::{DateTextParser, DurationTextParser};

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Raw input to `to_instant` / `to_duration`
#[derive(Clone, Copy, Debug)]
pub enum RawInput<'a> {
    Text(&'a str),
    Number(f64),
    Boolean(bool),
    Quantity(Quantity),
    Instant(Instant),
    Duration(Duration),
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        RawInput::Text(text.as_str())
    }
}

impl From<Quantity> for RawInput<'_> {
    fn from(q: Quantity) -> Self {
        RawInput::Quantity(q)
    }
}

impl From<Instant> for RawInput<'_> {
    fn from(i: Instant) -> Self {
        RawInput::Instant(i)
    }
}

impl From<Duration> for RawInput<'_> {
    fn from(d: Duration) -> Self {
        RawInput::Duration(d)
    }
}

impl From<Value> for RawInput<'_> {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => RawInput::Number(n),
            Value::Boolean(b) => RawInput::Boolean(b),
            Value::Quantity(q) => RawInput::Quantity(q),
            Value::Instant(i) => RawInput::Instant(i),
            Value::Duration(d) => RawInput::Duration(d),
        }
    }
}

impl From<&Value> for RawInput<'_> {
    fn from(value: &Value) -> Self {
        RawInput::from(*value)
    }
}

/// Coerce input into an `Instant`
///
/// Parsed text keeps the parser's millisecond precision, widened exactly to
/// nanoseconds. Quantities are read as a count since the Unix epoch; any
/// fraction below one nanosecond is truncated toward zero.
pub fn to_instant(
    input: RawInput<'_>,
    dates: &dyn DateTextParser,
    reference: &Zoned,
) -> TcfResult<Instant> {
    match input {
        RawInput::Text(text) => {
            let parsed = dates
                .parse_date(text, reference)
                .ok_or_else(|| TcfError::parse(ParseKind::Instant, text))?;
            // round down, including before the epoch
            let millis = parsed.timestamp().as_nanosecond().div_euclid(NANOS_PER_MILLI);
            trace!(text, %millis, "parsed instant text");
            Instant::from_nanoseconds(millis * NANOS_PER_MILLI)
        }
        RawInput::Quantity(q) => {
            let nanos = q.to_nanoseconds()?;
            trace!(%q, nanos, "instant from quantity");
            Instant::from_nanoseconds(nanos)
        }
        RawInput::Instant(i) => Ok(i),
        RawInput::Number(_) | RawInput::Boolean(_) | RawInput::Duration(_) => {
            Err(TcfError::coercion(format!(
                "cannot make an instant from {}",
                describe(&input)
            )))
        }
    }
}

/// Coerce input into a `Duration`
pub fn to_duration(input: RawInput<'_>, durations: &dyn DurationTextParser) -> TcfResult<Duration> {
    match input {
        RawInput::Text(text) => {
            let millis = durations
                .parse_milliseconds(text)
                .ok_or_else(|| TcfError::parse(ParseKind::Duration, text))?;
            trace!(text, millis, "parsed duration text");
            Duration::from_milliseconds(millis)
        }
        RawInput::Quantity(q) => {
            let millis = q.magnitude_in(Unit::millisecond())?;
            trace!(%q, millis, "duration from quantity");
            Duration::from_milliseconds(millis)
        }
        RawInput::Duration(d) => Ok(d),
        RawInput::Number(_) | RawInput::Boolean(_) | RawInput::Instant(_) => {
            Err(TcfError::coercion(format!(
                "cannot make a duration from {}",
                describe(&input)
            )))
        }
    }
}

fn describe(input: &RawInput<'_>) -> String {
    match input {
        RawInput::Text(text) => format!("text \"{text}\""),
        RawInput::Number(n) => format!("the unitless number {n}"),
        RawInput::Boolean(b) => format!("the boolean {b}"),
        RawInput::Quantity(q) => format!("the quantity {q}"),
        RawInput::Instant(i) => format!("the instant {i}"),
        RawInput::Duration(d) => format!("the duration {d}"),
    }
}
