//! Text parsers for dates and durations
//!
//! Coercion hands raw text to one of two collaborators:
//! - `DateTextParser`: free text to a calendar datetime, relative to a reference moment
//! - `DurationTextParser`: free text to a millisecond count
//!
//! The defaults cover the common phrasings; the evaluator can swap either
//! one out through `TimeEngine`.

use jiff::civil::{Date, DateTime};
use jiff::{Timestamp, ToSpan, Zoned};

use tcf_core::Duration;

/// Parses human duration text into milliseconds
pub trait DurationTextParser: Send + Sync {
    /// `None` means the text is not a duration
    fn parse_milliseconds(&self, text: &str) -> Option<f64>;
}

/// Parses human date text into a calendar datetime
pub trait DateTextParser: Send + Sync {
    /// `reference` anchors relative phrases and supplies the time zone
    fn parse_date(&self, text: &str, reference: &Zoned) -> Option<Zoned>;
}

/// Duration parser built on `humantime`
///
/// Accepts `"3 days"`, `"2h 30min"`, a bare number of milliseconds, a leading
/// sign, and decimal magnitudes such as `"1.5h"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanDurationParser;

impl DurationTextParser for HumanDurationParser {
    fn parse_milliseconds(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let (sign, body) = if let Some(rest) = text.strip_prefix('-') {
            (-1.0, rest.trim_start())
        } else if let Some(rest) = text.strip_prefix('+') {
            (1.0, rest.trim_start())
        } else {
            (1.0, text)
        };
        if body.is_empty() || body.starts_with(['+', '-']) {
            return None;
        }

        if let Ok(millis) = body.parse::<f64>() {
            return millis.is_finite().then_some(sign * millis);
        }
        if let Ok(d) = humantime::parse_duration(body) {
            return Some(sign * nanos_to_millis(d));
        }
        parse_decimal_terms(body).map(|millis| sign * millis)
    }
}

fn nanos_to_millis(d: std::time::Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

/// `<decimal><unit>` terms, separated by whitespace, commas or `+`
fn parse_decimal_terms(text: &str) -> Option<f64> {
    let mut rest = text;
    let mut total = 0.0;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return None;
        }
        let magnitude: f64 = rest[..num_len].parse().ok()?;
        rest = rest[num_len..].trim_start();

        let unit_len = rest
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return None;
        }
        total += magnitude * unit_milliseconds(&rest[..unit_len])?;
        rest = rest[unit_len..]
            .trim_start_matches(|c: char| c.is_whitespace() || c == ',' || c == '+');
    }
    Some(total)
}

/// Length of one `unit`, as `humantime` spells units
fn unit_milliseconds(unit: &str) -> Option<f64> {
    humantime::parse_duration(&format!("1{unit}"))
        .ok()
        .map(nanos_to_millis)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
];

/// Dates without a time of day land on noon
const IMPLIED_HOUR: i8 = 12;

/// Date parser for everyday phrasings
///
/// Understands `now`, `today`, `tomorrow`, `yesterday`, `in <duration>`,
/// `<duration> ago`, `<duration> from now`, RFC 3339 timestamps, zoned
/// datetimes with a bracketed zone name, and a handful of civil date and
/// datetime layouts.
#[derive(Clone, Debug, Default)]
pub struct NaturalDateParser {
    durations: HumanDurationParser,
}

impl NaturalDateParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn relative(&self, text: &str, reference: &Zoned) -> Option<Zoned> {
        match text {
            "now" | "today" => return Some(reference.clone()),
            "tomorrow" => return reference.checked_add(1.day()).ok(),
            "yesterday" => return reference.checked_sub(1.day()).ok(),
            _ => {}
        }

        let (phrase, direction) = if let Some(rest) = text.strip_prefix("in ") {
            (rest, 1.0)
        } else if let Some(rest) = text.strip_suffix(" ago") {
            (rest, -1.0)
        } else if let Some(rest) = text.strip_suffix(" from now") {
            (rest, 1.0)
        } else {
            return None;
        };

        let millis = self.durations.parse_milliseconds(phrase)?;
        let offset = Duration::from_milliseconds(direction * millis).ok()?;
        reference.checked_add(offset.as_span()).ok()
    }

    fn absolute(&self, text: &str, reference: &Zoned) -> Option<Zoned> {
        let tz = reference.time_zone();

        if let Ok(ts) = text.parse::<Timestamp>() {
            return Some(ts.to_zoned(tz.clone()));
        }
        if let Ok(zdt) = text.parse::<Zoned>() {
            return Some(zdt);
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = DateTime::strptime(format, text) {
                return dt.to_zoned(tz.clone()).ok();
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = Date::strptime(format, text) {
                return date.at(IMPLIED_HOUR, 0, 0, 0).to_zoned(tz.clone()).ok();
            }
        }
        None
    }
}

impl DateTextParser for NaturalDateParser {
    fn parse_date(&self, text: &str, reference: &Zoned) -> Option<Zoned> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let lower = text.to_lowercase();
        self.relative(&lower, reference)
            .or_else(|| self.absolute(text, reference))
    }
}
