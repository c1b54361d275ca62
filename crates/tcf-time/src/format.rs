//! Display formatting for evaluator values
//!
//! Instants render in the configured zone with the configured strftime
//! pattern. Durations are first balanced up to the configured largest unit
//! relative to the current moment, so the same duration may read differently
//! on different days ("1 mth" is 28 to 31 days).

use jiff::{Span, SpanRound};

use tcf_core::{Duration, Instant, TcfResult, Value};

use crate::TimeEngineConfig;

/// Render any value for display
pub fn format_value(value: &Value, config: &TimeEngineConfig, now: Instant) -> TcfResult<String> {
    match value {
        Value::Number(n) => Ok(format_number(*n)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Quantity(q) => Ok(match q.exact_integral() {
            Some(whole) => format!("{whole} {}", q.unit.name),
            None => format!("{} {}", format_number(q.value), q.unit.name),
        }),
        Value::Instant(i) => format_instant(*i, config),
        Value::Duration(d) => format_duration(*d, config, now),
    }
}

pub fn format_instant(instant: Instant, config: &TimeEngineConfig) -> TcfResult<String> {
    let zoned = instant.as_timestamp().to_zoned(config.time_zone.clone());
    Ok(jiff::fmt::strtime::format(&config.timestamp_format, &zoned)?)
}

pub fn format_duration(
    duration: Duration,
    config: &TimeEngineConfig,
    now: Instant,
) -> TcfResult<String> {
    let relative = now
        .as_timestamp()
        .to_zoned(config.time_zone.clone())
        .datetime();
    let span = duration.as_span().round(
        SpanRound::new()
            .largest(config.duration_largest_unit)
            .relative(relative),
    )?;
    Ok(render_span(&span))
}

// (singular, plural) short English labels
const LABELS: [(&str, &str); 10] = [
    ("yr", "yrs"),
    ("mth", "mths"),
    ("wk", "wks"),
    ("day", "days"),
    ("hr", "hr"),
    ("min", "min"),
    ("sec", "sec"),
    ("ms", "ms"),
    ("μs", "μs"),
    ("ns", "ns"),
];

fn render_span(span: &Span) -> String {
    let fields: [i64; 10] = [
        span.get_years().into(),
        span.get_months().into(),
        span.get_weeks().into(),
        span.get_days().into(),
        span.get_hours().into(),
        span.get_minutes(),
        span.get_seconds(),
        span.get_milliseconds(),
        span.get_microseconds(),
        span.get_nanoseconds(),
    ];

    let parts: Vec<String> = fields
        .iter()
        .zip(LABELS)
        .filter(|(n, _)| **n != 0)
        .map(|(n, (one, many))| {
            let n = n.unsigned_abs();
            format!("{n} {}", if n == 1 { one } else { many })
        })
        .collect();

    if parts.is_empty() {
        return "0 sec".to_string();
    }
    let sign = if span.signum() < 0 { "-" } else { "" };
    format!("{sign}{}", parts.join(", "))
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;
    use tcf_core::{Quantity, Unit};

    fn config() -> TimeEngineConfig {
        TimeEngineConfig::utc()
    }

    fn noon_2024_03_10() -> Instant {
        Instant::from_milliseconds(1_710_072_000_000).unwrap()
    }

    #[test]
    fn test_format_instant_default_pattern() {
        let i = Instant::from_milliseconds(1_704_114_245_000).unwrap(); // 2024-01-01T13:04:05Z
        assert_eq!(format_instant(i, &config()).unwrap(), "1/1/2024, 1:04:05 PM");
    }

    #[test]
    fn test_format_instant_custom_pattern() {
        let config = TimeEngineConfig {
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            ..config()
        };
        let i = Instant::from_milliseconds(1_704_114_245_000).unwrap();
        assert_eq!(format_instant(i, &config).unwrap(), "2024-01-01 13:04");
    }

    #[test]
    fn test_format_duration_balances() {
        let d = Duration::from_milliseconds(259_200_000.0).unwrap();
        assert_eq!(format_duration(d, &config(), noon_2024_03_10()).unwrap(), "3 days");

        let d = Duration::from_milliseconds(90_061_001.0).unwrap();
        assert_eq!(
            format_duration(d, &config(), noon_2024_03_10()).unwrap(),
            "1 day, 1 hr, 1 min, 1 sec, 1 ms"
        );
    }

    #[test]
    fn test_format_duration_zero_and_negative() {
        assert_eq!(
            format_duration(Duration::zero(), &config(), noon_2024_03_10()).unwrap(),
            "0 sec"
        );
        let d = Duration::from_milliseconds(-7_200_000.0).unwrap();
        assert_eq!(format_duration(d, &config(), noon_2024_03_10()).unwrap(), "-2 hr");
    }

    #[test]
    fn test_format_duration_depends_on_now() {
        // 31 days is exactly one month in March but not in April
        let d = Duration::from_span(744.hours());
        let march = Instant::from_milliseconds(1_709_294_400_000).unwrap(); // 2024-03-01T12:00Z
        let april = Instant::from_milliseconds(1_711_972_800_000).unwrap(); // 2024-04-01T12:00Z
        assert_eq!(format_duration(d, &config(), march).unwrap(), "1 mth");
        assert_eq!(format_duration(d, &config(), april).unwrap(), "1 mth, 1 day");
    }

    #[test]
    fn test_format_scalars() {
        let now = noon_2024_03_10();
        assert_eq!(format_value(&Value::Number(3.0), &config(), now).unwrap(), "3");
        assert_eq!(format_value(&Value::Number(1.5), &config(), now).unwrap(), "1.5");
        assert_eq!(format_value(&Value::Boolean(true), &config(), now).unwrap(), "true");
        let q = Quantity::parse(3.0, "days").unwrap();
        assert_eq!(format_value(&Value::Quantity(q), &config(), now).unwrap(), "3 day");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");

        let nanos = 1_704_067_200_000_000_001;
        let ns = Quantity::from_nanoseconds(nanos, Unit::nanosecond()).unwrap();
        assert_eq!(
            format_value(&Value::Quantity(ns), &config(), now).unwrap(),
            "1704067200000000001 ns"
        );
    }
}
