//! End-to-end scenarios through the Time Engine

use std::sync::Arc;

use tcf_core::{Instant, Operator, ParseKind, Quantity, TcfError, Value};
use tcf_time::{ManualClock, TimeEngine, TimeEngineConfig};

fn engine() -> TimeEngine {
    // 2024-03-10T12:00:00Z
    let now = Instant::from_milliseconds(1_710_072_000_000).unwrap();
    TimeEngine::with_config(TimeEngineConfig::utc()).with_clock(Arc::new(ManualClock::new(now)))
}

#[test]
fn test_three_days_in_days() {
    let engine = engine();
    let d = Value::from(engine.duration("3 days").unwrap());
    let q = engine.to(&d, "days").unwrap();
    assert_eq!(q.as_quantity().unwrap().value, 3.0);
}

#[test]
fn test_add_then_subtract_a_day() {
    let engine = engine();
    let start = Value::from(engine.instant("2024-01-01").unwrap());
    let day = Value::from(engine.duration("1 day").unwrap());

    let next = engine.apply(Operator::Add, &start, &day).unwrap();
    let expected = engine.instant("2024-01-02").unwrap();
    assert_eq!(next, Value::from(expected));
    assert_eq!(
        engine.apply(Operator::Compare, &start, &next).unwrap(),
        Value::Number(-1.0)
    );

    let back = engine.apply(Operator::Subtract, &next, &day).unwrap();
    assert_eq!(
        engine.apply(Operator::Compare, &start, &back).unwrap(),
        Value::Number(0.0)
    );
    assert_eq!(
        engine.apply(Operator::Equal, &start, &back).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_bad_duration_text() {
    let engine = engine();
    let err = engine.duration("not a duration").unwrap_err();
    assert_eq!(
        err,
        TcfError::Parse {
            kind: ParseKind::Duration,
            text: "not a duration".to_string(),
        }
    );
}

#[test]
fn test_bad_date_text() {
    let engine = engine();
    let err = engine.instant("the day after never").unwrap_err();
    assert_eq!(err, TcfError::parse(ParseKind::Instant, "the day after never"));
}

#[test]
fn test_numbers_are_untouched() {
    let engine = engine();
    let sum = engine
        .apply(Operator::Add, &Value::Number(2.0), &Value::Number(40.0))
        .unwrap();
    assert_eq!(sum, Value::Number(42.0));
}

#[test]
fn test_duration_commutes_with_instant_in_add() {
    let engine = engine();
    let t = Value::from(engine.now());
    let d = Value::from(engine.duration("90 min").unwrap());
    let left = engine.apply(Operator::Add, &t, &d).unwrap();
    let right = engine.apply(Operator::Add, &d, &t).unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_elapsed_between_dates() {
    let engine = engine();
    let a = Value::from(engine.instant("2024-01-01T00:00:00Z").unwrap());
    let b = Value::from(engine.instant("2024-03-01T00:00:00Z").unwrap());
    let elapsed = engine.apply(Operator::Subtract, &b, &a).unwrap();

    let days = engine.to(&elapsed, "days").unwrap();
    assert_eq!(days.as_quantity().unwrap().value, 60.0);
    assert_eq!(engine.format(&elapsed).unwrap(), "1 mth, 29 days");
}

#[test]
fn test_quantities_coerce_into_time_values() {
    let engine = engine();

    let q = Quantity::parse(2.0, "hours").unwrap();
    let d = engine.duration(q).unwrap();
    assert_eq!(d.total_milliseconds().unwrap(), 7_200_000.0);

    let q = Quantity::parse(1_704_067_200.0, "s").unwrap();
    let i = engine.instant(q).unwrap();
    assert_eq!(i, engine.instant("2024-01-01T00:00:00Z").unwrap());

    let q = Quantity::parse(3.0, "kg").unwrap();
    assert!(matches!(engine.duration(q), Err(TcfError::Coercion { .. })));
}

#[test]
fn test_instant_projects_to_unit() {
    let engine = engine();
    let i = Value::from(engine.instant("2024-01-01T00:00:00Z").unwrap());
    let q = engine.to(&i, "ms").unwrap();
    assert_eq!(q.as_quantity().unwrap().value, 1_704_067_200_000.0);
}

#[test]
fn test_instant_round_trips_through_fine_units() {
    let engine = engine();
    let i = Instant::from_nanoseconds(1_704_067_200_000_000_001).unwrap();
    for unit in ["ns", "us", "ms", "s"] {
        let q = engine.to(&Value::from(i), unit).unwrap();
        let back = engine.instant(*q.as_quantity().unwrap()).unwrap();
        assert_eq!(back, i, "via {unit}");
    }
    let q = engine.to(&Value::from(i), "ns").unwrap();
    assert_eq!(engine.format(&q).unwrap(), "1704067200000000001 ns");
}

#[test]
fn test_mixed_kinds_are_rejected() {
    let engine = engine();
    let i = Value::from(engine.now());
    let err = engine.apply(Operator::Multiply, &i, &Value::Number(2.0)).unwrap_err();
    assert_eq!(
        err,
        TcfError::UnsupportedOperation {
            operator: Operator::Multiply,
            left: "Instant",
            right: "Number",
        }
    );
}

#[test]
fn test_scaling_durations() {
    let engine = engine();
    let d = Value::from(engine.duration("1 hour").unwrap());
    let tripled = engine.apply(Operator::Multiply, &Value::Number(3.0), &d).unwrap();
    assert_eq!(engine.format(&tripled).unwrap(), "3 hr");
    let halved = engine.apply(Operator::Divide, &d, &Value::Number(2.0)).unwrap();
    assert_eq!(engine.format(&halved).unwrap(), "30 min");
    assert_eq!(
        engine.apply(Operator::Divide, &tripled, &halved).unwrap(),
        Value::Number(6.0)
    );
}
