//! Time operator signatures
//!
//! | Operator | Signatures |
//! |---|---|
//! | add | (Instant, Duration), (Duration, Instant), (Duration, Duration) |
//! | subtract | (Instant, Instant), (Instant, Duration), (Duration, Duration) |
//! | multiply | (Duration, Number), (Number, Duration) |
//! | divide | (Duration, Number), (Duration, Duration) |
//! | compare and relational | (Instant, Instant), (Duration, Duration) |
//! | to | Instant, Duration |
//!
//! Scaling and ratios work on total milliseconds. Every relational operator
//! is derived from the sign of `compare`, so `equal` can never disagree with it.

use std::cmp::Ordering;

use tcf_core::host::{sign, unsupported};
use tcf_core::{
    Duration, Instant, Operator, Quantity, TcfError, TcfResult, TypeTag, Unit, Value,
};

use crate::OperatorRegistryBuilder;

/// Install every time signature into `builder`
pub fn install_time_operators(builder: &mut OperatorRegistryBuilder) {
    use TypeTag::{Duration as D, Instant as I, Number as N};

    builder
        .signature(Operator::Add, I, D, add_instant_duration)
        .signature(Operator::Add, D, I, add_duration_instant)
        .signature(Operator::Add, D, D, add_durations)
        .signature(Operator::Subtract, I, I, subtract_instants)
        .signature(Operator::Subtract, I, D, subtract_instant_duration)
        .signature(Operator::Subtract, D, D, subtract_durations)
        .signature(Operator::Multiply, D, N, multiply_duration_number)
        .signature(Operator::Multiply, N, D, multiply_number_duration)
        .signature(Operator::Divide, D, N, divide_duration_number)
        .signature(Operator::Divide, D, D, divide_durations);

    for (left, right) in [(I, I), (D, D)] {
        builder.signature(Operator::Compare, left, right, compare);
        builder.signature(Operator::Larger, left, right, larger);
        builder.signature(Operator::LargerEq, left, right, larger_eq);
        builder.signature(Operator::Smaller, left, right, smaller);
        builder.signature(Operator::SmallerEq, left, right, smaller_eq);
        builder.signature(Operator::Equal, left, right, equal);
        builder.signature(Operator::Unequal, left, right, unequal);
    }

    builder
        .conversion(I, instant_to_unit)
        .conversion(D, duration_to_unit);
}

fn mismatch(op: Operator, a: &Value, b: &Value) -> TcfError {
    unsupported(op, a.tag().name(), b.tag().name())
}

fn add_instant_duration(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Instant(i), Value::Duration(d)) = (a, b) else {
        return Err(mismatch(Operator::Add, a, b));
    };
    Ok(Value::Instant(i.checked_add(*d)?))
}

fn add_duration_instant(a: &Value, b: &Value) -> TcfResult<Value> {
    add_instant_duration(b, a)
}

fn add_durations(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Duration(x), Value::Duration(y)) = (a, b) else {
        return Err(mismatch(Operator::Add, a, b));
    };
    Ok(Value::Duration(x.checked_add(*y)?))
}

fn subtract_instants(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Instant(x), Value::Instant(y)) = (a, b) else {
        return Err(mismatch(Operator::Subtract, a, b));
    };
    Ok(Value::Duration(x.since(*y)?))
}

fn subtract_instant_duration(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Instant(i), Value::Duration(d)) = (a, b) else {
        return Err(mismatch(Operator::Subtract, a, b));
    };
    Ok(Value::Instant(i.checked_sub(*d)?))
}

fn subtract_durations(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Duration(x), Value::Duration(y)) = (a, b) else {
        return Err(mismatch(Operator::Subtract, a, b));
    };
    Ok(Value::Duration(x.checked_sub(*y)?))
}

fn scale(d: Duration, k: f64) -> TcfResult<Value> {
    Ok(Value::Duration(Duration::from_milliseconds(
        d.total_milliseconds()? * k,
    )?))
}

fn multiply_duration_number(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Duration(d), Value::Number(k)) = (a, b) else {
        return Err(mismatch(Operator::Multiply, a, b));
    };
    scale(*d, *k)
}

fn multiply_number_duration(a: &Value, b: &Value) -> TcfResult<Value> {
    multiply_duration_number(b, a)
}

fn divide_duration_number(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Duration(d), Value::Number(k)) = (a, b) else {
        return Err(mismatch(Operator::Divide, a, b));
    };
    if *k == 0.0 {
        return Err(TcfError::DivisionByZero);
    }
    Ok(Value::Duration(Duration::from_milliseconds(
        d.total_milliseconds()? / k,
    )?))
}

fn divide_durations(a: &Value, b: &Value) -> TcfResult<Value> {
    let (Value::Duration(x), Value::Duration(y)) = (a, b) else {
        return Err(mismatch(Operator::Divide, a, b));
    };
    let divisor = y.total_milliseconds()?;
    if divisor == 0.0 {
        return Err(TcfError::DivisionByZero);
    }
    Ok(Value::Number(x.total_milliseconds()? / divisor))
}

/// Shared ordering for every comparison signature
fn ordering(op: Operator, a: &Value, b: &Value) -> TcfResult<Ordering> {
    match (a, b) {
        (Value::Instant(x), Value::Instant(y)) => Ok(Instant::compare(*x, *y)),
        (Value::Duration(x), Value::Duration(y)) => x.compare(*y),
        _ => Err(mismatch(op, a, b)),
    }
}

fn relation(op: Operator, a: &Value, b: &Value) -> TcfResult<Value> {
    let ordering = ordering(op, a, b)?;
    let holds = op.holds(ordering).ok_or_else(|| mismatch(op, a, b))?;
    Ok(Value::Boolean(holds))
}

fn compare(a: &Value, b: &Value) -> TcfResult<Value> {
    Ok(Value::Number(sign(ordering(Operator::Compare, a, b)?)))
}

fn larger(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::Larger, a, b)
}

fn larger_eq(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::LargerEq, a, b)
}

fn smaller(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::Smaller, a, b)
}

fn smaller_eq(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::SmallerEq, a, b)
}

fn equal(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::Equal, a, b)
}

fn unequal(a: &Value, b: &Value) -> TcfResult<Value> {
    relation(Operator::Unequal, a, b)
}

/// Instants project through their exact nanosecond count
fn instant_to_unit(value: &Value, unit: &'static Unit) -> TcfResult<Value> {
    let Value::Instant(i) = value else {
        return Err(unsupported(Operator::To, value.tag().name(), tcf_core::UNIT_PARAMETER));
    };
    Ok(Value::Quantity(Quantity::from_nanoseconds(
        i.as_nanoseconds(),
        unit,
    )?))
}

/// Durations project through their total milliseconds
fn duration_to_unit(value: &Value, unit: &'static Unit) -> TcfResult<Value> {
    let Value::Duration(d) = value else {
        return Err(unsupported(Operator::To, value.tag().name(), tcf_core::UNIT_PARAMETER));
    };
    let millis = Quantity::new(d.total_milliseconds()?, Unit::millisecond());
    Ok(Value::Quantity(millis.to(unit)?))
}
