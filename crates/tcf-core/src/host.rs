//! Host arithmetic
//!
//! Default behaviour of every operator for plain numbers and unit-tagged
//! quantities. Signatures registered by extensions take precedence; anything
//! they do not claim ends up here, and anything the host cannot do either
//! fails with `UnsupportedOperation`.

use std::cmp::Ordering;

use crate::{Operator, Quantity, TcfError, TcfResult, Unit, Value, UNIT_PARAMETER};

/// Apply `op` to two values using the host's own semantics
pub fn apply(op: Operator, a: &Value, b: &Value) -> TcfResult<Value> {
    use Operator::*;
    use Value::{Boolean, Number, Quantity as Q};

    let result = match (op, a, b) {
        (Add, Number(x), Number(y)) => Number(x + y),
        (Subtract, Number(x), Number(y)) => Number(x - y),
        (Multiply, Number(x), Number(y)) => Number(x * y),
        (Divide, Number(x), Number(y)) => Number(x / nonzero(*y)?),

        (Add, Q(x), Q(y)) => Q(Quantity::new(x.value + y.magnitude_in(x.unit)?, x.unit)),
        (Subtract, Q(x), Q(y)) => Q(Quantity::new(x.value - y.magnitude_in(x.unit)?, x.unit)),
        (Multiply, Q(x), Number(k)) | (Multiply, Number(k), Q(x)) => {
            Q(Quantity::new(x.value * k, x.unit))
        }
        (Divide, Q(x), Number(k)) => Q(Quantity::new(x.value / nonzero(*k)?, x.unit)),
        (Divide, Q(x), Q(y)) => Number(x.value / nonzero(y.magnitude_in(x.unit)?)?),

        (Compare, Number(x), Number(y)) => Number(sign(compare_numbers(*x, *y)?)),
        (Compare, Q(x), Q(y)) => Number(sign(compare_quantities(x, y)?)),

        (op, Number(x), Number(y)) if op.is_relational() => {
            Boolean(holds(op, compare_numbers(*x, *y)?))
        }
        (op, Q(x), Q(y)) if op.is_relational() => Boolean(holds(op, compare_quantities(x, y)?)),
        (Equal, Boolean(x), Boolean(y)) => Boolean(x == y),
        (Unequal, Boolean(x), Boolean(y)) => Boolean(x != y),

        (op, a, b) => return Err(unsupported(op, a.tag().name(), b.tag().name())),
    };
    Ok(result)
}

/// Host conversion of a value into `unit`
pub fn convert(value: &Value, unit: &'static Unit) -> TcfResult<Value> {
    match value {
        Value::Quantity(q) => Ok(Value::Quantity(q.to(unit)?)),
        other => Err(unsupported(Operator::To, other.tag().name(), UNIT_PARAMETER)),
    }
}

/// Sign of an ordering as a number: -1, 0 or 1
pub fn sign(ordering: Ordering) -> f64 {
    match ordering {
        Ordering::Less => -1.0,
        Ordering::Equal => 0.0,
        Ordering::Greater => 1.0,
    }
}

pub fn unsupported(operator: Operator, left: &'static str, right: &'static str) -> TcfError {
    TcfError::UnsupportedOperation {
        operator,
        left,
        right,
    }
}

fn holds(op: Operator, ordering: Ordering) -> bool {
    op.holds(ordering).unwrap_or(false)
}

fn nonzero(divisor: f64) -> TcfResult<f64> {
    if divisor == 0.0 {
        Err(TcfError::DivisionByZero)
    } else {
        Ok(divisor)
    }
}

fn compare_numbers(x: f64, y: f64) -> TcfResult<Ordering> {
    x.partial_cmp(&y)
        .ok_or_else(|| TcfError::OutOfRange(format!("cannot compare {x} with {y}")))
}

fn compare_quantities(x: &Quantity, y: &Quantity) -> TcfResult<Ordering> {
    compare_numbers(x.value, y.magnitude_in(x.unit)?)
}
