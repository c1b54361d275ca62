//! Evaluator values
//!
//! The set of runtime values is closed. Dispatch never inspects structure;
//! it asks a value for its `TypeTag` and looks signatures up by tag.

use std::fmt;

use crate::{Duration, Instant, Quantity};

/// Dispatch tag of a value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Number,
    Boolean,
    Quantity,
    Instant,
    Duration,
}

impl TypeTag {
    pub const ALL: [TypeTag; 5] = [
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Quantity,
        TypeTag::Instant,
        TypeTag::Duration,
    ];

    /// Name used in signatures and error messages
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Number => "Number",
            TypeTag::Boolean => "Boolean",
            TypeTag::Quantity => "Quantity",
            TypeTag::Instant => "Instant",
            TypeTag::Duration => "Duration",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name given to the target-unit parameter of `to`
pub const UNIT_PARAMETER: &str = "Unit";

/// A runtime value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Quantity(Quantity),
    Instant(Instant),
    Duration(Duration),
}

impl Value {
    #[inline]
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Number(_) => TypeTag::Number,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Quantity(_) => TypeTag::Quantity,
            Value::Instant(_) => TypeTag::Instant,
            Value::Duration(_) => TypeTag::Duration,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<Instant> {
        match self {
            Value::Instant(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<Instant> for Value {
    fn from(i: Instant) -> Self {
        Value::Instant(i)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}
