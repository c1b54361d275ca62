//! Error types for TCF evaluation

use thiserror::Error;

use crate::Operator;

/// Which canonical kind a piece of text was meant to become
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseKind {
    Instant,
    Duration,
}

impl ParseKind {
    pub fn noun(self) -> &'static str {
        match self {
            ParseKind::Instant => "date",
            ParseKind::Duration => "duration",
        }
    }
}

/// Core TCF errors
///
/// Every variant is terminal to the expression being evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TcfError {
    #[error("Could not parse {}: \"{text}\"", kind.noun())]
    Parse { kind: ParseKind, text: String },

    #[error("Coercion failed: {reason}")]
    Coercion { reason: String },

    #[error("Unsupported operation: {operator}({left}, {right})")]
    UnsupportedOperation {
        operator: Operator,
        left: &'static str,
        right: &'static str,
    },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl TcfError {
    pub fn parse(kind: ParseKind, text: impl Into<String>) -> Self {
        TcfError::Parse {
            kind,
            text: text.into(),
        }
    }

    pub fn coercion(reason: impl Into<String>) -> Self {
        TcfError::Coercion {
            reason: reason.into(),
        }
    }
}

impl From<jiff::Error> for TcfError {
    fn from(err: jiff::Error) -> Self {
        TcfError::OutOfRange(err.to_string())
    }
}

/// Result type for TCF operations
pub type TcfResult<T> = Result<T, TcfError>;
