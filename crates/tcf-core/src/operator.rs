//! Operator catalogue
//!
//! The evaluator resolves binary operators by name. The names below are the
//! ones the time extension installs signatures for; the host's own arithmetic
//! answers to the same names.

use std::fmt;
use std::str::FromStr;

use crate::TcfError;

/// Operator names understood by the dispatch table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Compare,
    Larger,
    LargerEq,
    Smaller,
    SmallerEq,
    Equal,
    Unequal,
    /// Unit conversion: value plus target unit
    To,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Compare,
        Operator::Larger,
        Operator::LargerEq,
        Operator::Smaller,
        Operator::SmallerEq,
        Operator::Equal,
        Operator::Unequal,
        Operator::To,
    ];

    /// Evaluator-facing name
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
            Operator::Compare => "compare",
            Operator::Larger => "larger",
            Operator::LargerEq => "largerEq",
            Operator::Smaller => "smaller",
            Operator::SmallerEq => "smallerEq",
            Operator::Equal => "equal",
            Operator::Unequal => "unequal",
            Operator::To => "to",
        }
    }

    /// Parse from evaluator-facing name
    pub fn from_name(name: &str) -> Option<Self> {
        Operator::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Relational operators answer with a truth value derived from `compare`
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operator::Larger
                | Operator::LargerEq
                | Operator::Smaller
                | Operator::SmallerEq
                | Operator::Equal
                | Operator::Unequal
        )
    }

    /// Map the sign of a comparison onto this relational operator
    ///
    /// Returns `None` for operators that are not relational.
    pub fn holds(self, ordering: std::cmp::Ordering) -> Option<bool> {
        let holds = match self {
            Operator::Larger => ordering.is_gt(),
            Operator::LargerEq => ordering.is_ge(),
            Operator::Smaller => ordering.is_lt(),
            Operator::SmallerEq => ordering.is_le(),
            Operator::Equal => ordering.is_eq(),
            Operator::Unequal => ordering.is_ne(),
            _ => return None,
        };
        Some(holds)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = TcfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_name(s).ok_or_else(|| TcfError::UnknownOperator(s.to_string()))
    }
}
