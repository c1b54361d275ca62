//! TCF Core - Fundamental types and primitives
//!
//! This crate defines the value model shared by the evaluator and its
//! time extension:
//! - Values and their dispatch tags (Number, Boolean, Quantity, Instant, Duration)
//! - Time primitives (Instant, Duration)
//! - Unit-tagged quantities and the unit catalogue
//! - Operator names and the host's default arithmetic
//! - Error types

pub mod error;
pub mod host;
pub mod operator;
pub mod time;
pub mod unit;
pub mod value;

pub use error::*;
pub use operator::*;
pub use time::*;
pub use unit::*;
pub use value::*;
