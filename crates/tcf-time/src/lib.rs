//! TCF Time - date and duration values for the evaluator
//!
//! This crate extends the evaluator with two value kinds and the operators
//! that understand them:
//! - Coercion of text and unit-tagged quantities into Instants and Durations
//! - Type registration for runtime dispatch
//! - The operator dispatch table, with host arithmetic as the fallback
//! - Locale-style formatting of both kinds
//! - `TimeEngine`, the facade the evaluator installs

pub mod clock;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod format;
pub mod operators;
pub mod parse;
pub mod registry;
pub mod types;

pub use clock::*;
pub use coerce::{to_duration, to_instant, RawInput};
pub use config::*;
pub use engine::*;
pub use parse::*;
pub use registry::*;
pub use types::TypeRegistry;
