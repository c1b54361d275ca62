//! Time Engine - the evaluator-facing surface of the time extension
//!
//! Bundles the operator registry, clock, text parsers and configuration, and
//! exposes the functions the evaluator installs: `instant`, `duration`,
//! `now`, the operator catalogue and `format`.

use std::sync::Arc;

use jiff::Zoned;

use tcf_core::{Duration, Instant, Operator, TcfResult, Unit, Value};

use crate::coerce::{self, RawInput};
use crate::format::format_value;
use crate::{
    Clock, DateTextParser, DurationTextParser, HumanDurationParser, NaturalDateParser,
    OperatorRegistry, SystemClock, TimeEngineConfig,
};

/// Time extension facade
pub struct TimeEngine {
    /// Dispatch table
    registry: Arc<OperatorRegistry>,
    /// Source of "now"
    clock: Arc<dyn Clock>,
    dates: Box<dyn DateTextParser>,
    durations: Box<dyn DurationTextParser>,
    config: TimeEngineConfig,
}

impl TimeEngine {
    /// Create a Time Engine with default configuration
    pub fn new() -> Self {
        Self::with_config(TimeEngineConfig::default())
    }

    /// Create a Time Engine with custom configuration
    pub fn with_config(config: TimeEngineConfig) -> Self {
        TimeEngine {
            registry: OperatorRegistry::shared(),
            clock: Arc::new(SystemClock),
            dates: Box::new(NaturalDateParser::new()),
            durations: Box::new(HumanDurationParser),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_registry(mut self, registry: Arc<OperatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_date_parser(mut self, parser: impl DateTextParser + 'static) -> Self {
        self.dates = Box::new(parser);
        self
    }

    pub fn with_duration_parser(mut self, parser: impl DurationTextParser + 'static) -> Self {
        self.durations = Box::new(parser);
        self
    }

    pub fn config(&self) -> &TimeEngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Current moment
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Current moment as a civil datetime in the configured zone
    fn reference(&self) -> Zoned {
        self.now()
            .as_timestamp()
            .to_zoned(self.config.time_zone.clone())
    }

    /// `instant(x)`: text, quantity of time, or an Instant
    pub fn instant<'a>(&self, input: impl Into<RawInput<'a>>) -> TcfResult<Instant> {
        coerce::to_instant(input.into(), self.dates.as_ref(), &self.reference())
    }

    /// `duration(x)`: text, quantity of time, or a Duration
    pub fn duration<'a>(&self, input: impl Into<RawInput<'a>>) -> TcfResult<Duration> {
        coerce::to_duration(input.into(), self.durations.as_ref())
    }

    /// Apply a binary operator
    pub fn apply(&self, op: Operator, a: &Value, b: &Value) -> TcfResult<Value> {
        self.registry.apply(op, a, b)
    }

    /// Apply a binary operator by its evaluator name, e.g. `"largerEq"`
    pub fn apply_named(&self, name: &str, a: &Value, b: &Value) -> TcfResult<Value> {
        let op: Operator = name.parse()?;
        if op == Operator::To {
            return Err(tcf_core::host::unsupported(
                op,
                a.tag().name(),
                b.tag().name(),
            ));
        }
        self.apply(op, a, b)
    }

    /// `to(x, unit)`
    pub fn to(&self, value: &Value, unit: &str) -> TcfResult<Value> {
        self.registry.convert(value, Unit::parse(unit)?)
    }

    /// Render a value for display
    pub fn format(&self, value: &Value) -> TcfResult<String> {
        format_value(value, &self.config, self.now())
    }
}

impl Default for TimeEngine {
    fn default() -> Self {
        Self::new()
    }
}
