//! Operator registry - resolves operator name plus operand types to an implementation
//!
//! Built once, immutable afterwards, and passed by reference to whoever
//! evaluates expressions. Lookup is an exact match on
//! `(operator, left tag, right tag)`; when nothing matches, the host's own
//! arithmetic gets the call.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace};

use tcf_core::{host, Operator, TcfResult, TypeTag, Unit, Value};

use crate::operators::install_time_operators;
use crate::types::{register_host_types, register_time_types, TypeRegistry, TypeTest};

/// Binary operator implementation
pub type BinaryFn = fn(&Value, &Value) -> TcfResult<Value>;

/// `to` implementation: value plus target unit
pub type ConvertFn = fn(&Value, &'static Unit) -> TcfResult<Value>;

/// Collects types and signatures before freezing them into a registry
#[derive(Default)]
pub struct OperatorRegistryBuilder {
    types: TypeRegistry,
    binary: HashMap<(Operator, TypeTag, TypeTag), BinaryFn>,
    conversions: HashMap<TypeTag, ConvertFn>,
}

impl OperatorRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_type(&mut self, tag: TypeTag, test: TypeTest) -> &mut Self {
        self.types.register(tag, test);
        self
    }

    /// Register a signature; the first implementation for a key wins
    pub fn signature(
        &mut self,
        op: Operator,
        left: TypeTag,
        right: TypeTag,
        f: BinaryFn,
    ) -> &mut Self {
        self.binary.entry((op, left, right)).or_insert(f);
        self
    }

    /// Register a `to` conversion; the first implementation for a tag wins
    pub fn conversion(&mut self, tag: TypeTag, f: ConvertFn) -> &mut Self {
        self.conversions.entry(tag).or_insert(f);
        self
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn build(self) -> OperatorRegistry {
        debug!(
            types = self.types.len(),
            signatures = self.binary.len(),
            conversions = self.conversions.len(),
            "operator registry built"
        );
        OperatorRegistry {
            types: self.types,
            binary: self.binary,
            conversions: self.conversions,
        }
    }
}

/// Immutable dispatch table
pub struct OperatorRegistry {
    types: TypeRegistry,
    binary: HashMap<(Operator, TypeTag, TypeTag), BinaryFn>,
    conversions: HashMap<TypeTag, ConvertFn>,
}

static SHARED: OnceLock<Arc<OperatorRegistry>> = OnceLock::new();

impl OperatorRegistry {
    pub fn builder() -> OperatorRegistryBuilder {
        OperatorRegistryBuilder::new()
    }

    /// Host types plus the full time catalogue
    pub fn standard() -> Self {
        let mut builder = OperatorRegistry::builder();
        register_host_types(builder.types_mut());
        register_time_types(builder.types_mut());
        install_time_operators(&mut builder);
        builder.build()
    }

    /// Process-wide standard registry, built on first use
    pub fn shared() -> Arc<OperatorRegistry> {
        SHARED
            .get_or_init(|| Arc::new(OperatorRegistry::standard()))
            .clone()
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Implementation registered for exactly this operand pair
    pub fn resolve(&self, op: Operator, left: TypeTag, right: TypeTag) -> Option<BinaryFn> {
        self.binary.get(&(op, left, right)).copied()
    }

    /// Apply `op`, falling back to host arithmetic when no signature matches
    pub fn apply(&self, op: Operator, a: &Value, b: &Value) -> TcfResult<Value> {
        let tags = self.types.type_of(a).zip(self.types.type_of(b));
        if let Some(f) = tags.and_then(|(left, right)| self.resolve(op, left, right)) {
            trace!(%op, left = %a.tag(), right = %b.tag(), "signature hit");
            return f(a, b);
        }
        debug!(%op, left = %a.tag(), right = %b.tag(), "no signature, deferring to host");
        host::apply(op, a, b)
    }

    /// Apply `to`, falling back to host conversion
    pub fn convert(&self, value: &Value, unit: &'static Unit) -> TcfResult<Value> {
        let f = self
            .types
            .type_of(value)
            .and_then(|tag| self.conversions.get(&tag).copied());
        match f {
            Some(f) => f(value, unit),
            None => host::convert(value, unit),
        }
    }

    /// Operand pairs registered for `op`, sorted
    pub fn signatures(&self, op: Operator) -> Vec<(TypeTag, TypeTag)> {
        if op == Operator::To {
            return Vec::new();
        }
        self.binary
            .keys()
            .filter(|(o, _, _)| *o == op)
            .map(|(_, l, r)| (*l, *r))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tags with a registered `to` conversion, sorted
    pub fn conversions(&self) -> Vec<TypeTag> {
        let mut tags: Vec<_> = self.conversions.keys().copied().collect();
        tags.sort();
        tags
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("types", &self.types)
            .field("signatures", &self.binary.len())
            .field("conversions", &self.conversions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcf_core::{Duration, Instant, TcfError};

    fn dur(millis: f64) -> Value {
        Value::Duration(Duration::from_milliseconds(millis).unwrap())
    }

    #[test]
    fn test_standard_catalogue() {
        use TypeTag::{Duration as D, Instant as I, Number as N};
        let registry = OperatorRegistry::standard();

        // sorted by tag order: Number, Boolean, Quantity, Instant, Duration
        assert_eq!(registry.signatures(Operator::Add), vec![(I, D), (D, I), (D, D)]);
        assert_eq!(registry.signatures(Operator::Subtract).len(), 3);
        assert_eq!(registry.signatures(Operator::Multiply), vec![(N, D), (D, N)]);
        assert_eq!(registry.signatures(Operator::Divide).len(), 2);
        for op in Operator::ALL.into_iter().filter(|op| op.is_relational()) {
            assert_eq!(registry.signatures(op), vec![(I, I), (D, D)]);
        }
        assert_eq!(registry.signatures(Operator::Compare), vec![(I, I), (D, D)]);
        assert_eq!(registry.conversions(), vec![I, D]);
    }

    #[test]
    fn test_numbers_are_not_intercepted() {
        let registry = OperatorRegistry::standard();
        assert!(registry
            .resolve(Operator::Add, TypeTag::Number, TypeTag::Number)
            .is_none());
        let sum = registry
            .apply(Operator::Add, &Value::Number(2.0), &Value::Number(3.0))
            .unwrap();
        assert_eq!(sum, Value::Number(5.0));
    }

    #[test]
    fn test_unmatched_pair_fails_in_host() {
        let registry = OperatorRegistry::standard();
        let i = Value::Instant(Instant::UNIX_EPOCH);
        let err = registry.apply(Operator::Add, &i, &i).unwrap_err();
        assert_eq!(
            err,
            TcfError::UnsupportedOperation {
                operator: Operator::Add,
                left: "Instant",
                right: "Instant",
            }
        );
    }

    #[test]
    fn test_first_signature_wins() {
        fn always_zero(_: &Value, _: &Value) -> TcfResult<Value> {
            Ok(Value::Number(0.0))
        }
        let mut builder = OperatorRegistry::builder();
        register_time_types(builder.types_mut());
        install_time_operators(&mut builder);
        builder.signature(Operator::Add, TypeTag::Duration, TypeTag::Duration, always_zero);
        install_time_operators(&mut builder);
        let registry = builder.build();

        let sum = registry.apply(Operator::Add, &dur(1.0), &dur(2.0)).unwrap();
        assert_eq!(sum, dur(3.0));
        assert_eq!(registry.signatures(Operator::Add).len(), 3);
    }

    #[test]
    fn test_unregistered_types_fall_back() {
        let mut builder = OperatorRegistry::builder();
        install_time_operators(&mut builder);
        let registry = builder.build();

        // signatures exist, but the registry cannot tell what a Duration is
        let err = registry.apply(Operator::Add, &dur(1.0), &dur(2.0)).unwrap_err();
        assert!(matches!(err, TcfError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_convert_falls_back_to_host() {
        let registry = OperatorRegistry::standard();
        let min = Unit::parse("min").unwrap();
        let q = Value::Quantity(tcf_core::Quantity::parse(2.0, "h").unwrap());
        let out = registry.convert(&q, min).unwrap();
        assert_eq!(out, Value::Quantity(tcf_core::Quantity::new(120.0, min)));

        let err = registry.convert(&Value::Boolean(true), min).unwrap_err();
        assert!(matches!(err, TcfError::UnsupportedOperation { operator: Operator::To, .. }));
    }

    #[test]
    fn test_shared_is_built_once() {
        let a = OperatorRegistry::shared();
        let b = OperatorRegistry::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
