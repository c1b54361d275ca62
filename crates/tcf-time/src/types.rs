//! Runtime type registration
//!
//! Dispatch asks "what is this value" through identity predicates registered
//! per tag. A tag that was never registered is invisible to signature lookup.

use std::fmt;

use tcf_core::{TypeTag, Value};

/// Identity predicate for a tag
pub type TypeTest = fn(&Value) -> bool;

/// Registered type tags, in registration order
#[derive(Clone, Default)]
pub struct TypeRegistry {
    entries: Vec<(TypeTag, TypeTest)>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tag` with its predicate
    ///
    /// Idempotent: a tag that is already present keeps its first predicate
    /// and `false` is returned.
    pub fn register(&mut self, tag: TypeTag, test: TypeTest) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.entries.push((tag, test));
        true
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.entries.iter().any(|(t, _)| *t == tag)
    }

    /// Does `value` belong to `tag`? False for unregistered tags.
    pub fn is(&self, tag: TypeTag, value: &Value) -> bool {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .is_some_and(|(_, test)| test(value))
    }

    /// First registered tag whose predicate accepts `value`
    pub fn type_of(&self, value: &Value) -> Option<TypeTag> {
        self.entries
            .iter()
            .find(|(_, test)| test(value))
            .map(|(tag, _)| *tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.entries.iter().map(|(tag, _)| *tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tags()).finish()
    }
}

pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Boolean(_))
}

pub fn is_quantity(value: &Value) -> bool {
    matches!(value, Value::Quantity(_))
}

pub fn is_instant(value: &Value) -> bool {
    matches!(value, Value::Instant(_))
}

pub fn is_duration(value: &Value) -> bool {
    matches!(value, Value::Duration(_))
}

/// Tags the host evaluator knows natively
pub fn register_host_types(registry: &mut TypeRegistry) {
    registry.register(TypeTag::Number, is_number);
    registry.register(TypeTag::Boolean, is_boolean);
    registry.register(TypeTag::Quantity, is_quantity);
}

/// Tags contributed by the time extension
pub fn register_time_types(registry: &mut TypeRegistry) {
    registry.register(TypeTag::Instant, is_instant);
    registry.register(TypeTag::Duration, is_duration);
}
