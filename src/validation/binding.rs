//! Terminology binding declarations and the value-set oracle.
//!
//! Generated `validate()` bodies pass literal value-set URLs and code lists
//! for the bindings baked into the schema. The [`ValueSetProvider`] trait is
//! the seam for an external terminology service; [`StaticValueSets`] is the
//! in-memory implementation used by the checks and by tests.

use indexmap::{IndexMap, IndexSet};

/// How strictly a coded element must draw from its bound value set.
/// Only `Required` is build-time fatal; the weaker strengths are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindingStrength {
    /// Any code is acceptable; the set is illustrative.
    Example,
    /// The set is preferred but not enforced.
    Preferred,
    /// Codes outside the set are allowed when no concept applies.
    Extensible,
    /// The code must come from the bound set.
    Required,
}

impl BindingStrength {
    /// True when a miss must fail validation.
    pub fn is_fatal(self) -> bool {
        self == BindingStrength::Required
    }
}

/// A terminology binding: a value-set URL plus its strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// URL of the bound value set.
    pub value_set: String,
    /// Binding strength.
    pub strength: BindingStrength,
}

impl Binding {
    /// Declare a binding.
    pub fn new(value_set: impl Into<String>, strength: BindingStrength) -> Self {
        Self {
            value_set: value_set.into(),
            strength,
        }
    }
}

/// The pure boolean oracle for "is code X a member of value set Y".
///
/// Implementations must answer synchronously from local data; validation
/// never performs I/O.
pub trait ValueSetProvider {
    /// Membership test for `code` in the set identified by `value_set`.
    fn contains(&self, value_set: &str, code: &str) -> bool;
}

/// In-memory value sets, order-stable for deterministic messages.
#[derive(Debug, Clone, Default)]
pub struct StaticValueSets {
    sets: IndexMap<String, IndexSet<String>>,
}

impl StaticValueSets {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or extend) a value set with the given codes.
    pub fn insert<I, S>(&mut self, value_set: impl Into<String>, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .entry(value_set.into())
            .or_default()
            .extend(codes.into_iter().map(Into::into));
    }

    /// Builder-style variant of [`insert`].
    ///
    /// [`insert`]: StaticValueSets::insert
    pub fn with<I, S>(mut self, value_set: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(value_set, codes);
        self
    }
}

impl ValueSetProvider for StaticValueSets {
    fn contains(&self, value_set: &str, code: &str) -> bool {
        self.sets
            .get(value_set)
            .is_some_and(|codes| codes.contains(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FM_STATUS: &str = "http://hl7.org/fhir/ValueSet/fm-status";

    #[test]
    fn membership_is_per_set() {
        let sets = StaticValueSets::new()
            .with(FM_STATUS, ["active", "cancelled", "draft", "entered-in-error"]);
        assert!(sets.contains(FM_STATUS, "active"));
        assert!(!sets.contains(FM_STATUS, "complete"));
        assert!(!sets.contains("http://example.org/other", "active"));
    }

    #[test]
    fn only_required_strength_is_fatal() {
        assert!(BindingStrength::Required.is_fatal());
        assert!(!BindingStrength::Extensible.is_fatal());
        assert!(!BindingStrength::Preferred.is_fatal());
        assert!(!BindingStrength::Example.is_fatal());
    }
}
