//! Primitive element types.
//!
//! Every FHIR primitive is a value plus the shared element base (id and
//! extensions), so one generic carrier covers the whole catalog. A primitive
//! with no value and no extensions is an empty placeholder; lists reject
//! such entries and `build()` rejects such nodes.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::element::{ElementData, Extension, HasContent};
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

/// Value types that can sit inside a [`Primitive`] carrier.
pub trait PrimitiveValue: Sized {
    /// FHIR type tag for this value kind.
    const TYPE_NAME: &'static str;

    /// The node-kind variant for traversal.
    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_>;
}

/// Generic primitive carrier: an optional value plus id/extensions.
///
/// The value is optional because an extension-only primitive (value absent,
/// extensions present) is a legal FHIR construct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Primitive<V> {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<V>,
}

/// A true/false value.
pub type Boolean = Primitive<bool>;
/// A sequence of Unicode characters.
pub type FhirString = Primitive<String>;
/// A coded value drawn from some code system. Shares its carrier with
/// [`FhirString`]; the distinction lives in the declaring field.
pub type Code = Primitive<String>;
/// A uniform resource identifier.
pub type Uri = Primitive<String>;
/// A signed 32-bit integer.
pub type Integer = Primitive<i32>;
/// An integer greater than zero.
pub type PositiveInt = Primitive<NonZeroU32>;
/// A rational number with explicit precision.
pub type Decimal = Primitive<rust_decimal::Decimal>;
/// A date with day precision.
pub type Date = Primitive<chrono::NaiveDate>;
/// An instant in time with timezone offset.
pub type DateTime = Primitive<chrono::DateTime<chrono::FixedOffset>>;

impl<V> Primitive<V> {
    /// Wrap a plain value with no id or extensions. Always structurally
    /// valid, so no fallible build step is needed.
    pub fn of(value: V) -> Self {
        Self {
            element: ElementData::default(),
            value: Some(value),
        }
    }

    /// Start building a primitive, e.g. to attach extensions.
    pub fn builder() -> PrimitiveBuilder<V> {
        PrimitiveBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The stored value, if present.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }
}

impl<V: Clone> Primitive<V> {
    /// Copy every field into a fresh builder for copy-with-modification.
    pub fn to_builder(&self) -> PrimitiveBuilder<V> {
        PrimitiveBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
            validating: true,
        }
    }
}

impl<V: PrimitiveValue> Primitive<V> {
    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new(V::TYPE_NAME);
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl<V> HasContent for Primitive<V> {
    fn has_meaningful_content(&self) -> bool {
        self.value.is_some() || self.element.has_children()
    }
}

impl<V: PrimitiveValue> Visitable for Primitive<V> {
    fn node(&self) -> NodeRef<'_> {
        V::node_ref(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)
    }
}

/// Accumulates primitive fields; immutable snapshot produced by
/// [`PrimitiveBuilder::build`].
#[derive(Debug, Clone)]
pub struct PrimitiveBuilder<V> {
    element: ElementData,
    value: Option<V>,
    validating: bool,
}

impl<V> PrimitiveBuilder<V> {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            value: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.element.extension.push(extension);
        self
    }

    /// Replace the extension list.
    pub fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.element.extension = extension.into_iter().collect();
        self
    }

    /// Set the stored value.
    pub fn value(mut self, value: impl Into<V>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }
}

impl<V: PrimitiveValue> PrimitiveBuilder<V> {
    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Primitive<V>, ValidationFailure> {
        let primitive = Primitive {
            element: self.element,
            value: self.value,
        };
        if self.validating {
            primitive.validate()?;
        }
        Ok(primitive)
    }
}

impl PrimitiveValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::Boolean(primitive)
    }
}

impl PrimitiveValue for String {
    const TYPE_NAME: &'static str = "string";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::String(primitive)
    }
}

impl PrimitiveValue for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::Integer(primitive)
    }
}

impl PrimitiveValue for NonZeroU32 {
    const TYPE_NAME: &'static str = "positiveInt";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::PositiveInt(primitive)
    }
}

impl PrimitiveValue for rust_decimal::Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::Decimal(primitive)
    }
}

impl PrimitiveValue for chrono::NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::Date(primitive)
    }
}

impl PrimitiveValue for chrono::DateTime<chrono::FixedOffset> {
    const TYPE_NAME: &'static str = "dateTime";

    fn node_ref(primitive: &Primitive<Self>) -> NodeRef<'_> {
        NodeRef::DateTime(primitive)
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Boolean::of(value)
    }
}

impl From<&str> for FhirString {
    fn from(value: &str) -> Self {
        FhirString::of(value.to_string())
    }
}

impl From<String> for FhirString {
    fn from(value: String) -> Self {
        FhirString::of(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Integer::of(value)
    }
}

impl From<NonZeroU32> for PositiveInt {
    fn from(value: NonZeroU32) -> Self {
        PositiveInt::of(value)
    }
}

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Decimal::of(value)
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        Date::of(value)
    }
}

impl From<chrono::DateTime<chrono::FixedOffset>> for DateTime {
    fn from(value: chrono::DateTime<chrono::FixedOffset>) -> Self {
        DateTime::of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use crate::model::element::ExtensionValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn of_carries_the_value() {
        let status = Code::of("active".to_string());
        assert_eq!(status.value().map(String::as_str), Some("active"));
        assert!(status.has_meaningful_content());
    }

    #[test]
    fn default_primitive_is_an_empty_placeholder() {
        let empty = FhirString::default();
        assert!(!empty.has_meaningful_content());
        let err = empty.validate().unwrap_err();
        assert!(
            err.errors()
                .any(|issue| issue.violation == Violation::EmptyElementViolation)
        );
    }

    #[test]
    fn extension_only_primitive_is_valid() {
        let extension = Extension::builder()
            .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
            .value(ExtensionValue::Code(Code::of("unknown".to_string())))
            .build()
            .unwrap();
        let absent = FhirString::builder().extension(extension).build().unwrap();
        assert!(absent.value().is_none());
        assert!(absent.has_meaningful_content());
    }

    #[test]
    fn builder_round_trip_preserves_structure() {
        let original = Boolean::builder().id("b1").value(true).build().unwrap();
        let rebuilt = original.to_builder().build().unwrap();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn empty_extension_entry_is_reported_with_its_index() {
        let err = FhirString::builder()
            .value("text")
            .extension(Extension::builder().validating(false).build().unwrap())
            .build()
            .unwrap_err();
        assert!(
            err.errors()
                .any(|issue| issue.violation == Violation::NullListElement { index: 0 })
        );
    }
}
