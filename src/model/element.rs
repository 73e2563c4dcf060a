//! Element base data shared by every model node.
//!
//! There is no inheritance here: every node embeds [`ElementData`] (or
//! [`BackboneData`]) by composition and invokes the base checks explicitly
//! from its own `validate()`.

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::datatype::{
    CodeableConcept, Coding, Identifier, Money, Period, Quantity, Reference,
};
use crate::model::primitive::{Boolean, Code, Date, DateTime, Decimal, FhirString, Integer, Uri};
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

/// True when a node carries a primitive value, at least one child element,
/// or at least one extension (the ele-1 rule). The element `id` alone does
/// not count as content.
pub trait HasContent {
    /// Whether this node is non-empty in the ele-1 sense.
    fn has_meaningful_content(&self) -> bool;
}

/// Identity and extensibility shared by every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementData {
    /// Local identifier, unique only within the enclosing tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    /// Ordered side-channel annotations.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) extension: Vec<Extension>,
}

impl ElementData {
    /// Local element id, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Extensions attached to this element, in insertion order.
    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// True when at least one extension is present.
    pub fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }
}

/// Base data for backbone elements, which additionally carry modifier
/// extensions. Modifier extensions change the interpretation of the
/// enclosing element and must never be silently ignored by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackboneData {
    #[serde(flatten)]
    pub(crate) element: ElementData,

    /// Extensions that cannot be ignored.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneData {
    /// Local element id, if any.
    pub fn id(&self) -> Option<&str> {
        self.element.id()
    }

    /// Ordinary extensions.
    pub fn extension(&self) -> &[Extension] {
        &self.element.extension
    }

    /// Modifier extensions.
    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    /// True when any extension (ordinary or modifier) is present.
    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    /// The list checks shared by every backbone element, run first in the
    /// owning node's `validate()`.
    pub(crate) fn check(&self, checker: &mut Checker) {
        support::check_list(checker, &self.element.extension, "extension");
        support::check_list(checker, &self.modifier_extension, "modifierExtension");
    }

    /// Walk both extension lists, before the owning node's own fields.
    pub(crate) fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_list("modifierExtension", &self.modifier_extension, visitor)
    }
}

/// The value carried by an extension: exactly one of the declared types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtensionValue {
    /// A boolean value.
    Boolean(Boolean),
    /// A code value.
    Code(Code),
    /// A date value.
    Date(Date),
    /// A dateTime value.
    DateTime(DateTime),
    /// A decimal value.
    Decimal(Decimal),
    /// An integer value.
    Integer(Integer),
    /// A string value.
    String(FhirString),
    /// A uri value.
    Uri(Uri),
    /// A Coding value.
    Coding(Coding),
    /// A CodeableConcept value.
    CodeableConcept(CodeableConcept),
    /// An Identifier value.
    Identifier(Identifier),
    /// A Money value.
    Money(Money),
    /// A Period value.
    Period(Period),
    /// A Quantity value.
    Quantity(Quantity),
    /// A Reference value.
    Reference(Reference),
}

impl ExtensionValue {
    /// The declared closed set of type tags for `Extension.value`.
    pub const ALLOWED_TYPES: &'static [&'static str] = &[
        "boolean",
        "code",
        "date",
        "dateTime",
        "decimal",
        "integer",
        "string",
        "uri",
        "Coding",
        "CodeableConcept",
        "Identifier",
        "Money",
        "Period",
        "Quantity",
        "Reference",
    ];

    /// Type tag of the stored value.
    pub fn type_name(&self) -> &'static str {
        match self {
            ExtensionValue::Boolean(_) => "boolean",
            ExtensionValue::Code(_) => "code",
            ExtensionValue::Date(_) => "date",
            ExtensionValue::DateTime(_) => "dateTime",
            ExtensionValue::Decimal(_) => "decimal",
            ExtensionValue::Integer(_) => "integer",
            ExtensionValue::String(_) => "string",
            ExtensionValue::Uri(_) => "uri",
            ExtensionValue::Coding(_) => "Coding",
            ExtensionValue::CodeableConcept(_) => "CodeableConcept",
            ExtensionValue::Identifier(_) => "Identifier",
            ExtensionValue::Money(_) => "Money",
            ExtensionValue::Period(_) => "Period",
            ExtensionValue::Quantity(_) => "Quantity",
            ExtensionValue::Reference(_) => "Reference",
        }
    }
}

impl HasContent for ExtensionValue {
    fn has_meaningful_content(&self) -> bool {
        match self {
            ExtensionValue::Boolean(v) => v.has_meaningful_content(),
            ExtensionValue::Code(v) => v.has_meaningful_content(),
            ExtensionValue::Date(v) => v.has_meaningful_content(),
            ExtensionValue::DateTime(v) => v.has_meaningful_content(),
            ExtensionValue::Decimal(v) => v.has_meaningful_content(),
            ExtensionValue::Integer(v) => v.has_meaningful_content(),
            ExtensionValue::String(v) => v.has_meaningful_content(),
            ExtensionValue::Uri(v) => v.has_meaningful_content(),
            ExtensionValue::Coding(v) => v.has_meaningful_content(),
            ExtensionValue::CodeableConcept(v) => v.has_meaningful_content(),
            ExtensionValue::Identifier(v) => v.has_meaningful_content(),
            ExtensionValue::Money(v) => v.has_meaningful_content(),
            ExtensionValue::Period(v) => v.has_meaningful_content(),
            ExtensionValue::Quantity(v) => v.has_meaningful_content(),
            ExtensionValue::Reference(v) => v.has_meaningful_content(),
        }
    }
}

impl Visitable for ExtensionValue {
    fn node(&self) -> NodeRef<'_> {
        match self {
            ExtensionValue::Boolean(v) => v.node(),
            ExtensionValue::Code(v) => v.node(),
            ExtensionValue::Date(v) => v.node(),
            ExtensionValue::DateTime(v) => v.node(),
            ExtensionValue::Decimal(v) => v.node(),
            ExtensionValue::Integer(v) => v.node(),
            ExtensionValue::String(v) => v.node(),
            ExtensionValue::Uri(v) => v.node(),
            ExtensionValue::Coding(v) => v.node(),
            ExtensionValue::CodeableConcept(v) => v.node(),
            ExtensionValue::Identifier(v) => v.node(),
            ExtensionValue::Money(v) => v.node(),
            ExtensionValue::Period(v) => v.node(),
            ExtensionValue::Quantity(v) => v.node(),
            ExtensionValue::Reference(v) => v.node(),
        }
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        match self {
            ExtensionValue::Boolean(v) => v.visit_children(visitor),
            ExtensionValue::Code(v) => v.visit_children(visitor),
            ExtensionValue::Date(v) => v.visit_children(visitor),
            ExtensionValue::DateTime(v) => v.visit_children(visitor),
            ExtensionValue::Decimal(v) => v.visit_children(visitor),
            ExtensionValue::Integer(v) => v.visit_children(visitor),
            ExtensionValue::String(v) => v.visit_children(visitor),
            ExtensionValue::Uri(v) => v.visit_children(visitor),
            ExtensionValue::Coding(v) => v.visit_children(visitor),
            ExtensionValue::CodeableConcept(v) => v.visit_children(visitor),
            ExtensionValue::Identifier(v) => v.visit_children(visitor),
            ExtensionValue::Money(v) => v.visit_children(visitor),
            ExtensionValue::Period(v) => v.visit_children(visitor),
            ExtensionValue::Quantity(v) => v.visit_children(visitor),
            ExtensionValue::Reference(v) => v.visit_children(visitor),
        }
    }
}

/// A side-channel annotation: a `url` discriminator plus either a value or
/// nested extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extension {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<ExtensionValue>,
}

impl Extension {
    /// Start building an extension.
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::new()
    }

    /// Element id and nested extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The extension's discriminating url.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The stored value, if this is a value extension.
    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }

    /// Copy every field into a fresh builder for copy-with-modification.
    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            element: self.element.clone(),
            url: self.url.clone(),
            value: self.value.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Extension");
        support::require(&mut checker, self.url.as_ref(), "url");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::choice(
            &mut checker,
            self.value.as_ref().map(ExtensionValue::type_name),
            "value",
            ExtensionValue::ALLOWED_TYPES,
        );
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Extension {
    fn has_meaningful_content(&self) -> bool {
        self.value.is_some() || self.element.has_children()
    }
}

impl Visitable for Extension {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Extension(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("value", &self.value, visitor)
    }
}

/// Accumulates extension fields; immutable snapshot produced by [`build`].
///
/// [`build`]: ExtensionBuilder::build
#[derive(Debug, Clone)]
pub struct ExtensionBuilder {
    element: ElementData,
    url: Option<String>,
    value: Option<ExtensionValue>,
    validating: bool,
}

impl ExtensionBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            url: None,
            value: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    /// Append one nested extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.element.extension.push(extension);
        self
    }

    /// Replace the nested extension list.
    pub fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.element.extension = extension.into_iter().collect();
        self
    }

    /// Set the discriminating url.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the stored value.
    pub fn value(mut self, value: impl Into<ExtensionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Extension, ValidationFailure> {
        let extension = Extension {
            element: self.element,
            url: self.url,
            value: self.value,
        };
        if self.validating {
            extension.validate()?;
        }
        Ok(extension)
    }
}

impl From<Boolean> for ExtensionValue {
    fn from(value: Boolean) -> Self {
        ExtensionValue::Boolean(value)
    }
}

impl From<Integer> for ExtensionValue {
    fn from(value: Integer) -> Self {
        ExtensionValue::Integer(value)
    }
}

impl From<Decimal> for ExtensionValue {
    fn from(value: Decimal) -> Self {
        ExtensionValue::Decimal(value)
    }
}

impl From<Date> for ExtensionValue {
    fn from(value: Date) -> Self {
        ExtensionValue::Date(value)
    }
}

impl From<DateTime> for ExtensionValue {
    fn from(value: DateTime) -> Self {
        ExtensionValue::DateTime(value)
    }
}

// `string`, `code` and `uri` share one Rust carrier type, so only the
// `string` tag gets a From impl; the other two are constructed explicitly.
impl From<FhirString> for ExtensionValue {
    fn from(value: FhirString) -> Self {
        ExtensionValue::String(value)
    }
}

impl From<Coding> for ExtensionValue {
    fn from(value: Coding) -> Self {
        ExtensionValue::Coding(value)
    }
}

impl From<CodeableConcept> for ExtensionValue {
    fn from(value: CodeableConcept) -> Self {
        ExtensionValue::CodeableConcept(value)
    }
}

impl From<Identifier> for ExtensionValue {
    fn from(value: Identifier) -> Self {
        ExtensionValue::Identifier(value)
    }
}

impl From<Money> for ExtensionValue {
    fn from(value: Money) -> Self {
        ExtensionValue::Money(value)
    }
}

impl From<Period> for ExtensionValue {
    fn from(value: Period) -> Self {
        ExtensionValue::Period(value)
    }
}

impl From<Quantity> for ExtensionValue {
    fn from(value: Quantity) -> Self {
        ExtensionValue::Quantity(value)
    }
}

impl From<Reference> for ExtensionValue {
    fn from(value: Reference) -> Self {
        ExtensionValue::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn extension_requires_url() {
        let err = Extension::builder()
            .value(ExtensionValue::Boolean(true.into()))
            .build()
            .unwrap_err();
        assert!(err.names("Extension.url"));
        assert!(
            err.errors()
                .all(|issue| issue.violation == Violation::MissingRequiredField)
        );
    }

    #[test]
    fn extension_with_only_url_is_empty() {
        let err = Extension::builder()
            .url("http://example.org/fhir/StructureDefinition/flag")
            .build()
            .unwrap_err();
        assert!(
            err.errors()
                .any(|issue| issue.violation == Violation::EmptyElementViolation)
        );
    }

    #[test]
    fn nested_extensions_count_as_children() {
        let inner = Extension::builder()
            .url("part")
            .value(ExtensionValue::String("ok".into()))
            .build()
            .unwrap();
        let outer = Extension::builder()
            .url("http://example.org/fhir/StructureDefinition/complex")
            .extension(inner)
            .build()
            .unwrap();
        assert!(outer.has_meaningful_content());
        assert!(outer.value().is_none());
    }

    #[test]
    fn lenient_build_skips_all_checks() {
        let extension = Extension::builder().validating(false).build().unwrap();
        assert!(extension.url().is_none());
        assert!(!extension.has_meaningful_content());
    }

    #[test]
    fn to_builder_round_trips() {
        let original = Extension::builder()
            .id("ext-1")
            .url("http://example.org/fhir/StructureDefinition/flag")
            .value(ExtensionValue::Boolean(true.into()))
            .build()
            .unwrap();
        let rebuilt = original.to_builder().build().unwrap();
        assert_eq!(original, rebuilt);
    }
}
