//! General-purpose complex datatypes used by resources.
//!
//! Every type here follows the same mechanical shape the generator emits:
//! private fields, a chainable builder as the only way to construct, a
//! `validate()` that collects every violation for the node, and a
//! `to_builder()` snapshot for copy-with-modification.

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::element::{ElementData, Extension, HasContent};
use crate::model::primitive::{Boolean, Code, DateTime, Decimal, FhirString, Uri};
use crate::validation::binding::BindingStrength;
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

const IDENTIFIER_USE_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/identifier-use";
const IDENTIFIER_USE_CODES: &[&str] = &["usual", "official", "temp", "secondary", "old"];
const QUANTITY_COMPARATOR_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/quantity-comparator";
const QUANTITY_COMPARATOR_CODES: &[&str] = &["<", "<=", ">=", ">"];
const NARRATIVE_STATUS_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/narrative-status";
const NARRATIVE_STATUS_CODES: &[&str] = &["generated", "extensions", "additional", "empty"];

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    user_selected: Option<Boolean>,
}

impl Coding {
    /// Start building a Coding.
    pub fn builder() -> CodingBuilder {
        CodingBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The code system URI.
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    /// The system version used when selecting the code.
    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    /// The symbol defined by the system.
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// Display text defined by the system.
    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// Whether the coding was chosen directly by the user.
    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            element: self.element.clone(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Coding");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Coding {
    fn has_meaningful_content(&self) -> bool {
        self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
            || self.element.has_children()
    }
}

impl Visitable for Coding {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Coding(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("system", &self.system, visitor)?;
        visit::walk_field("version", &self.version, visitor)?;
        visit::walk_field("code", &self.code, visitor)?;
        visit::walk_field("display", &self.display, visitor)?;
        visit::walk_field("userSelected", &self.user_selected, visitor)
    }
}

/// Builder for [`Coding`].
#[derive(Debug, Clone)]
pub struct CodingBuilder {
    element: ElementData,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
    validating: bool,
}

impl CodingBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            system: None,
            version: None,
            code: None,
            display: None,
            user_selected: None,
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

    /// Set the code system URI.
    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the system version.
    pub fn version(mut self, version: impl Into<FhirString>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the code.
    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the display text.
    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set the user-selected flag.
    pub fn user_selected(mut self, user_selected: impl Into<Boolean>) -> Self {
        self.user_selected = Some(user_selected.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Coding, ValidationFailure> {
        let coding = Coding {
            element: self.element,
            system: self.system,
            version: self.version,
            code: self.code,
            display: self.display,
            user_selected: self.user_selected,
        };
        if self.validating {
            coding.validate()?;
        }
        Ok(coding)
    }
}

/// A concept, expressed as one or more codings plus optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<FhirString>,
}

impl CodeableConcept {
    /// Start building a CodeableConcept.
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The codings, in insertion order.
    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    /// The plain-text rendition of the concept.
    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            element: self.element.clone(),
            coding: self.coding.clone(),
            text: self.text.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("CodeableConcept");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::check_list(&mut checker, &self.coding, "coding");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for CodeableConcept {
    fn has_meaningful_content(&self) -> bool {
        !self.coding.is_empty() || self.text.is_some() || self.element.has_children()
    }
}

impl Visitable for CodeableConcept {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::CodeableConcept(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_list("coding", &self.coding, visitor)?;
        visit::walk_field("text", &self.text, visitor)
    }
}

/// Builder for [`CodeableConcept`].
#[derive(Debug, Clone)]
pub struct CodeableConceptBuilder {
    element: ElementData,
    coding: Vec<Coding>,
    text: Option<FhirString>,
    validating: bool,
}

impl CodeableConceptBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            coding: Vec::new(),
            text: None,
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

    /// Append one coding.
    pub fn coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    /// Replace the coding list.
    pub fn set_coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().collect();
        self
    }

    /// Set the free-text rendition.
    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<CodeableConcept, ValidationFailure> {
        let concept = CodeableConcept {
            element: self.element,
            coding: self.coding,
            text: self.text,
        };
        if self.validating {
            concept.validate()?;
        }
        Ok(concept)
    }
}

/// A time range bounded by optional start and end instants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<DateTime>,
}

impl Period {
    /// Start building a Period.
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            element: self.element.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Period");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Period {
    fn has_meaningful_content(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.element.has_children()
    }
}

impl Visitable for Period {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Period(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("start", &self.start, visitor)?;
        visit::walk_field("end", &self.end, visitor)
    }
}

/// Builder for [`Period`].
#[derive(Debug, Clone)]
pub struct PeriodBuilder {
    element: ElementData,
    start: Option<DateTime>,
    end: Option<DateTime>,
    validating: bool,
}

impl PeriodBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            start: None,
            end: None,
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

    /// Set the lower bound.
    pub fn start(mut self, start: impl Into<DateTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the upper bound.
    pub fn end(mut self, end: impl Into<DateTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Period, ValidationFailure> {
        let period = Period {
            element: self.element,
            start: self.start,
            end: self.end,
        };
        if self.validating {
            period.validate()?;
        }
        Ok(period)
    }
}

/// A typed pointer to another resource. A reference does not own its
/// target; it is a weak, resolvable relationship via literal value,
/// logical identifier, or an inline contained resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<FhirString>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<FhirString>,
}

impl Reference {
    /// Start building a Reference.
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::new()
    }

    /// Convenience for the common case: a relative literal reference.
    pub fn to(literal: impl Into<FhirString>) -> ReferenceBuilder {
        ReferenceBuilder::new().reference(literal)
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The literal reference element.
    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    /// The literal reference value, when present.
    pub fn literal(&self) -> Option<&str> {
        self.reference
            .as_ref()
            .and_then(|r| r.value())
            .map(String::as_str)
    }

    /// The explicit target type marker.
    pub fn type_(&self) -> Option<&Uri> {
        self.type_.as_ref()
    }

    /// Logical identifier of the target.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Display text for the target.
    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            element: self.element.clone(),
            reference: self.reference.clone(),
            type_: self.type_.clone(),
            identifier: self.identifier.clone().map(Box::new),
            display: self.display.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Reference");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Reference {
    fn has_meaningful_content(&self) -> bool {
        self.reference.is_some()
            || self.type_.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
            || self.element.has_children()
    }
}

impl Visitable for Reference {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Reference(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("reference", &self.reference, visitor)?;
        visit::walk_field("type", &self.type_, visitor)?;
        visit::walk_field("identifier", &self.identifier, visitor)?;
        visit::walk_field("display", &self.display, visitor)
    }
}

/// Builder for [`Reference`].
#[derive(Debug, Clone)]
pub struct ReferenceBuilder {
    element: ElementData,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    // Boxed to keep the mutual Identifier/Reference recursion finite.
    identifier: Option<Box<Identifier>>,
    display: Option<FhirString>,
    validating: bool,
}

impl ReferenceBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            reference: None,
            type_: None,
            identifier: None,
            display: None,
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

    /// Set the literal reference.
    pub fn reference(mut self, reference: impl Into<FhirString>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the explicit target type marker.
    pub fn type_(mut self, type_: impl Into<Uri>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the logical identifier.
    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(Box::new(identifier));
        self
    }

    /// Set the display text.
    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Reference, ValidationFailure> {
        let reference = Reference {
            element: self.element,
            reference: self.reference,
            type_: self.type_,
            identifier: self.identifier.map(|boxed| *boxed),
            display: self.display,
        };
        if self.validating {
            reference.validate()?;
        }
        Ok(reference)
    }
}

/// A business identifier for an object, scoped by a system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(flatten)]
    element: ElementData,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    use_: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    assigner: Option<Box<Reference>>,
}

impl Identifier {
    /// The allowed target kinds for `assigner`.
    pub const ASSIGNER_TARGETS: &'static [&'static str] = &["Organization"];

    /// Start building an Identifier.
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The purpose of this identifier.
    pub fn use_(&self) -> Option<&Code> {
        self.use_.as_ref()
    }

    /// Namespace for the identifier value.
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    /// The identifier value, unique within the system.
    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    /// When the identifier is or was valid.
    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// The organization that issued the identifier.
    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            element: self.element.clone(),
            use_: self.use_.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Identifier");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::value_set_binding(
            &mut checker,
            self.use_.as_ref(),
            "use",
            BindingStrength::Required,
            IDENTIFIER_USE_VALUE_SET,
            IDENTIFIER_USE_CODES,
        );
        support::reference_type(
            &mut checker,
            self.assigner.as_deref(),
            "assigner",
            Self::ASSIGNER_TARGETS,
        );
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Identifier {
    fn has_meaningful_content(&self) -> bool {
        self.use_.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
            || self.element.has_children()
    }
}

impl Visitable for Identifier {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Identifier(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("use", &self.use_, visitor)?;
        visit::walk_field("system", &self.system, visitor)?;
        visit::walk_field("value", &self.value, visitor)?;
        visit::walk_field("period", &self.period, visitor)?;
        if let Some(assigner) = self.assigner.as_deref() {
            visit::walk("assigner", None, assigner, visitor)?;
        }
        ControlFlow::Continue(())
    }
}

/// Builder for [`Identifier`].
#[derive(Debug, Clone)]
pub struct IdentifierBuilder {
    element: ElementData,
    use_: Option<Code>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
    validating: bool,
}

impl IdentifierBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            use_: None,
            system: None,
            value: None,
            period: None,
            assigner: None,
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

    /// Set the identifier purpose code.
    pub fn use_(mut self, use_: impl Into<Code>) -> Self {
        self.use_ = Some(use_.into());
        self
    }

    /// Set the identifier namespace.
    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the identifier value.
    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the validity period.
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Set the issuing organization.
    pub fn assigner(mut self, assigner: Reference) -> Self {
        self.assigner = Some(Box::new(assigner));
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Identifier, ValidationFailure> {
        let identifier = Identifier {
            element: self.element,
            use_: self.use_,
            system: self.system,
            value: self.value,
            period: self.period,
            assigner: self.assigner,
        };
        if self.validating {
            identifier.validate()?;
        }
        Ok(identifier)
    }
}

/// A measured amount: value, optional comparator, and coded unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    comparator: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<Code>,
}

impl Quantity {
    /// Start building a Quantity.
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The numeric value.
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// How to interpret the value, e.g. `<`.
    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    /// Human-readable unit.
    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    /// System defining the coded unit.
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    /// Coded form of the unit.
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Quantity");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::value_set_binding(
            &mut checker,
            self.comparator.as_ref(),
            "comparator",
            BindingStrength::Required,
            QUANTITY_COMPARATOR_VALUE_SET,
            QUANTITY_COMPARATOR_CODES,
        );
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Quantity {
    fn has_meaningful_content(&self) -> bool {
        self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
            || self.element.has_children()
    }
}

impl Visitable for Quantity {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Quantity(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("value", &self.value, visitor)?;
        visit::walk_field("comparator", &self.comparator, visitor)?;
        visit::walk_field("unit", &self.unit, visitor)?;
        visit::walk_field("system", &self.system, visitor)?;
        visit::walk_field("code", &self.code, visitor)
    }
}

/// Builder for [`Quantity`].
#[derive(Debug, Clone)]
pub struct QuantityBuilder {
    element: ElementData,
    value: Option<Decimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
    validating: bool,
}

impl QuantityBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            value: None,
            comparator: None,
            unit: None,
            system: None,
            code: None,
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

    /// Set the numeric value.
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the comparator code.
    pub fn comparator(mut self, comparator: impl Into<Code>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    /// Set the human-readable unit.
    pub fn unit(mut self, unit: impl Into<FhirString>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the unit system.
    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the coded unit.
    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Quantity, ValidationFailure> {
        let quantity = Quantity {
            element: self.element,
            value: self.value,
            comparator: self.comparator,
            unit: self.unit,
            system: self.system,
            code: self.code,
        };
        if self.validating {
            quantity.validate()?;
        }
        Ok(quantity)
    }
}

/// An amount of currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<Code>,
}

impl Money {
    /// Start building a Money amount.
    pub fn builder() -> MoneyBuilder {
        MoneyBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// The numeric amount.
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// ISO 4217 currency code.
    pub fn currency(&self) -> Option<&Code> {
        self.currency.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> MoneyBuilder {
        MoneyBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
            currency: self.currency.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Money");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Money {
    fn has_meaningful_content(&self) -> bool {
        self.value.is_some() || self.currency.is_some() || self.element.has_children()
    }
}

impl Visitable for Money {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Money(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("value", &self.value, visitor)?;
        visit::walk_field("currency", &self.currency, visitor)
    }
}

/// Builder for [`Money`].
#[derive(Debug, Clone)]
pub struct MoneyBuilder {
    element: ElementData,
    value: Option<Decimal>,
    currency: Option<Code>,
    validating: bool,
}

impl MoneyBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            value: None,
            currency: None,
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

    /// Set the numeric amount.
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the currency code.
    pub fn currency(mut self, currency: impl Into<Code>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Money, ValidationFailure> {
        let money = Money {
            element: self.element,
            value: self.value,
            currency: self.currency,
        };
        if self.validating {
            money.validate()?;
        }
        Ok(money)
    }
}

/// Human-readable narrative for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    div: Option<FhirString>,
}

impl Narrative {
    /// Start building a Narrative.
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// Generation status of the narrative.
    pub fn status(&self) -> Option<&Code> {
        self.status.as_ref()
    }

    /// The XHTML content.
    pub fn div(&self) -> Option<&FhirString> {
        self.div.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            element: self.element.clone(),
            status: self.status.clone(),
            div: self.div.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Narrative");
        support::require(&mut checker, self.status.as_ref(), "status");
        support::require(&mut checker, self.div.as_ref(), "div");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::value_set_binding(
            &mut checker,
            self.status.as_ref(),
            "status",
            BindingStrength::Required,
            NARRATIVE_STATUS_VALUE_SET,
            NARRATIVE_STATUS_CODES,
        );
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Narrative {
    fn has_meaningful_content(&self) -> bool {
        self.status.is_some() || self.div.is_some() || self.element.has_children()
    }
}

impl Visitable for Narrative {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Narrative(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("status", &self.status, visitor)?;
        visit::walk_field("div", &self.div, visitor)
    }
}

/// Builder for [`Narrative`].
#[derive(Debug, Clone)]
pub struct NarrativeBuilder {
    element: ElementData,
    status: Option<Code>,
    div: Option<FhirString>,
    validating: bool,
}

impl NarrativeBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            status: None,
            div: None,
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

    /// Set the generation status.
    pub fn status(mut self, status: impl Into<Code>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the XHTML content.
    pub fn div(mut self, div: impl Into<FhirString>) -> Self {
        self.div = Some(div.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Narrative, ValidationFailure> {
        let narrative = Narrative {
            element: self.element,
            status: self.status,
            div: self.div,
        };
        if self.validating {
            narrative.validate()?;
        }
        Ok(narrative)
    }
}

/// Versioning and provenance stamp carried by every resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(flatten)]
    element: ElementData,

    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Uri>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    profile: Vec<Uri>,
}

impl Meta {
    /// Start building a Meta stamp.
    pub fn builder() -> MetaBuilder {
        MetaBuilder::new()
    }

    /// Element id and extensions.
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// Server-assigned version id.
    pub fn version_id(&self) -> Option<&FhirString> {
        self.version_id.as_ref()
    }

    /// When the resource version last changed.
    pub fn last_updated(&self) -> Option<&DateTime> {
        self.last_updated.as_ref()
    }

    /// Identifies where the resource came from.
    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    /// Profiles this resource claims to conform to.
    pub fn profile(&self) -> &[Uri] {
        &self.profile
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            element: self.element.clone(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Meta");
        support::check_list(&mut checker, &self.element.extension, "extension");
        support::check_list(&mut checker, &self.profile, "profile");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Meta {
    fn has_meaningful_content(&self) -> bool {
        self.version_id.is_some()
            || self.last_updated.is_some()
            || self.source.is_some()
            || !self.profile.is_empty()
            || self.element.has_children()
    }
}

impl Visitable for Meta {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Meta(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_list("extension", &self.element.extension, visitor)?;
        visit::walk_field("versionId", &self.version_id, visitor)?;
        visit::walk_field("lastUpdated", &self.last_updated, visitor)?;
        visit::walk_field("source", &self.source, visitor)?;
        visit::walk_list("profile", &self.profile, visitor)
    }
}

/// Builder for [`Meta`].
#[derive(Debug, Clone)]
pub struct MetaBuilder {
    element: ElementData,
    version_id: Option<FhirString>,
    last_updated: Option<DateTime>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    validating: bool,
}

impl MetaBuilder {
    fn new() -> Self {
        Self {
            element: ElementData::default(),
            version_id: None,
            last_updated: None,
            source: None,
            profile: Vec::new(),
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

    /// Set the version id.
    pub fn version_id(mut self, version_id: impl Into<FhirString>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Set the last-updated instant.
    pub fn last_updated(mut self, last_updated: impl Into<DateTime>) -> Self {
        self.last_updated = Some(last_updated.into());
        self
    }

    /// Set the source system URI.
    pub fn source(mut self, source: impl Into<Uri>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append one profile URI.
    pub fn profile(mut self, profile: impl Into<Uri>) -> Self {
        self.profile.push(profile.into());
        self
    }

    /// Replace the profile list.
    pub fn set_profile(mut self, profile: impl IntoIterator<Item = Uri>) -> Self {
        self.profile = profile.into_iter().collect();
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Meta, ValidationFailure> {
        let meta = Meta {
            element: self.element,
            version_id: self.version_id,
            last_updated: self.last_updated,
            source: self.source,
            profile: self.profile,
        };
        if self.validating {
            meta.validate()?;
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use pretty_assertions::assert_eq;

    fn patient_ref(literal: &str) -> Reference {
        Reference::to(literal).build().unwrap()
    }

    #[test]
    fn coding_builder_round_trip() {
        let coding = Coding::builder()
            .system("http://terminology.hl7.org/CodeSystem/claim-type")
            .code("professional")
            .display("Professional")
            .build()
            .unwrap();
        assert_eq!(coding, coding.to_builder().build().unwrap());
        assert_eq!(
            coding.code().and_then(|c| c.value()).map(String::as_str),
            Some("professional")
        );
    }

    #[test]
    fn empty_coding_is_rejected() {
        let err = Coding::builder().build().unwrap_err();
        assert_eq!(err.issues[0].violation, Violation::EmptyElementViolation);
        assert_eq!(err.issues[0].path, "Coding");
    }

    #[test]
    fn codeable_concept_rejects_placeholder_coding_entries() {
        let err = CodeableConcept::builder()
            .coding(Coding::builder().validating(false).build().unwrap())
            .text("ok")
            .build()
            .unwrap_err();
        assert_eq!(
            err.issues[0].violation,
            Violation::NullListElement { index: 0 }
        );
        assert_eq!(err.issues[0].path, "CodeableConcept.coding");
    }

    #[test]
    fn identifier_use_binding_is_required_strength() {
        let err = Identifier::builder()
            .use_("sometimes")
            .value("12345")
            .build()
            .unwrap_err();
        assert!(matches!(
            &err.issues[0].violation,
            Violation::BindingViolation { code, .. } if code == "sometimes"
        ));

        let ok = Identifier::builder()
            .use_("official")
            .value("12345")
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn identifier_assigner_must_be_an_organization() {
        let err = Identifier::builder()
            .value("12345")
            .assigner(patient_ref("Patient/17"))
            .build()
            .unwrap_err();
        assert!(matches!(
            &err.issues[0].violation,
            Violation::ReferenceTypeViolation { found, .. } if found == "Patient"
        ));
    }

    #[test]
    fn reference_kind_checks_are_best_effort() {
        // Relative literal with a matching kind passes.
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&patient_ref("Patient/a-1")),
            "patient",
            &["Patient"],
        );
        assert!(checker.finish().is_ok());

        // Wrong kind fails.
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&patient_ref("Organization/insurer-9")),
            "patient",
            &["Patient"],
        );
        assert!(checker.finish().unwrap_err().names("patient"));

        // Conditional references carry their kind before the query.
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&patient_ref("Patient?identifier=mrn|12345")),
            "patient",
            &["Patient"],
        );
        assert!(checker.finish().is_ok());

        // Absolute URLs and fragment references cannot be verified locally.
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&patient_ref("https://example.org/registry/record/42")),
            "patient",
            &["Patient"],
        );
        support::reference_type(
            &mut checker,
            Some(&patient_ref("#contained-subject")),
            "patient",
            &["Patient"],
        );
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn explicit_reference_type_must_match_literal_kind() {
        let mismatched = Reference::to("Patient/a-1")
            .type_("Organization")
            .build()
            .unwrap();
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&mismatched),
            "insurer",
            &["Patient", "Organization"],
        );
        let err = checker.finish().unwrap_err();
        assert!(matches!(
            &err.issues[0].violation,
            Violation::ReferenceTypeViolation { found, .. } if found == "Patient"
        ));
    }

    #[test]
    fn unknown_kind_in_literal_is_rejected() {
        let mut checker = Checker::new("ClaimResponse");
        support::reference_type(
            &mut checker,
            Some(&patient_ref("Widget/1")),
            "patient",
            &["Patient"],
        );
        assert!(checker.finish().is_err());
    }

    #[test]
    fn narrative_requires_status_and_div() {
        let err = Narrative::builder().build().unwrap_err();
        assert!(err.names("Narrative.status"));
        assert!(err.names("Narrative.div"));
    }

    #[test]
    fn quantity_comparator_binding() {
        let err = Quantity::builder()
            .value(rust_decimal_macros::dec!(7.5))
            .comparator("~")
            .build()
            .unwrap_err();
        assert!(err.names("Quantity.comparator"));
    }
}
