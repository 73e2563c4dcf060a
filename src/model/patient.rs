//! The Patient resource, trimmed to the demographics the claim workflow
//! needs.

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::datatype::{Identifier, Meta, Narrative, Reference};
use crate::model::element::{Extension, HasContent};
use crate::model::primitive::{Boolean, Code, Date, Uri};
use crate::model::resource::{self, DomainResourceData, Resource};
use crate::validation::binding::BindingStrength;
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

const ADMINISTRATIVE_GENDER_VALUE_SET: &str =
    "http://hl7.org/fhir/ValueSet/administrative-gender";
const ADMINISTRATIVE_GENDER_CODES: &[&str] = &["male", "female", "other", "unknown"];

/// Demographics for a person receiving care.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(flatten)]
    domain: DomainResourceData,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<Boolean>,

    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    managing_organization: Option<Reference>,
}

impl Patient {
    /// The allowed target kinds for `managingOrganization`.
    pub const MANAGING_ORGANIZATION_TARGETS: &'static [&'static str] = &["Organization"];

    /// Start building a Patient.
    pub fn builder() -> PatientBuilder {
        PatientBuilder::new()
    }

    /// Logical id of the resource.
    pub fn id(&self) -> Option<&str> {
        self.domain.resource.id()
    }

    /// Metadata stamp.
    pub fn meta(&self) -> Option<&Meta> {
        self.domain.resource.meta()
    }

    /// Narrative, contained resources, and extensions.
    pub fn domain(&self) -> &DomainResourceData {
        &self.domain
    }

    /// Business identifiers for this patient.
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Whether this record is in active use.
    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    /// Administrative gender.
    pub fn gender(&self) -> Option<&Code> {
        self.gender.as_ref()
    }

    /// Date of birth.
    pub fn birth_date(&self) -> Option<&Date> {
        self.birth_date.as_ref()
    }

    /// Organization that is the custodian of the record.
    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    /// Content hash of this snapshot, computed on first use.
    pub fn content_hash(&self) -> u64 {
        self.domain
            .resource
            .hash_with(|| resource::compute_content_hash(self))
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> PatientBuilder {
        PatientBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            active: self.active.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date.clone(),
            managing_organization: self.managing_organization.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this resource.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Patient");
        self.domain.check(&mut checker);
        support::check_list(&mut checker, &self.identifier, "identifier");
        support::value_set_binding(
            &mut checker,
            self.gender.as_ref(),
            "gender",
            BindingStrength::Required,
            ADMINISTRATIVE_GENDER_VALUE_SET,
            ADMINISTRATIVE_GENDER_CODES,
        );
        support::reference_type(
            &mut checker,
            self.managing_organization.as_ref(),
            "managingOrganization",
            Self::MANAGING_ORGANIZATION_TARGETS,
        );
        checker.finish()
    }
}

impl HasContent for Patient {
    fn has_meaningful_content(&self) -> bool {
        !self.identifier.is_empty()
            || self.active.is_some()
            || self.gender.is_some()
            || self.birth_date.is_some()
            || self.managing_organization.is_some()
            || self.domain.has_children()
    }
}

impl Visitable for Patient {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Patient(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.domain.visit_children(visitor)?;
        visit::walk_list("identifier", &self.identifier, visitor)?;
        visit::walk_field("active", &self.active, visitor)?;
        visit::walk_field("gender", &self.gender, visitor)?;
        visit::walk_field("birthDate", &self.birth_date, visitor)?;
        visit::walk_field("managingOrganization", &self.managing_organization, visitor)
    }
}

/// Builder for [`Patient`].
#[derive(Debug, Clone)]
pub struct PatientBuilder {
    domain: DomainResourceData,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    managing_organization: Option<Reference>,
    validating: bool,
}

impl PatientBuilder {
    fn new() -> Self {
        Self {
            domain: DomainResourceData::default(),
            identifier: Vec::new(),
            active: None,
            gender: None,
            birth_date: None,
            managing_organization: None,
            validating: true,
        }
    }

    /// Set the logical id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.domain.resource.id = Some(id.into());
        self
    }

    /// Set the metadata stamp.
    pub fn meta(mut self, meta: Meta) -> Self {
        self.domain.resource.meta = Some(meta);
        self
    }

    /// Set the implicit-rules marker.
    pub fn implicit_rules(mut self, implicit_rules: impl Into<Uri>) -> Self {
        self.domain.resource.implicit_rules = Some(implicit_rules.into());
        self
    }

    /// Set the content language.
    pub fn language(mut self, language: impl Into<Code>) -> Self {
        self.domain.resource.language = Some(language.into());
        self
    }

    /// Set the narrative.
    pub fn text(mut self, text: Narrative) -> Self {
        self.domain.text = Some(text);
        self
    }

    /// Append one contained resource.
    pub fn contained(mut self, contained: impl Into<Resource>) -> Self {
        self.domain.contained.push(contained.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.domain.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.domain.modifier_extension.push(modifier_extension);
        self
    }

    /// Append one business identifier.
    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    /// Replace the identifier list.
    pub fn set_identifier(mut self, identifier: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier = identifier.into_iter().collect();
        self
    }

    /// Set the active flag.
    pub fn active(mut self, active: impl Into<Boolean>) -> Self {
        self.active = Some(active.into());
        self
    }

    /// Set the administrative gender.
    pub fn gender(mut self, gender: impl Into<Code>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the date of birth.
    pub fn birth_date(mut self, birth_date: impl Into<Date>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    /// Set the managing organization reference.
    pub fn managing_organization(mut self, managing_organization: Reference) -> Self {
        self.managing_organization = Some(managing_organization);
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Patient, ValidationFailure> {
        let patient = Patient {
            domain: self.domain.into_fresh(),
            identifier: self.identifier,
            active: self.active,
            gender: self.gender,
            birth_date: self.birth_date,
            managing_organization: self.managing_organization,
        };
        if self.validating {
            patient.validate()?;
        }
        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn gender_binding_is_required_strength() {
        let err = Patient::builder()
            .id("p-1")
            .gender("nonbinary")
            .build()
            .unwrap_err();
        assert!(matches!(
            &err.issues[0].violation,
            Violation::BindingViolation { code, .. } if code == "nonbinary"
        ));

        assert!(Patient::builder().id("p-1").gender("other").build().is_ok());
    }

    #[test]
    fn managing_organization_kind_is_checked() {
        let err = Patient::builder()
            .id("p-1")
            .managing_organization(Reference::to("Patient/p-2").build().unwrap())
            .build()
            .unwrap_err();
        assert!(err.names("managingOrganization"));
    }
}
