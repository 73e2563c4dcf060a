//! The Organization resource, trimmed to what payers and providers need.

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::datatype::{Identifier, Meta, Narrative, Reference};
use crate::model::element::{Extension, HasContent};
use crate::model::primitive::{Boolean, Code, FhirString, Uri};
use crate::model::resource::{self, DomainResourceData, Resource};
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

/// A formally recognized grouping of people or organizations, e.g. an
/// insurer or a provider group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(flatten)]
    domain: DomainResourceData,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<Boolean>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    part_of: Option<Reference>,
}

impl Organization {
    /// The allowed target kinds for `partOf`.
    pub const PART_OF_TARGETS: &'static [&'static str] = &["Organization"];

    /// Start building an Organization.
    pub fn builder() -> OrganizationBuilder {
        OrganizationBuilder::new()
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

    /// Business identifiers for this organization.
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Whether the record is still in active use.
    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    /// Name used for the organization.
    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    /// The organization this one is part of.
    pub fn part_of(&self) -> Option<&Reference> {
        self.part_of.as_ref()
    }

    /// Content hash of this snapshot, computed on first use.
    pub fn content_hash(&self) -> u64 {
        self.domain
            .resource
            .hash_with(|| resource::compute_content_hash(self))
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> OrganizationBuilder {
        OrganizationBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            active: self.active.clone(),
            name: self.name.clone(),
            part_of: self.part_of.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this resource.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("Organization");
        self.domain.check(&mut checker);
        support::check_list(&mut checker, &self.identifier, "identifier");
        support::reference_type(
            &mut checker,
            self.part_of.as_ref(),
            "partOf",
            Self::PART_OF_TARGETS,
        );
        checker.finish()
    }
}

impl HasContent for Organization {
    fn has_meaningful_content(&self) -> bool {
        !self.identifier.is_empty()
            || self.active.is_some()
            || self.name.is_some()
            || self.part_of.is_some()
            || self.domain.has_children()
    }
}

impl Visitable for Organization {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::Organization(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.domain.visit_children(visitor)?;
        visit::walk_list("identifier", &self.identifier, visitor)?;
        visit::walk_field("active", &self.active, visitor)?;
        visit::walk_field("name", &self.name, visitor)?;
        visit::walk_field("partOf", &self.part_of, visitor)
    }
}

/// Builder for [`Organization`].
#[derive(Debug, Clone)]
pub struct OrganizationBuilder {
    domain: DomainResourceData,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    name: Option<FhirString>,
    part_of: Option<Reference>,
    validating: bool,
}

impl OrganizationBuilder {
    fn new() -> Self {
        Self {
            domain: DomainResourceData::default(),
            identifier: Vec::new(),
            active: None,
            name: None,
            part_of: None,
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

    /// Set the organization name.
    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parent organization reference.
    pub fn part_of(mut self, part_of: Reference) -> Self {
        self.part_of = Some(part_of);
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Organization, ValidationFailure> {
        let organization = Organization {
            domain: self.domain.into_fresh(),
            identifier: self.identifier,
            active: self.active,
            name: self.name,
            part_of: self.part_of,
        };
        if self.validating {
            organization.validate()?;
        }
        Ok(organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_of_must_point_at_an_organization() {
        let err = Organization::builder()
            .name("Umbrella Health")
            .part_of(Reference::to("Patient/p-1").build().unwrap())
            .build()
            .unwrap_err();
        assert!(err.names("partOf"));
    }

    #[test]
    fn builder_round_trip_preserves_equality() {
        let org = Organization::builder()
            .id("org-1")
            .active(true)
            .name("Umbrella Health")
            .build()
            .unwrap();
        assert_eq!(org, org.to_builder().build().unwrap());
    }
}
