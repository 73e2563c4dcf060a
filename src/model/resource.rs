//! Resource bases: the fields shared by every resource, the domain-resource
//! layer on top, and the closed [`Resource`] sum over the concrete types.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;
use std::sync::OnceLock;

use crate::model::claim_response::ClaimResponse;
use crate::model::datatype::{Meta, Narrative};
use crate::model::element::{Extension, HasContent};
use crate::model::organization::Organization;
use crate::model::patient::Patient;
use crate::model::primitive::{Code, Uri};
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

/// The fields every resource carries: logical id, metadata stamp, the
/// implicit-rules marker, and the content language.
///
/// Also hosts the memoized content hash. The cell is identity-invisible:
/// it is skipped by serialization, ignored by equality and hashing, and
/// filled at most once per snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) implicit_rules: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) language: Option<Code>,

    #[serde(skip, default)]
    pub(crate) content_hash: OnceLock<u64>,
}

impl ResourceData {
    /// Logical id of the resource.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Metadata stamp.
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Rules the content was constructed under.
    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    /// Base language of the content.
    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub(crate) fn has_children(&self) -> bool {
        self.id.is_some()
            || self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
    }

    /// Compute-once content hash for the owning resource. The closure runs
    /// only on the first call for this snapshot.
    pub(crate) fn hash_with(&self, compute: impl FnOnce() -> u64) -> u64 {
        *self.content_hash.get_or_init(compute)
    }
}

impl PartialEq for ResourceData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.meta == other.meta
            && self.implicit_rules == other.implicit_rules
            && self.language == other.language
    }
}

impl Eq for ResourceData {}

impl Hash for ResourceData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.meta.hash(state);
        self.implicit_rules.hash(state);
        self.language.hash(state);
    }
}

/// The domain-resource layer: narrative, contained resources, and the two
/// extension lists, on top of [`ResourceData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResourceData {
    #[serde(flatten)]
    pub(crate) resource: ResourceData,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<Narrative>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) contained: Vec<Resource>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) extension: Vec<Extension>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) modifier_extension: Vec<Extension>,
}

impl DomainResourceData {
    /// Human-readable narrative.
    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    /// Resources contained inline, with no independent existence.
    pub fn contained(&self) -> &[Resource] {
        &self.contained
    }

    /// Additional content defined by implementations.
    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// Extensions that cannot be ignored.
    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub(crate) fn has_children(&self) -> bool {
        self.resource.has_children()
            || self.text.is_some()
            || !self.contained.is_empty()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    /// This data with an unfilled hash cell. Builders call this when
    /// assembling a snapshot so a builder seeded from `to_builder()` never
    /// carries the donor's memoized hash into a rebuilt instance.
    pub(crate) fn into_fresh(mut self) -> Self {
        self.resource.content_hash = OnceLock::new();
        self
    }

    /// The list checks shared by every domain resource, run first in each
    /// resource's `validate()`.
    pub(crate) fn check(&self, checker: &mut Checker) {
        support::check_list(checker, &self.contained, "contained");
        support::check_list(checker, &self.extension, "extension");
        support::check_list(checker, &self.modifier_extension, "modifierExtension");
    }

    /// Walk the shared children in declaration order, before the concrete
    /// resource's own fields.
    pub(crate) fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        visit::walk_field("meta", &self.resource.meta, visitor)?;
        visit::walk_field("implicitRules", &self.resource.implicit_rules, visitor)?;
        visit::walk_field("language", &self.resource.language, visitor)?;
        visit::walk_field("text", &self.text, visitor)?;
        visit::walk_list("contained", &self.contained, visitor)?;
        visit::walk_list("extension", &self.extension, visitor)?;
        visit::walk_list("modifierExtension", &self.modifier_extension, visitor)
    }
}

/// Closed sum over the concrete resource types, used wherever "any
/// resource" is required, e.g. contained resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    /// An adjudication response to a claim.
    ClaimResponse(ClaimResponse),
    /// A person receiving care.
    Patient(Patient),
    /// A grouping of people or organizations.
    Organization(Organization),
}

impl Resource {
    /// The resource type tag, as it appears in `resourceType`.
    pub fn resource_type_name(&self) -> &'static str {
        match self {
            Resource::ClaimResponse(_) => "ClaimResponse",
            Resource::Patient(_) => "Patient",
            Resource::Organization(_) => "Organization",
        }
    }

    /// Logical id, for any variant.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::ClaimResponse(r) => r.id(),
            Resource::Patient(r) => r.id(),
            Resource::Organization(r) => r.id(),
        }
    }

    /// Memoized content hash, for any variant.
    pub fn content_hash(&self) -> u64 {
        match self {
            Resource::ClaimResponse(r) => r.content_hash(),
            Resource::Patient(r) => r.content_hash(),
            Resource::Organization(r) => r.content_hash(),
        }
    }
}

impl From<ClaimResponse> for Resource {
    fn from(resource: ClaimResponse) -> Self {
        Resource::ClaimResponse(resource)
    }
}

impl From<Patient> for Resource {
    fn from(resource: Patient) -> Self {
        Resource::Patient(resource)
    }
}

impl From<Organization> for Resource {
    fn from(resource: Organization) -> Self {
        Resource::Organization(resource)
    }
}

impl HasContent for Resource {
    fn has_meaningful_content(&self) -> bool {
        match self {
            Resource::ClaimResponse(r) => r.has_meaningful_content(),
            Resource::Patient(r) => r.has_meaningful_content(),
            Resource::Organization(r) => r.has_meaningful_content(),
        }
    }
}

impl Visitable for Resource {
    fn node(&self) -> NodeRef<'_> {
        match self {
            Resource::ClaimResponse(r) => r.node(),
            Resource::Patient(r) => r.node(),
            Resource::Organization(r) => r.node(),
        }
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        match self {
            Resource::ClaimResponse(r) => r.visit_children(visitor),
            Resource::Patient(r) => r.visit_children(visitor),
            Resource::Organization(r) => r.visit_children(visitor),
        }
    }
}

/// Hash the given resource snapshot with the standard hasher.
pub(crate) fn compute_content_hash<T: Hash>(resource: &T) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    resource.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_data_equality_ignores_hash_cell() {
        let mut a = ResourceData::default();
        a.id = Some("r-1".to_string());
        let b = a.clone();
        a.content_hash.set(42).ok();
        assert_eq!(a, b);
    }

    #[test]
    fn into_fresh_discards_a_filled_hash_cell() {
        let mut domain = DomainResourceData::default();
        domain.resource.content_hash.set(42).ok();
        let fresh = domain.into_fresh();
        assert!(fresh.resource.content_hash.get().is_none());
    }

    #[test]
    fn hash_cell_computes_once() {
        let data = ResourceData::default();
        let mut calls = 0;
        let first = data.hash_with(|| {
            calls += 1;
            7
        });
        let second = data.hash_with(|| {
            calls += 1;
            8
        });
        assert_eq!((first, second, calls), (7, 7, 1));
    }
}
