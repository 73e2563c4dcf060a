//! The ClaimResponse resource: an insurer's adjudication of a claim, with
//! per-line results, insurer-added lines, totals, payment details, and
//! processing notes.

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::error::ValidationFailure;
use crate::model::datatype::{
    CodeableConcept, Identifier, Meta, Money, Narrative, Period, Reference,
};
use crate::model::element::{BackboneData, Extension, HasContent};
use crate::model::primitive::{Code, Date, DateTime, Decimal, FhirString, PositiveInt, Uri};
use crate::model::resource::{self, DomainResourceData, Resource};
use crate::validation::binding::BindingStrength;
use crate::validation::support::{self, Checker};
use crate::visit::{self, NodeRef, Stop, Visitable, Visitor};

const FM_STATUS_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/fm-status";
const FM_STATUS_CODES: &[&str] = &["active", "cancelled", "draft", "entered-in-error"];
const CLAIM_USE_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/claim-use";
const CLAIM_USE_CODES: &[&str] = &["claim", "preauthorization", "predetermination"];
const REMITTANCE_OUTCOME_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/remittance-outcome";
const REMITTANCE_OUTCOME_CODES: &[&str] = &["queued", "complete", "error", "partial"];
const NOTE_TYPE_VALUE_SET: &str = "http://hl7.org/fhir/ValueSet/note-type";
const NOTE_TYPE_CODES: &[&str] = &["display", "print", "printoper"];

/// The adjudication response to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    #[serde(flatten)]
    domain: DomainResourceData,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Code>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    sub_type: Option<CodeableConcept>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    use_: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    patient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    insurer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    requestor: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    disposition: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pre_auth_ref: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    payee_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    item: Vec<Item>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    add_item: Vec<AddItem>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    total: Vec<Total>,

    #[serde(skip_serializing_if = "Option::is_none")]
    payment: Option<Payment>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    process_note: Vec<ProcessNote>,
}

impl ClaimResponse {
    /// The allowed target kinds for `patient`.
    pub const PATIENT_TARGETS: &'static [&'static str] = &["Patient"];
    /// The allowed target kinds for `insurer`.
    pub const INSURER_TARGETS: &'static [&'static str] = &["Organization"];
    /// The allowed target kinds for `requestor`.
    pub const REQUESTOR_TARGETS: &'static [&'static str] =
        &["Practitioner", "PractitionerRole", "Organization"];

    /// Start building a ClaimResponse.
    pub fn builder() -> ClaimResponseBuilder {
        ClaimResponseBuilder::new()
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

    /// Business identifiers for this response.
    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Lifecycle status of the response.
    pub fn status(&self) -> Option<&Code> {
        self.status.as_ref()
    }

    /// Category of claim being adjudicated.
    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    /// Finer-grained claim subcategory.
    pub fn sub_type(&self) -> Option<&CodeableConcept> {
        self.sub_type.as_ref()
    }

    /// Whether this adjudicates a claim, preauthorization, or
    /// predetermination.
    pub fn use_(&self) -> Option<&Code> {
        self.use_.as_ref()
    }

    /// The patient the claim concerns.
    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    /// When the response was created.
    pub fn created(&self) -> Option<&DateTime> {
        self.created.as_ref()
    }

    /// The adjudicating insurer.
    pub fn insurer(&self) -> Option<&Reference> {
        self.insurer.as_ref()
    }

    /// The party that submitted the claim.
    pub fn requestor(&self) -> Option<&Reference> {
        self.requestor.as_ref()
    }

    /// Overall outcome of the adjudication.
    pub fn outcome(&self) -> Option<&Code> {
        self.outcome.as_ref()
    }

    /// Human-readable disposition of the adjudication.
    pub fn disposition(&self) -> Option<&FhirString> {
        self.disposition.as_ref()
    }

    /// Preauthorization reference issued with the response.
    pub fn pre_auth_ref(&self) -> Option<&FhirString> {
        self.pre_auth_ref.as_ref()
    }

    /// Kind of party to be paid.
    pub fn payee_type(&self) -> Option<&CodeableConcept> {
        self.payee_type.as_ref()
    }

    /// Adjudication results for the claim's line items.
    pub fn item(&self) -> &[Item] {
        &self.item
    }

    /// Line items added by the insurer.
    pub fn add_item(&self) -> &[AddItem] {
        &self.add_item
    }

    /// Adjudication totals by category.
    pub fn total(&self) -> &[Total] {
        &self.total
    }

    /// Payment details, when payment was adjudicated.
    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    /// Processing notes.
    pub fn process_note(&self) -> &[ProcessNote] {
        &self.process_note
    }

    /// Content hash of this snapshot, computed on first use.
    pub fn content_hash(&self) -> u64 {
        self.domain
            .resource
            .hash_with(|| resource::compute_content_hash(self))
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> ClaimResponseBuilder {
        ClaimResponseBuilder {
            domain: self.domain.clone(),
            identifier: self.identifier.clone(),
            status: self.status.clone(),
            type_: self.type_.clone(),
            sub_type: self.sub_type.clone(),
            use_: self.use_.clone(),
            patient: self.patient.clone(),
            created: self.created.clone(),
            insurer: self.insurer.clone(),
            requestor: self.requestor.clone(),
            outcome: self.outcome.clone(),
            disposition: self.disposition.clone(),
            pre_auth_ref: self.pre_auth_ref.clone(),
            payee_type: self.payee_type.clone(),
            item: self.item.clone(),
            add_item: self.add_item.clone(),
            total: self.total.clone(),
            payment: self.payment.clone(),
            process_note: self.process_note.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this resource. Every violation is
    /// collected; the result names each offending field path.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse");
        self.domain.check(&mut checker);
        support::check_list(&mut checker, &self.identifier, "identifier");
        support::require(&mut checker, self.status.as_ref(), "status");
        support::value_set_binding(
            &mut checker,
            self.status.as_ref(),
            "status",
            BindingStrength::Required,
            FM_STATUS_VALUE_SET,
            FM_STATUS_CODES,
        );
        support::require(&mut checker, self.type_.as_ref(), "type");
        support::require(&mut checker, self.use_.as_ref(), "use");
        support::value_set_binding(
            &mut checker,
            self.use_.as_ref(),
            "use",
            BindingStrength::Required,
            CLAIM_USE_VALUE_SET,
            CLAIM_USE_CODES,
        );
        support::require(&mut checker, self.patient.as_ref(), "patient");
        support::reference_type(
            &mut checker,
            self.patient.as_ref(),
            "patient",
            Self::PATIENT_TARGETS,
        );
        support::require(&mut checker, self.created.as_ref(), "created");
        support::require(&mut checker, self.insurer.as_ref(), "insurer");
        support::reference_type(
            &mut checker,
            self.insurer.as_ref(),
            "insurer",
            Self::INSURER_TARGETS,
        );
        support::reference_type(
            &mut checker,
            self.requestor.as_ref(),
            "requestor",
            Self::REQUESTOR_TARGETS,
        );
        support::require(&mut checker, self.outcome.as_ref(), "outcome");
        support::value_set_binding(
            &mut checker,
            self.outcome.as_ref(),
            "outcome",
            BindingStrength::Required,
            REMITTANCE_OUTCOME_VALUE_SET,
            REMITTANCE_OUTCOME_CODES,
        );
        support::check_list(&mut checker, &self.item, "item");
        support::check_list(&mut checker, &self.add_item, "addItem");
        support::check_list(&mut checker, &self.total, "total");
        support::check_list(&mut checker, &self.process_note, "processNote");
        checker.finish()
    }
}

impl HasContent for ClaimResponse {
    fn has_meaningful_content(&self) -> bool {
        !self.identifier.is_empty()
            || self.status.is_some()
            || self.type_.is_some()
            || self.sub_type.is_some()
            || self.use_.is_some()
            || self.patient.is_some()
            || self.created.is_some()
            || self.insurer.is_some()
            || self.requestor.is_some()
            || self.outcome.is_some()
            || self.disposition.is_some()
            || self.pre_auth_ref.is_some()
            || self.payee_type.is_some()
            || !self.item.is_empty()
            || !self.add_item.is_empty()
            || !self.total.is_empty()
            || self.payment.is_some()
            || !self.process_note.is_empty()
            || self.domain.has_children()
    }
}

impl Visitable for ClaimResponse {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponse(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.domain.visit_children(visitor)?;
        visit::walk_list("identifier", &self.identifier, visitor)?;
        visit::walk_field("status", &self.status, visitor)?;
        visit::walk_field("type", &self.type_, visitor)?;
        visit::walk_field("subType", &self.sub_type, visitor)?;
        visit::walk_field("use", &self.use_, visitor)?;
        visit::walk_field("patient", &self.patient, visitor)?;
        visit::walk_field("created", &self.created, visitor)?;
        visit::walk_field("insurer", &self.insurer, visitor)?;
        visit::walk_field("requestor", &self.requestor, visitor)?;
        visit::walk_field("outcome", &self.outcome, visitor)?;
        visit::walk_field("disposition", &self.disposition, visitor)?;
        visit::walk_field("preAuthRef", &self.pre_auth_ref, visitor)?;
        visit::walk_field("payeeType", &self.payee_type, visitor)?;
        visit::walk_list("item", &self.item, visitor)?;
        visit::walk_list("addItem", &self.add_item, visitor)?;
        visit::walk_list("total", &self.total, visitor)?;
        visit::walk_field("payment", &self.payment, visitor)?;
        visit::walk_list("processNote", &self.process_note, visitor)
    }
}

/// Builder for [`ClaimResponse`].
#[derive(Debug, Clone)]
pub struct ClaimResponseBuilder {
    domain: DomainResourceData,
    identifier: Vec<Identifier>,
    status: Option<Code>,
    type_: Option<CodeableConcept>,
    sub_type: Option<CodeableConcept>,
    use_: Option<Code>,
    patient: Option<Reference>,
    created: Option<DateTime>,
    insurer: Option<Reference>,
    requestor: Option<Reference>,
    outcome: Option<Code>,
    disposition: Option<FhirString>,
    pre_auth_ref: Option<FhirString>,
    payee_type: Option<CodeableConcept>,
    item: Vec<Item>,
    add_item: Vec<AddItem>,
    total: Vec<Total>,
    payment: Option<Payment>,
    process_note: Vec<ProcessNote>,
    validating: bool,
}

impl ClaimResponseBuilder {
    fn new() -> Self {
        Self {
            domain: DomainResourceData::default(),
            identifier: Vec::new(),
            status: None,
            type_: None,
            sub_type: None,
            use_: None,
            patient: None,
            created: None,
            insurer: None,
            requestor: None,
            outcome: None,
            disposition: None,
            pre_auth_ref: None,
            payee_type: None,
            item: Vec::new(),
            add_item: Vec::new(),
            total: Vec::new(),
            payment: None,
            process_note: Vec::new(),
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

    /// Set the lifecycle status.
    pub fn status(mut self, status: impl Into<Code>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the claim category.
    pub fn type_(mut self, type_: CodeableConcept) -> Self {
        self.type_ = Some(type_);
        self
    }

    /// Set the claim subcategory.
    pub fn sub_type(mut self, sub_type: CodeableConcept) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    /// Set the use code.
    pub fn use_(mut self, use_: impl Into<Code>) -> Self {
        self.use_ = Some(use_.into());
        self
    }

    /// Set the patient reference.
    pub fn patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    /// Set the creation instant.
    pub fn created(mut self, created: impl Into<DateTime>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Set the insurer reference.
    pub fn insurer(mut self, insurer: Reference) -> Self {
        self.insurer = Some(insurer);
        self
    }

    /// Set the requestor reference.
    pub fn requestor(mut self, requestor: Reference) -> Self {
        self.requestor = Some(requestor);
        self
    }

    /// Set the adjudication outcome.
    pub fn outcome(mut self, outcome: impl Into<Code>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Set the disposition text.
    pub fn disposition(mut self, disposition: impl Into<FhirString>) -> Self {
        self.disposition = Some(disposition.into());
        self
    }

    /// Set the preauthorization reference string.
    pub fn pre_auth_ref(mut self, pre_auth_ref: impl Into<FhirString>) -> Self {
        self.pre_auth_ref = Some(pre_auth_ref.into());
        self
    }

    /// Set the payee type.
    pub fn payee_type(mut self, payee_type: CodeableConcept) -> Self {
        self.payee_type = Some(payee_type);
        self
    }

    /// Append one line-item result.
    pub fn item(mut self, item: Item) -> Self {
        self.item.push(item);
        self
    }

    /// Replace the line-item list.
    pub fn set_item(mut self, item: impl IntoIterator<Item = Item>) -> Self {
        self.item = item.into_iter().collect();
        self
    }

    /// Append one insurer-added line.
    pub fn add_item(mut self, add_item: AddItem) -> Self {
        self.add_item.push(add_item);
        self
    }

    /// Replace the insurer-added line list.
    pub fn set_add_item(mut self, add_item: impl IntoIterator<Item = AddItem>) -> Self {
        self.add_item = add_item.into_iter().collect();
        self
    }

    /// Append one adjudication total.
    pub fn total(mut self, total: Total) -> Self {
        self.total.push(total);
        self
    }

    /// Replace the totals list.
    pub fn set_total(mut self, total: impl IntoIterator<Item = Total>) -> Self {
        self.total = total.into_iter().collect();
        self
    }

    /// Set the payment details.
    pub fn payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Append one processing note.
    pub fn process_note(mut self, process_note: ProcessNote) -> Self {
        self.process_note.push(process_note);
        self
    }

    /// Replace the processing-note list.
    pub fn set_process_note(
        mut self,
        process_note: impl IntoIterator<Item = ProcessNote>,
    ) -> Self {
        self.process_note = process_note.into_iter().collect();
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<ClaimResponse, ValidationFailure> {
        let response = ClaimResponse {
            domain: self.domain.into_fresh(),
            identifier: self.identifier,
            status: self.status,
            type_: self.type_,
            sub_type: self.sub_type,
            use_: self.use_,
            patient: self.patient,
            created: self.created,
            insurer: self.insurer,
            requestor: self.requestor,
            outcome: self.outcome,
            disposition: self.disposition,
            pre_auth_ref: self.pre_auth_ref,
            payee_type: self.payee_type,
            item: self.item,
            add_item: self.add_item,
            total: self.total,
            payment: self.payment,
            process_note: self.process_note,
        };
        if self.validating {
            response.validate()?;
        }
        Ok(response)
    }
}

/// Adjudication results for one line item of the original claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(skip_serializing_if = "Option::is_none")]
    item_sequence: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    note_number: Vec<PositiveInt>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    adjudication: Vec<Adjudication>,
}

impl Item {
    /// Start building an Item.
    pub fn builder() -> ItemBuilder {
        ItemBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// Sequence number of the claim line this result applies to.
    pub fn item_sequence(&self) -> Option<&PositiveInt> {
        self.item_sequence.as_ref()
    }

    /// Processing notes that apply to this line.
    pub fn note_number(&self) -> &[PositiveInt] {
        &self.note_number
    }

    /// Per-category adjudication results. At least one is required.
    pub fn adjudication(&self) -> &[Adjudication] {
        &self.adjudication
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> ItemBuilder {
        ItemBuilder {
            backbone: self.backbone.clone(),
            item_sequence: self.item_sequence.clone(),
            note_number: self.note_number.clone(),
            adjudication: self.adjudication.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.item");
        self.backbone.check(&mut checker);
        support::require(&mut checker, self.item_sequence.as_ref(), "itemSequence");
        support::check_list(&mut checker, &self.note_number, "noteNumber");
        support::require_list(&mut checker, &self.adjudication, "adjudication");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Item {
    fn has_meaningful_content(&self) -> bool {
        self.item_sequence.is_some()
            || !self.note_number.is_empty()
            || !self.adjudication.is_empty()
            || self.backbone.has_children()
    }
}

impl Visitable for Item {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponseItem(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_field("itemSequence", &self.item_sequence, visitor)?;
        visit::walk_list("noteNumber", &self.note_number, visitor)?;
        visit::walk_list("adjudication", &self.adjudication, visitor)
    }
}

/// Builder for [`Item`].
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    backbone: BackboneData,
    item_sequence: Option<PositiveInt>,
    note_number: Vec<PositiveInt>,
    adjudication: Vec<Adjudication>,
    validating: bool,
}

impl ItemBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            item_sequence: None,
            note_number: Vec::new(),
            adjudication: Vec::new(),
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Set the claim line sequence number.
    pub fn item_sequence(mut self, item_sequence: impl Into<PositiveInt>) -> Self {
        self.item_sequence = Some(item_sequence.into());
        self
    }

    /// Append one applicable note number.
    pub fn note_number(mut self, note_number: impl Into<PositiveInt>) -> Self {
        self.note_number.push(note_number.into());
        self
    }

    /// Append one adjudication result.
    pub fn adjudication(mut self, adjudication: Adjudication) -> Self {
        self.adjudication.push(adjudication);
        self
    }

    /// Replace the adjudication list.
    pub fn set_adjudication(
        mut self,
        adjudication: impl IntoIterator<Item = Adjudication>,
    ) -> Self {
        self.adjudication = adjudication.into_iter().collect();
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Item, ValidationFailure> {
        let item = Item {
            backbone: self.backbone,
            item_sequence: self.item_sequence,
            note_number: self.note_number,
            adjudication: self.adjudication,
        };
        if self.validating {
            item.validate()?;
        }
        Ok(item)
    }
}

/// One category's adjudication result: the category, an optional reason,
/// and a monetary or numeric outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Adjudication {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Decimal>,
}

impl Adjudication {
    /// Start building an Adjudication.
    pub fn builder() -> AdjudicationBuilder {
        AdjudicationBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// What this result concerns, e.g. benefit or copay.
    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    /// Explanation for the result.
    pub fn reason(&self) -> Option<&CodeableConcept> {
        self.reason.as_ref()
    }

    /// Monetary outcome.
    pub fn amount(&self) -> Option<&Money> {
        self.amount.as_ref()
    }

    /// Non-monetary outcome, e.g. a percentage.
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> AdjudicationBuilder {
        AdjudicationBuilder {
            backbone: self.backbone.clone(),
            category: self.category.clone(),
            reason: self.reason.clone(),
            amount: self.amount.clone(),
            value: self.value.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.item.adjudication");
        self.backbone.check(&mut checker);
        support::require(&mut checker, self.category.as_ref(), "category");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Adjudication {
    fn has_meaningful_content(&self) -> bool {
        self.category.is_some()
            || self.reason.is_some()
            || self.amount.is_some()
            || self.value.is_some()
            || self.backbone.has_children()
    }
}

impl Visitable for Adjudication {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponseAdjudication(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_field("category", &self.category, visitor)?;
        visit::walk_field("reason", &self.reason, visitor)?;
        visit::walk_field("amount", &self.amount, visitor)?;
        visit::walk_field("value", &self.value, visitor)
    }
}

/// Builder for [`Adjudication`].
#[derive(Debug, Clone)]
pub struct AdjudicationBuilder {
    backbone: BackboneData,
    category: Option<CodeableConcept>,
    reason: Option<CodeableConcept>,
    amount: Option<Money>,
    value: Option<Decimal>,
    validating: bool,
}

impl AdjudicationBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            category: None,
            reason: None,
            amount: None,
            value: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Set the adjudication category.
    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the reason.
    pub fn reason(mut self, reason: CodeableConcept) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Set the monetary outcome.
    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the non-monetary outcome.
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Adjudication, ValidationFailure> {
        let adjudication = Adjudication {
            backbone: self.backbone,
            category: self.category,
            reason: self.reason,
            amount: self.amount,
            value: self.value,
        };
        if self.validating {
            adjudication.validate()?;
        }
        Ok(adjudication)
    }
}

/// The service date(s) for an insurer-added line: a single day or a period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Serviced {
    /// A single service date.
    Date(Date),
    /// A service period.
    Period(Period),
}

impl Serviced {
    /// The declared closed set of type tags for `addItem.serviced`.
    pub const ALLOWED_TYPES: &'static [&'static str] = &["date", "Period"];

    /// Type tag of the stored value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Serviced::Date(_) => "date",
            Serviced::Period(_) => "Period",
        }
    }
}

impl From<Date> for Serviced {
    fn from(value: Date) -> Self {
        Serviced::Date(value)
    }
}

impl From<chrono::NaiveDate> for Serviced {
    fn from(value: chrono::NaiveDate) -> Self {
        Serviced::Date(Date::of(value))
    }
}

impl From<Period> for Serviced {
    fn from(value: Period) -> Self {
        Serviced::Period(value)
    }
}

impl HasContent for Serviced {
    fn has_meaningful_content(&self) -> bool {
        match self {
            Serviced::Date(v) => v.has_meaningful_content(),
            Serviced::Period(v) => v.has_meaningful_content(),
        }
    }
}

impl Visitable for Serviced {
    fn node(&self) -> NodeRef<'_> {
        match self {
            Serviced::Date(v) => v.node(),
            Serviced::Period(v) => v.node(),
        }
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        match self {
            Serviced::Date(v) => v.visit_children(visitor),
            Serviced::Period(v) => v.visit_children(visitor),
        }
    }
}

/// A line item the insurer added during adjudication, not present on the
/// original claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    item_sequence: Vec<PositiveInt>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    provider: Vec<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    product_or_service: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    serviced: Option<Serviced>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    adjudication: Vec<Adjudication>,
}

impl AddItem {
    /// The allowed target kinds for `provider`.
    pub const PROVIDER_TARGETS: &'static [&'static str] =
        &["Practitioner", "PractitionerRole", "Organization"];

    /// Start building an AddItem.
    pub fn builder() -> AddItemBuilder {
        AddItemBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// Claim lines this added line relates to.
    pub fn item_sequence(&self) -> &[PositiveInt] {
        &self.item_sequence
    }

    /// Providers of the added service.
    pub fn provider(&self) -> &[Reference] {
        &self.provider
    }

    /// The billed product or service.
    pub fn product_or_service(&self) -> Option<&CodeableConcept> {
        self.product_or_service.as_ref()
    }

    /// When the added service was delivered.
    pub fn serviced(&self) -> Option<&Serviced> {
        self.serviced.as_ref()
    }

    /// Per-category adjudication results. At least one is required.
    pub fn adjudication(&self) -> &[Adjudication] {
        &self.adjudication
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> AddItemBuilder {
        AddItemBuilder {
            backbone: self.backbone.clone(),
            item_sequence: self.item_sequence.clone(),
            provider: self.provider.clone(),
            product_or_service: self.product_or_service.clone(),
            serviced: self.serviced.clone(),
            adjudication: self.adjudication.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.addItem");
        self.backbone.check(&mut checker);
        support::check_list(&mut checker, &self.item_sequence, "itemSequence");
        support::reference_type_in(
            &mut checker,
            &self.provider,
            "provider",
            Self::PROVIDER_TARGETS,
        );
        support::require(
            &mut checker,
            self.product_or_service.as_ref(),
            "productOrService",
        );
        support::choice(
            &mut checker,
            self.serviced.as_ref().map(Serviced::type_name),
            "serviced",
            Serviced::ALLOWED_TYPES,
        );
        support::require_list(&mut checker, &self.adjudication, "adjudication");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for AddItem {
    fn has_meaningful_content(&self) -> bool {
        !self.item_sequence.is_empty()
            || !self.provider.is_empty()
            || self.product_or_service.is_some()
            || self.serviced.is_some()
            || !self.adjudication.is_empty()
            || self.backbone.has_children()
    }
}

impl Visitable for AddItem {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponseAddItem(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_list("itemSequence", &self.item_sequence, visitor)?;
        visit::walk_list("provider", &self.provider, visitor)?;
        visit::walk_field("productOrService", &self.product_or_service, visitor)?;
        visit::walk_field("serviced", &self.serviced, visitor)?;
        visit::walk_list("adjudication", &self.adjudication, visitor)
    }
}

/// Builder for [`AddItem`].
#[derive(Debug, Clone)]
pub struct AddItemBuilder {
    backbone: BackboneData,
    item_sequence: Vec<PositiveInt>,
    provider: Vec<Reference>,
    product_or_service: Option<CodeableConcept>,
    serviced: Option<Serviced>,
    adjudication: Vec<Adjudication>,
    validating: bool,
}

impl AddItemBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            item_sequence: Vec::new(),
            provider: Vec::new(),
            product_or_service: None,
            serviced: None,
            adjudication: Vec::new(),
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Append one related claim line sequence number.
    pub fn item_sequence(mut self, item_sequence: impl Into<PositiveInt>) -> Self {
        self.item_sequence.push(item_sequence.into());
        self
    }

    /// Append one provider reference.
    pub fn provider(mut self, provider: Reference) -> Self {
        self.provider.push(provider);
        self
    }

    /// Set the billed product or service.
    pub fn product_or_service(mut self, product_or_service: CodeableConcept) -> Self {
        self.product_or_service = Some(product_or_service);
        self
    }

    /// Set the service date or period.
    pub fn serviced(mut self, serviced: impl Into<Serviced>) -> Self {
        self.serviced = Some(serviced.into());
        self
    }

    /// Append one adjudication result.
    pub fn adjudication(mut self, adjudication: Adjudication) -> Self {
        self.adjudication.push(adjudication);
        self
    }

    /// Replace the adjudication list.
    pub fn set_adjudication(
        mut self,
        adjudication: impl IntoIterator<Item = Adjudication>,
    ) -> Self {
        self.adjudication = adjudication.into_iter().collect();
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<AddItem, ValidationFailure> {
        let add_item = AddItem {
            backbone: self.backbone,
            item_sequence: self.item_sequence,
            provider: self.provider,
            product_or_service: self.product_or_service,
            serviced: self.serviced,
            adjudication: self.adjudication,
        };
        if self.validating {
            add_item.validate()?;
        }
        Ok(add_item)
    }
}

/// A category total across all adjudicated lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Total {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
}

impl Total {
    /// Start building a Total.
    pub fn builder() -> TotalBuilder {
        TotalBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// What the total covers.
    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    /// The summed amount.
    pub fn amount(&self) -> Option<&Money> {
        self.amount.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> TotalBuilder {
        TotalBuilder {
            backbone: self.backbone.clone(),
            category: self.category.clone(),
            amount: self.amount.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.total");
        self.backbone.check(&mut checker);
        support::require(&mut checker, self.category.as_ref(), "category");
        support::require(&mut checker, self.amount.as_ref(), "amount");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Total {
    fn has_meaningful_content(&self) -> bool {
        self.category.is_some() || self.amount.is_some() || self.backbone.has_children()
    }
}

impl Visitable for Total {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponseTotal(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_field("category", &self.category, visitor)?;
        visit::walk_field("amount", &self.amount, visitor)
    }
}

/// Builder for [`Total`].
#[derive(Debug, Clone)]
pub struct TotalBuilder {
    backbone: BackboneData,
    category: Option<CodeableConcept>,
    amount: Option<Money>,
    validating: bool,
}

impl TotalBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            category: None,
            amount: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Set the total category.
    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the summed amount.
    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Total, ValidationFailure> {
        let total = Total {
            backbone: self.backbone,
            category: self.category,
            amount: self.amount,
        };
        if self.validating {
            total.validate()?;
        }
        Ok(total)
    }
}

/// Payment details for the adjudication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payment {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
}

impl Payment {
    /// Start building a Payment.
    pub fn builder() -> PaymentBuilder {
        PaymentBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// Whether this is a partial or complete payment.
    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    /// Expected payment date.
    pub fn date(&self) -> Option<&Date> {
        self.date.as_ref()
    }

    /// Payable amount after adjustment.
    pub fn amount(&self) -> Option<&Money> {
        self.amount.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> PaymentBuilder {
        PaymentBuilder {
            backbone: self.backbone.clone(),
            type_: self.type_.clone(),
            date: self.date.clone(),
            amount: self.amount.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.payment");
        self.backbone.check(&mut checker);
        support::require(&mut checker, self.type_.as_ref(), "type");
        support::require(&mut checker, self.amount.as_ref(), "amount");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for Payment {
    fn has_meaningful_content(&self) -> bool {
        self.type_.is_some()
            || self.date.is_some()
            || self.amount.is_some()
            || self.backbone.has_children()
    }
}

impl Visitable for Payment {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponsePayment(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_field("type", &self.type_, visitor)?;
        visit::walk_field("date", &self.date, visitor)?;
        visit::walk_field("amount", &self.amount, visitor)
    }
}

/// Builder for [`Payment`].
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    backbone: BackboneData,
    type_: Option<CodeableConcept>,
    date: Option<Date>,
    amount: Option<Money>,
    validating: bool,
}

impl PaymentBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            type_: None,
            date: None,
            amount: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Set the payment type.
    pub fn type_(mut self, type_: CodeableConcept) -> Self {
        self.type_ = Some(type_);
        self
    }

    /// Set the expected payment date.
    pub fn date(mut self, date: impl Into<Date>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the payable amount.
    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Enable or disable validation for this `build()` call.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Produce the immutable snapshot, validating unless disabled.
    pub fn build(self) -> Result<Payment, ValidationFailure> {
        let payment = Payment {
            backbone: self.backbone,
            type_: self.type_,
            date: self.date,
            amount: self.amount,
        };
        if self.validating {
            payment.validate()?;
        }
        Ok(payment)
    }
}

/// A note the adjudicator attached to the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessNote {
    #[serde(flatten)]
    backbone: BackboneData,

    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<PositiveInt>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<FhirString>,
}

impl ProcessNote {
    /// Start building a ProcessNote.
    pub fn builder() -> ProcessNoteBuilder {
        ProcessNoteBuilder::new()
    }

    /// Id and extensions.
    pub fn backbone(&self) -> &BackboneData {
        &self.backbone
    }

    /// Note number, referenced from line items.
    pub fn number(&self) -> Option<&PositiveInt> {
        self.number.as_ref()
    }

    /// Display, print, or print-operator classification.
    pub fn type_(&self) -> Option<&Code> {
        self.type_.as_ref()
    }

    /// The note text.
    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    /// Copy every field into a fresh builder.
    pub fn to_builder(&self) -> ProcessNoteBuilder {
        ProcessNoteBuilder {
            backbone: self.backbone.clone(),
            number: self.number.clone(),
            type_: self.type_.clone(),
            text: self.text.clone(),
            validating: true,
        }
    }

    /// Run the structural rules for this node.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut checker = Checker::new("ClaimResponse.processNote");
        self.backbone.check(&mut checker);
        support::value_set_binding(
            &mut checker,
            self.type_.as_ref(),
            "type",
            BindingStrength::Required,
            NOTE_TYPE_VALUE_SET,
            NOTE_TYPE_CODES,
        );
        support::require(&mut checker, self.text.as_ref(), "text");
        support::require_value_or_children(&mut checker, self);
        checker.finish()
    }
}

impl HasContent for ProcessNote {
    fn has_meaningful_content(&self) -> bool {
        self.number.is_some()
            || self.type_.is_some()
            || self.text.is_some()
            || self.backbone.has_children()
    }
}

impl Visitable for ProcessNote {
    fn node(&self) -> NodeRef<'_> {
        NodeRef::ClaimResponseProcessNote(self)
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop> {
        self.backbone.visit_children(visitor)?;
        visit::walk_field("number", &self.number, visitor)?;
        visit::walk_field("type", &self.type_, visitor)?;
        visit::walk_field("text", &self.text, visitor)
    }
}

/// Builder for [`ProcessNote`].
#[derive(Debug, Clone)]
pub struct ProcessNoteBuilder {
    backbone: BackboneData,
    number: Option<PositiveInt>,
    type_: Option<Code>,
    text: Option<FhirString>,
    validating: bool,
}

impl ProcessNoteBuilder {
    fn new() -> Self {
        Self {
            backbone: BackboneData::default(),
            number: None,
            type_: None,
            text: None,
            validating: true,
        }
    }

    /// Set the local element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone.element.id = Some(id.into());
        self
    }

    /// Append one extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.backbone.element.extension.push(extension);
        self
    }

    /// Append one modifier extension.
    pub fn modifier_extension(mut self, modifier_extension: Extension) -> Self {
        self.backbone.modifier_extension.push(modifier_extension);
        self
    }

    /// Set the note number.
    pub fn number(mut self, number: impl Into<PositiveInt>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the note classification.
    pub fn type_(mut self, type_: impl Into<Code>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the note text.
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
    pub fn build(self) -> Result<ProcessNote, ValidationFailure> {
        let process_note = ProcessNote {
            backbone: self.backbone,
            number: self.number,
            type_: self.type_,
            text: self.text,
        };
        if self.validating {
            process_note.validate()?;
        }
        Ok(process_note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use std::num::NonZeroU32;

    fn benefit_category() -> CodeableConcept {
        CodeableConcept::builder()
            .coding(
                crate::model::datatype::Coding::builder()
                    .system("http://terminology.hl7.org/CodeSystem/adjudication")
                    .code("benefit")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn seq(n: u32) -> PositiveInt {
        PositiveInt::of(NonZeroU32::new(n).unwrap())
    }

    #[test]
    fn item_requires_sequence_and_adjudication() {
        let err = Item::builder().build().unwrap_err();
        assert!(err.names("itemSequence"));
        assert!(err.names("adjudication"));
        // Both are reported in one failure, not first-error-wins.
        assert!(err.errors().count() >= 2);
    }

    #[test]
    fn item_with_adjudication_builds() {
        let item = Item::builder()
            .item_sequence(seq(1))
            .adjudication(
                Adjudication::builder()
                    .category(benefit_category())
                    .value(rust_decimal_macros::dec!(120.00))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(item.adjudication().len(), 1);
        assert_eq!(item, item.to_builder().build().unwrap());
    }

    #[test]
    fn adjudication_requires_category() {
        let err = Adjudication::builder()
            .value(rust_decimal_macros::dec!(1))
            .build()
            .unwrap_err();
        assert!(err.names("category"));
    }

    #[test]
    fn serviced_choice_tags() {
        let date: Serviced = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().into();
        assert_eq!(date.type_name(), "date");
        let period: Serviced = Period::builder()
            .start(
                chrono::DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap(),
            )
            .build()
            .unwrap()
            .into();
        assert_eq!(period.type_name(), "Period");
        assert!(Serviced::ALLOWED_TYPES.contains(&date.type_name()));
    }

    #[test]
    fn add_item_requires_product_and_adjudication() {
        let err = AddItem::builder().item_sequence(seq(2)).build().unwrap_err();
        assert!(err.names("productOrService"));
        assert!(err.names("adjudication"));
    }

    #[test]
    fn process_note_type_binding() {
        let err = ProcessNote::builder()
            .text("claim pended for review")
            .type_("sticky")
            .build()
            .unwrap_err();
        assert!(matches!(
            &err.issues[0].violation,
            Violation::BindingViolation { code, .. } if code == "sticky"
        ));

        assert!(
            ProcessNote::builder()
                .number(seq(1))
                .type_("display")
                .text("claim pended for review")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn payment_requires_type_and_amount() {
        let err = Payment::builder()
            .date(chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .build()
            .unwrap_err();
        assert!(err.names("ClaimResponse.payment.type"));
        assert!(err.names("ClaimResponse.payment.amount"));
    }

    #[test]
    fn total_requires_category_and_amount() {
        let err = Total::builder().build().unwrap_err();
        assert!(err.names("category"));
        assert!(err.names("amount"));
    }
}
