//! End-to-end construction and validation scenarios for ClaimResponse.

use chrono::DateTime as ChronoDateTime;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use std::num::NonZeroU32;

use fhirmodel::model::claim_response::{Adjudication, Item, Payment, ProcessNote, Total};
use fhirmodel::{
    ClaimResponse, CodeableConcept, Coding, Money, Organization, Patient, PositiveInt, Reference,
    Resource, Violation,
};

fn claim_type() -> CodeableConcept {
    CodeableConcept::builder()
        .coding(
            Coding::builder()
                .system("http://terminology.hl7.org/CodeSystem/claim-type")
                .code("professional")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn adjudication_category(code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .coding(
            Coding::builder()
                .system("http://terminology.hl7.org/CodeSystem/adjudication")
                .code(code)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn usd(value: rust_decimal::Decimal) -> Money {
    Money::builder().value(value).currency("USD").build().unwrap()
}

fn seq(n: u32) -> PositiveInt {
    PositiveInt::of(NonZeroU32::new(n).unwrap())
}

fn minimal() -> fhirmodel::model::claim_response::ClaimResponseBuilder {
    ClaimResponse::builder()
        .status("active")
        .type_(claim_type())
        .use_("claim")
        .patient(Reference::to("Patient/pat-1").build().unwrap())
        .created(ChronoDateTime::parse_from_rfc3339("2024-08-01T10:30:00Z").unwrap())
        .insurer(Reference::to("Organization/ins-1").build().unwrap())
        .outcome("complete")
}

#[test]
fn minimal_response_builds() {
    let response = minimal().id("cr-1").build().unwrap();
    assert_eq!(response.id(), Some("cr-1"));
    assert_eq!(
        response.outcome().and_then(|o| o.value()).map(String::as_str),
        Some("complete")
    );
}

#[test]
fn missing_insurer_names_only_the_insurer() {
    let err = ClaimResponse::builder()
        .status("active")
        .type_(claim_type())
        .use_("claim")
        .patient(Reference::to("Patient/pat-1").build().unwrap())
        .created(ChronoDateTime::parse_from_rfc3339("2024-08-01T10:30:00Z").unwrap())
        .outcome("complete")
        .build()
        .unwrap_err();
    let paths: Vec<_> = err.errors().map(|issue| issue.path.as_str()).collect();
    assert_eq!(paths, vec!["ClaimResponse.insurer"]);
    assert_eq!(err.issues[0].violation, Violation::MissingRequiredField);
}

#[test]
fn patient_reference_must_point_at_a_patient() {
    let err = minimal()
        .patient(Reference::to("Organization/ins-1").build().unwrap())
        .build()
        .unwrap_err();
    assert!(err.names("ClaimResponse.patient"));
    assert!(matches!(
        &err.issues[0].violation,
        Violation::ReferenceTypeViolation { found, .. } if found == "Organization"
    ));
}

#[test]
fn all_violations_are_collected_in_one_failure() {
    // No status, a wrong-kind patient, and a bad outcome code: three
    // independent problems, one failure.
    let err = ClaimResponse::builder()
        .type_(claim_type())
        .use_("claim")
        .patient(Reference::to("Organization/ins-1").build().unwrap())
        .created(ChronoDateTime::parse_from_rfc3339("2024-08-01T10:30:00Z").unwrap())
        .insurer(Reference::to("Organization/ins-1").build().unwrap())
        .outcome("done")
        .build()
        .unwrap_err();
    assert!(err.names("ClaimResponse.status"));
    assert!(err.names("ClaimResponse.patient"));
    assert!(err.names("ClaimResponse.outcome"));
    assert_eq!(err.errors().count(), 3);
}

#[test]
fn lenient_build_always_succeeds_structurally() {
    let draft = ClaimResponse::builder().validating(false).build().unwrap();
    assert!(draft.status().is_none());
    // The snapshot is still a first-class value: validate() reports what
    // is missing without rebuilding.
    let err = draft.validate().unwrap_err();
    assert!(err.names("ClaimResponse.status"));
    assert!(err.names("ClaimResponse.insurer"));
}

#[test]
fn to_builder_round_trip_preserves_equality() {
    let original = minimal()
        .id("cr-1")
        .disposition("Claim settled as per contract.")
        .item(
            Item::builder()
                .item_sequence(seq(1))
                .adjudication(
                    Adjudication::builder()
                        .category(adjudication_category("benefit"))
                        .amount(usd(dec!(120.50)))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let rebuilt = original.to_builder().build().unwrap();
    assert_eq!(original, rebuilt);
}

#[test]
fn copy_with_modification_changes_only_the_touched_field() {
    let original = minimal().id("cr-1").build().unwrap();
    let amended = original
        .to_builder()
        .outcome("partial")
        .build()
        .unwrap();
    assert_ne!(original, amended);
    assert_eq!(original.id(), amended.id());
    assert_eq!(
        amended.outcome().and_then(|o| o.value()).map(String::as_str),
        Some("partial")
    );
}

#[test]
fn content_hash_is_recomputed_after_copy_with_modification() {
    let original = minimal().id("cr-1").build().unwrap();
    // Fill the original's memo cell before rebuilding from it.
    let original_hash = original.content_hash();

    let amended = original
        .to_builder()
        .outcome("partial")
        .build()
        .unwrap();
    assert_ne!(original, amended);
    assert_ne!(original_hash, amended.content_hash());

    // A rebuild with no changes is structurally equal and hashes equal.
    let unchanged = original.to_builder().build().unwrap();
    assert_eq!(original, unchanged);
    assert_eq!(original_hash, unchanged.content_hash());
}

#[test]
fn content_hash_is_stable_and_distinguishes_content() {
    let a = minimal().id("cr-1").build().unwrap();
    let b = minimal().id("cr-1").build().unwrap();
    let c = minimal().id("cr-2").build().unwrap();
    assert_eq!(a.content_hash(), a.content_hash());
    assert_eq!(a.content_hash(), b.content_hash());
    assert_ne!(a.content_hash(), c.content_hash());
}

#[test]
fn full_response_with_items_totals_payment_and_notes() {
    let response = minimal()
        .id("cr-full")
        .item(
            Item::builder()
                .item_sequence(seq(1))
                .note_number(seq(1))
                .adjudication(
                    Adjudication::builder()
                        .category(adjudication_category("submitted"))
                        .amount(usd(dec!(135.57)))
                        .build()
                        .unwrap(),
                )
                .adjudication(
                    Adjudication::builder()
                        .category(adjudication_category("benefit"))
                        .amount(usd(dec!(90.47)))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .total(
            Total::builder()
                .category(adjudication_category("benefit"))
                .amount(usd(dec!(90.47)))
                .build()
                .unwrap(),
        )
        .payment(
            Payment::builder()
                .type_(
                    CodeableConcept::builder()
                        .coding(
                            Coding::builder()
                                .system("http://terminology.hl7.org/CodeSystem/ex-paymenttype")
                                .code("complete")
                                .build()
                                .unwrap(),
                        )
                        .build()
                        .unwrap(),
                )
                .date(chrono::NaiveDate::from_ymd_opt(2024, 8, 31).unwrap())
                .amount(usd(dec!(90.47)))
                .build()
                .unwrap(),
        )
        .process_note(
            ProcessNote::builder()
                .number(seq(1))
                .type_("display")
                .text("Claim settled as per contract.")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(response.item()[0].adjudication().len(), 2);
    assert_eq!(response.total().len(), 1);
    assert_eq!(
        response
            .payment()
            .and_then(|p| p.amount())
            .and_then(|a| a.value())
            .and_then(|v| v.value()),
        Some(&dec!(90.47))
    );
}

#[test]
fn contained_resources_round_trip_through_the_sum_type() {
    let insurer = Organization::builder()
        .id("ins-1")
        .name("Umbrella Health")
        .build()
        .unwrap();
    let patient = Patient::builder().id("pat-1").gender("female").build().unwrap();
    let response = minimal()
        .contained(insurer)
        .contained(patient)
        .patient(Reference::to("#pat-1").build().unwrap())
        .insurer(Reference::to("#ins-1").build().unwrap())
        .build()
        .unwrap();

    let contained = response.domain().contained();
    assert_eq!(contained.len(), 2);
    assert_eq!(contained[0].resource_type_name(), "Organization");
    assert_eq!(contained[1].id(), Some("pat-1"));
    assert!(matches!(contained[1], Resource::Patient(_)));
}

#[test]
fn serde_round_trip_preserves_equality() {
    let original = minimal().id("cr-1").build().unwrap();
    let json = serde_json::to_string(&original).unwrap();
    let decoded: ClaimResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(original, decoded);
    // The reparsed snapshot still passes its own validation.
    decoded.validate().unwrap();
}

#[test]
fn camel_case_field_names_on_the_wire() {
    let response = minimal()
        .id("cr-1")
        .pre_auth_ref("PA-2024-0042")
        .build()
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["preAuthRef"]["value"], "PA-2024-0042");
    assert_eq!(json["use"]["value"], "claim");
    assert!(json.get("pre_auth_ref").is_none());
}

proptest! {
    #[test]
    fn coding_serde_round_trip(
        system in "[a-z]{3,10}",
        code in "[a-z\\-]{1,16}",
    ) {
        let coding = Coding::builder()
            .system(format!("http://example.org/{system}"))
            .code(code)
            .build()
            .unwrap();
        let json = serde_json::to_string(&coding).unwrap();
        let decoded: Coding = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&coding, &decoded);
        prop_assert_eq!(coding.to_builder().build().unwrap(), decoded);
    }
}
