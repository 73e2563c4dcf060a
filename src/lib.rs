//! # fhirmodel
//!
//! An immutable, validating object model for FHIR R4 claim adjudication
//! resources.
//!
//! ## Features
//!
//! - **Immutable snapshots**: every node is constructed through a builder
//!   and never mutated afterwards, so resources are safe to share across
//!   threads
//! - **Collecting validation**: `build()` reports every structural
//!   violation at once, each located by its dotted field path
//! - **Copy-with-modification**: `to_builder()` reopens any snapshot as a
//!   pre-filled builder
//! - **Traversal**: a visitor walks any tree in declaration order, with
//!   subtree skipping and early termination
//!
//! ## Quick Start
//!
//! ```rust
//! use fhirmodel::model::{ClaimResponse, CodeableConcept, Coding, Reference};
//!
//! # fn example() -> Result<(), fhirmodel::ValidationFailure> {
//! let response = ClaimResponse::builder()
//!     .status("active")
//!     .type_(
//!         CodeableConcept::builder()
//!             .coding(
//!                 Coding::builder()
//!                     .system("http://terminology.hl7.org/CodeSystem/claim-type")
//!                     .code("professional")
//!                     .build()?,
//!             )
//!             .build()?,
//!     )
//!     .use_("claim")
//!     .patient(Reference::to("Patient/example").build()?)
//!     .created(chrono::DateTime::parse_from_rfc3339("2024-08-01T10:30:00Z").unwrap())
//!     .insurer(Reference::to("Organization/hl7pay").build()?)
//!     .outcome("complete")
//!     .build()?;
//!
//! assert_eq!(response.status().and_then(|s| s.value()).map(String::as_str), Some("active"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod model;
pub mod validation;
pub mod visit;

pub use error::{Severity, ValidationFailure, ValidationIssue, Violation};
pub use model::{
    Boolean, ClaimResponse, Code, CodeableConcept, Coding, Date, DateTime, Decimal,
    DomainResourceData, Extension, ExtensionValue, FhirString, HasContent, Identifier, Integer,
    Meta, Money, Narrative, Organization, Patient, Period, PositiveInt, Primitive, Quantity,
    Reference, Resource, Uri,
};
pub use validation::{Binding, BindingStrength, Checker, StaticValueSets, ValueSetProvider};
pub use visit::{CollectingVisitor, Descent, NodeRef, Stop, Visitable, Visitor};
