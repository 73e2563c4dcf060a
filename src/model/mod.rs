//! The immutable object model: elements, primitives, shared datatypes, and
//! the resource types built from them.
//!
//! Everything here is constructed through builders and never mutated
//! afterwards, so snapshots can be shared freely across threads.

pub mod claim_response;
pub mod datatype;
pub mod element;
pub mod organization;
pub mod patient;
pub mod primitive;
pub mod resource;

pub use claim_response::ClaimResponse;
pub use datatype::{
    CodeableConcept, Coding, Identifier, Meta, Money, Narrative, Period, Quantity, Reference,
};
pub use element::{BackboneData, ElementData, Extension, ExtensionValue, HasContent};
pub use organization::Organization;
pub use patient::Patient;
pub use primitive::{
    Boolean, Code, Date, DateTime, Decimal, FhirString, Integer, PositiveInt, Primitive,
    PrimitiveValue, Uri,
};
pub use resource::{DomainResourceData, Resource, ResourceData};
