//! Structural validation engine.
//!
//! Rules run in a fixed order per node: required singulars, required
//! lists, optional lists, choice tags, bindings, reference kinds, and
//! finally the ele-1 emptiness rule. Every violation from one `build()`
//! call is collected before any is surfaced.

pub mod binding;
pub mod registry;
pub mod support;

pub use binding::{Binding, BindingStrength, StaticValueSets, ValueSetProvider};
pub use registry::is_resource_type;
pub use support::Checker;
