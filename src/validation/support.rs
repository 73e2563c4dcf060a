//! Structural check helpers invoked from generated `validate()` bodies.
//!
//! A [`Checker`] accumulates every violation found while validating one
//! node, then `finish()` either passes or surfaces them all at once. The
//! free functions mirror the rule catalog: required elements, list shape,
//! choice-type membership, value-set bindings, reference target kinds, and
//! the ele-1 value-or-children rule.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Severity, ValidationFailure, ValidationIssue, Violation};
use crate::model::datatype::Reference;
use crate::model::element::HasContent;
use crate::model::primitive::Code;
use crate::validation::binding::{Binding, BindingStrength, ValueSetProvider};
use crate::validation::registry;

/// Matches a relative literal reference: `Type/id` with an optional
/// `/_history/version` suffix.
static RELATIVE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)/[A-Za-z0-9\-\.]{1,64}(?:/_history/[A-Za-z0-9\-\.]{1,64})?$")
        .expect("relative reference pattern")
});

/// Collects the violations found while validating one node.
#[derive(Debug)]
pub struct Checker {
    type_name: &'static str,
    issues: Vec<ValidationIssue>,
}

impl Checker {
    /// Start checking a node of the given type; `type_name` prefixes every
    /// issue path (use the dotted backbone path for nested nodes, e.g.
    /// `ClaimResponse.item`).
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            issues: Vec::new(),
        }
    }

    fn path(&self, field: &str) -> String {
        if field.is_empty() {
            self.type_name.to_string()
        } else {
            format!("{}.{}", self.type_name, field)
        }
    }

    /// Record a fatal violation at `field` (empty for the node itself).
    pub fn push_error(&mut self, field: &str, violation: Violation) {
        self.issues
            .push(ValidationIssue::error(self.path(field), violation));
    }

    /// Record an advisory violation; never fails the build.
    pub fn push_warning(&mut self, field: &str, violation: Violation) {
        self.issues
            .push(ValidationIssue::warning(self.path(field), violation));
    }

    /// Issues recorded so far, in check order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Pass when no error-severity issue was recorded; otherwise surface
    /// every recorded issue together. Warnings are logged either way.
    pub fn finish(self) -> Result<(), ValidationFailure> {
        for issue in self
            .issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
        {
            tracing::debug!(node = self.type_name, %issue, "advisory validation issue");
        }
        if self.issues.iter().any(|i| i.severity == Severity::Error) {
            tracing::debug!(
                node = self.type_name,
                issues = self.issues.len(),
                "validation failed"
            );
            Err(ValidationFailure {
                issues: self.issues,
            })
        } else {
            Ok(())
        }
    }
}

/// Record `MissingRequiredField` when a required singular element is unset.
pub fn require<T>(checker: &mut Checker, value: Option<&T>, field: &str) {
    if value.is_none() {
        checker.push_error(field, Violation::MissingRequiredField);
    }
}

/// A required repeating element: non-empty, with no empty-placeholder
/// entries. An empty list is reported as `MissingRequiredField`, matching
/// the empty-required rule.
pub fn require_list<T: HasContent>(checker: &mut Checker, list: &[T], field: &str) {
    if list.is_empty() {
        checker.push_error(field, Violation::MissingRequiredField);
    }
    check_list(checker, list, field);
}

/// An optional repeating element: may be empty, but every entry must carry
/// content. Empty placeholders are the Rust rendering of null entries.
pub fn check_list<T: HasContent>(checker: &mut Checker, list: &[T], field: &str) {
    for (index, entry) in list.iter().enumerate() {
        if !entry.has_meaningful_content() {
            checker.push_error(field, Violation::NullListElement { index });
        }
    }
}

/// Check a choice element's stored type tag against its declared set.
pub fn choice(
    checker: &mut Checker,
    found: Option<&str>,
    field: &str,
    allowed: &'static [&'static str],
) {
    if let Some(found) = found {
        if !allowed.contains(&found) {
            checker.push_error(
                field,
                Violation::TypeConstraintViolation {
                    found: found.to_string(),
                    allowed: allowed.iter().map(|t| t.to_string()).collect(),
                },
            );
        }
    }
}

/// Check a coded element against a binding whose codes are baked into the
/// generated caller. Absent elements and value-less (extension-only) codes
/// pass; misses fail only at `Required` strength.
pub fn value_set_binding(
    checker: &mut Checker,
    code: Option<&Code>,
    field: &str,
    strength: BindingStrength,
    value_set: &str,
    codes: &[&str],
) {
    let Some(value) = code.and_then(Code::value) else {
        return;
    };
    if !codes.contains(&value.as_str()) {
        let violation = Violation::BindingViolation {
            code: value.clone(),
            value_set: value_set.to_string(),
        };
        if strength.is_fatal() {
            checker.push_error(field, violation);
        } else {
            checker.push_warning(field, violation);
        }
    }
}

/// Like [`value_set_binding`], but membership is answered by an external
/// value-set oracle instead of a literal code list.
pub fn binding_with(
    checker: &mut Checker,
    provider: &dyn ValueSetProvider,
    code: Option<&Code>,
    field: &str,
    binding: &Binding,
) {
    let Some(value) = code.and_then(Code::value) else {
        return;
    };
    if !provider.contains(&binding.value_set, value) {
        let violation = Violation::BindingViolation {
            code: value.clone(),
            value_set: binding.value_set.clone(),
        };
        if binding.strength.is_fatal() {
            checker.push_error(field, violation);
        } else {
            checker.push_warning(field, violation);
        }
    }
}

/// Best-effort reference target-kind check.
///
/// The resource kind is read from the literal value of a relative
/// (`Patient/123`) or conditional (`Patient?identifier=..`) reference, and
/// from the explicit `Reference.type` code. Fragment (`#id`) references and
/// absolute URLs with a scheme cannot be resolved locally and pass
/// unchecked; a `None` reference always passes.
pub fn reference_type(
    checker: &mut Checker,
    reference: Option<&Reference>,
    field: &str,
    allowed: &'static [&'static str],
) {
    let Some(reference) = reference else {
        return;
    };
    let owned_allowed = || allowed.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    let mut literal_kind: Option<&str> = None;
    if let Some(literal) = reference.literal() {
        if !literal.starts_with('#') && !has_scheme(literal) {
            let kind = match literal.split_once('?') {
                // conditional reference
                Some((kind, _)) => Some(kind),
                None => RELATIVE_REFERENCE
                    .captures(literal)
                    .map(|captures| captures.get(1).expect("kind group").as_str()),
            };
            match kind {
                None => checker.push_error(
                    field,
                    Violation::ReferenceTypeViolation {
                        found: literal.to_string(),
                        allowed: owned_allowed(),
                    },
                ),
                Some(kind) if !registry::is_resource_type(kind) || !allowed.contains(&kind) => {
                    checker.push_error(
                        field,
                        Violation::ReferenceTypeViolation {
                            found: kind.to_string(),
                            allowed: owned_allowed(),
                        },
                    );
                }
                Some(kind) => literal_kind = Some(kind),
            }
        }
    }

    if let Some(explicit) = reference.type_().and_then(Code::value) {
        if !registry::is_resource_type(explicit) || !allowed.contains(&explicit.as_str()) {
            checker.push_error(
                field,
                Violation::ReferenceTypeViolation {
                    found: explicit.clone(),
                    allowed: owned_allowed(),
                },
            );
        } else if let Some(kind) = literal_kind {
            // Both markers present: they must agree.
            if kind != explicit.as_str() {
                checker.push_error(
                    field,
                    Violation::ReferenceTypeViolation {
                        found: kind.to_string(),
                        allowed: vec![explicit.clone()],
                    },
                );
            }
        }
    }
}

/// Apply [`reference_type`] to every entry of a repeating reference element.
pub fn reference_type_in(
    checker: &mut Checker,
    references: &[Reference],
    field: &str,
    allowed: &'static [&'static str],
) {
    for reference in references {
        reference_type(checker, Some(reference), field, allowed);
    }
}

/// ele-1: the node must carry a value or children. Checked last so an
/// all-empty node yields one summary error instead of a cascade.
pub fn require_value_or_children<T: HasContent>(checker: &mut Checker, node: &T) {
    if !node.has_meaningful_content() {
        checker.push_error("", Violation::EmptyElementViolation);
    }
}

/// Bulk list replacement for decoders: distinguishes an absent collection
/// (`NullArgument`) from an empty one (valid).
pub fn replace_list<T>(
    field: &str,
    collection: Option<Vec<T>>,
) -> Result<Vec<T>, ValidationFailure> {
    collection.ok_or_else(|| ValidationFailure {
        issues: vec![ValidationIssue::error(field, Violation::NullArgument)],
    })
}

fn has_scheme(literal: &str) -> bool {
    url::Url::parse(literal).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::primitive::FhirString;

    fn finish_violations(checker: Checker) -> Vec<Violation> {
        match checker.finish() {
            Ok(()) => Vec::new(),
            Err(failure) => failure.issues.into_iter().map(|i| i.violation).collect(),
        }
    }

    #[test]
    fn require_reports_missing() {
        let mut checker = Checker::new("Coding");
        require(&mut checker, None::<&FhirString>, "code");
        assert_eq!(
            finish_violations(checker),
            vec![Violation::MissingRequiredField]
        );
    }

    #[test]
    fn required_list_empty_is_missing_required() {
        let mut checker = Checker::new("ClaimResponse.item");
        require_list(&mut checker, &[] as &[FhirString], "adjudication");
        assert_eq!(
            finish_violations(checker),
            vec![Violation::MissingRequiredField]
        );
    }

    #[test]
    fn placeholder_entries_are_flagged_per_index() {
        let mut checker = Checker::new("Coding");
        let list = vec![
            FhirString::of("a".to_string()),
            FhirString::default(),
            FhirString::default(),
        ];
        check_list(&mut checker, &list, "extension");
        assert_eq!(
            finish_violations(checker),
            vec![
                Violation::NullListElement { index: 1 },
                Violation::NullListElement { index: 2 }
            ]
        );
    }

    #[test]
    fn choice_rejects_tag_outside_declared_set() {
        let mut checker = Checker::new("ClaimResponse.addItem");
        choice(&mut checker, Some("Timing"), "serviced", &["date", "Period"]);
        let violations = finish_violations(checker);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            &violations[0],
            Violation::TypeConstraintViolation { found, .. } if found == "Timing"
        ));
    }

    #[test]
    fn choice_accepts_member_and_absent() {
        let mut checker = Checker::new("ClaimResponse.addItem");
        choice(&mut checker, Some("date"), "serviced", &["date", "Period"]);
        choice(&mut checker, None, "serviced", &["date", "Period"]);
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn binding_miss_is_fatal_only_when_required() {
        let value_set = "http://hl7.org/fhir/ValueSet/remittance-outcome";
        let codes = &["queued", "complete", "error", "partial"];
        let code = Code::of("done".to_string());

        let mut checker = Checker::new("ClaimResponse");
        value_set_binding(
            &mut checker,
            Some(&code),
            "outcome",
            BindingStrength::Required,
            value_set,
            codes,
        );
        assert!(checker.finish().is_err());

        let mut checker = Checker::new("ClaimResponse");
        value_set_binding(
            &mut checker,
            Some(&code),
            "outcome",
            BindingStrength::Preferred,
            value_set,
            codes,
        );
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn oracle_backed_binding() {
        use crate::validation::binding::StaticValueSets;

        let sets = StaticValueSets::new()
            .with("http://hl7.org/fhir/ValueSet/fm-status", ["active", "draft"]);
        let binding = Binding::new(
            "http://hl7.org/fhir/ValueSet/fm-status",
            BindingStrength::Required,
        );

        let mut checker = Checker::new("ClaimResponse");
        binding_with(
            &mut checker,
            &sets,
            Some(&Code::of("active".to_string())),
            "status",
            &binding,
        );
        assert!(checker.finish().is_ok());

        let mut checker = Checker::new("ClaimResponse");
        binding_with(
            &mut checker,
            &sets,
            Some(&Code::of("retired".to_string())),
            "status",
            &binding,
        );
        assert!(checker.finish().is_err());
    }

    #[test]
    fn replace_list_distinguishes_absent_from_empty() {
        let err = replace_list::<FhirString>("item", None).unwrap_err();
        assert_eq!(err.issues[0].violation, Violation::NullArgument);
        assert!(replace_list::<FhirString>("item", Some(Vec::new()))
            .unwrap()
            .is_empty());
    }
}
