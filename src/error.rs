//! Error types for model construction and validation.
//!
//! Every structural rule that `build()` can trip is a [`Violation`]; the
//! violations collected for one `build()` call are surfaced together as a
//! single [`ValidationFailure`] so a caller can fix a whole resource in one
//! pass.

use std::fmt;

use thiserror::Error;

/// A single structural rule violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required singular element was never set, or a required repeating
    /// element is empty.
    #[error("missing required element")]
    MissingRequiredField,

    /// A repeating element contains an empty placeholder entry.
    #[error("repeating element does not permit empty entries (entry {index})")]
    NullListElement {
        /// Zero-based position of the offending entry.
        index: usize,
    },

    /// A choice element holds a value whose type is outside the declared set.
    #[error("invalid type: {found} for choice element, must be one of: {}", allowed.join(", "))]
    TypeConstraintViolation {
        /// Type tag of the stored value.
        found: String,
        /// The declared closed set of allowed type tags.
        allowed: Vec<String>,
    },

    /// A reference resolves to a resource kind outside the declared target set.
    #[error("resource kind in reference: '{found}' must be one of: {}", allowed.join(", "))]
    ReferenceTypeViolation {
        /// The resource kind (or the literal value, when no kind parses).
        found: String,
        /// The declared allowed target kinds.
        allowed: Vec<String>,
    },

    /// A required-strength coded element uses a code outside its bound value set.
    #[error("code: '{code}' is not a member of value set: {value_set}")]
    BindingViolation {
        /// The offending code value.
        code: String,
        /// URL of the bound value set.
        value_set: String,
    },

    /// ele-1: an element carries neither a value nor children.
    #[error("element must have a value or children (ele-1)")]
    EmptyElementViolation,

    /// A bulk list replacement was given an absent collection rather than an
    /// empty one.
    #[error("replacement collection for repeating element must not be absent")]
    NullArgument,
}

/// Severity of a recorded issue. Only `Error` issues fail a build;
/// `Warning` covers advisory-strength binding misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Advisory; never fails validation.
    Warning,
    /// Fatal for the enclosing `build()` call.
    Error,
}

/// One violation located at a field path, e.g. `ClaimResponse.insurer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Issue severity.
    pub severity: Severity,
    /// Dotted path naming the offending element.
    pub path: String,
    /// The violated rule.
    pub violation: Violation,
}

impl ValidationIssue {
    /// Create an error-severity issue.
    pub fn error(path: impl Into<String>, violation: Violation) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            violation,
        }
    }

    /// Create a warning-severity issue.
    pub fn warning(path: impl Into<String>, violation: Violation) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            violation,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity} at {}: {}", self.path, self.violation)
    }
}

/// Aggregate failure for one `build()` call, naming every offending field
/// path rather than stopping at the first problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Every issue recorded during the build, in check order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    /// Issues with `Error` severity.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    /// True if some error-severity issue sits at a path ending in `suffix`.
    pub fn names(&self, suffix: &str) -> bool {
        self.errors().any(|issue| issue.path.ends_with(suffix))
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display_names_path_and_rule() {
        let issue = ValidationIssue::error("ClaimResponse.insurer", Violation::MissingRequiredField);
        let message = issue.to_string();
        assert!(message.contains("ClaimResponse.insurer"));
        assert!(message.contains("missing required element"));
    }

    #[test]
    fn failure_display_lists_every_issue() {
        let failure = ValidationFailure {
            issues: vec![
                ValidationIssue::error("Coding.code", Violation::MissingRequiredField),
                ValidationIssue::error(
                    "Coding",
                    Violation::NullListElement { index: 2 },
                ),
            ],
        };
        let message = failure.to_string();
        assert!(message.contains("2 issue(s)"));
        assert!(message.contains("Coding.code"));
        assert!(message.contains("entry 2"));
    }

    #[test]
    fn names_ignores_warnings() {
        let failure = ValidationFailure {
            issues: vec![ValidationIssue::warning(
                "Patient.maritalStatus",
                Violation::BindingViolation {
                    code: "XX".into(),
                    value_set: "http://hl7.org/fhir/ValueSet/marital-status".into(),
                },
            )],
        };
        assert!(!failure.names("maritalStatus"));
    }
}
