//! Traversal-order and hook-contract tests for the visitor.

use chrono::DateTime as ChronoDateTime;
use pretty_assertions::assert_eq;
use std::num::NonZeroU32;
use std::ops::ControlFlow;

use fhirmodel::model::claim_response::{Adjudication, Item};
use fhirmodel::{
    ClaimResponse, CodeableConcept, Coding, CollectingVisitor, Descent, NodeRef, PositiveInt,
    Reference, Stop, Visitable, Visitor,
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

fn seq(n: u32) -> PositiveInt {
    PositiveInt::of(NonZeroU32::new(n).unwrap())
}

fn sample() -> ClaimResponse {
    ClaimResponse::builder()
        .status("active")
        .type_(claim_type())
        .use_("claim")
        .patient(Reference::to("Patient/pat-1").build().unwrap())
        .created(ChronoDateTime::parse_from_rfc3339("2024-08-01T10:30:00Z").unwrap())
        .insurer(Reference::to("Organization/ins-1").build().unwrap())
        .outcome("complete")
        .build()
        .unwrap()
}

#[test]
fn children_are_visited_in_declaration_order() {
    let mut collector = CollectingVisitor::new();
    assert!(sample().accept(&mut collector).is_continue());

    let paths: Vec<_> = collector
        .visited()
        .iter()
        .map(|(path, _)| path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec![
            "ClaimResponse",
            "ClaimResponse.status",
            "ClaimResponse.type",
            "ClaimResponse.type.coding[0]",
            "ClaimResponse.type.coding[0].system",
            "ClaimResponse.type.coding[0].code",
            "ClaimResponse.use",
            "ClaimResponse.patient",
            "ClaimResponse.patient.reference",
            "ClaimResponse.created",
            "ClaimResponse.insurer",
            "ClaimResponse.insurer.reference",
            "ClaimResponse.outcome",
        ]
    );
}

#[test]
fn repeating_fields_keep_insertion_order() {
    fn category(code: &str) -> CodeableConcept {
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

    let item = Item::builder()
        .item_sequence(seq(1))
        .adjudication(
            Adjudication::builder()
                .category(category("submitted"))
                .build()
                .unwrap(),
        )
        .adjudication(
            Adjudication::builder()
                .category(category("benefit"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let mut collector = CollectingVisitor::new();
    assert!(item.accept(&mut collector).is_continue());
    let adjudications: Vec<_> = collector
        .visited()
        .iter()
        .filter(|(_, tag)| *tag == "ClaimResponse.item.adjudication")
        .map(|(path, _)| path.as_str())
        .collect();
    assert_eq!(
        adjudications,
        vec![
            "ClaimResponse.item.adjudication[0]",
            "ClaimResponse.item.adjudication[1]",
        ]
    );
}

/// Records visited type tags while vetoing every Reference subtree.
#[derive(Default)]
struct ReferenceVeto {
    tags: Vec<&'static str>,
}

impl Visitor for ReferenceVeto {
    fn pre_visit(&mut self, node: NodeRef<'_>) -> ControlFlow<Stop, bool> {
        ControlFlow::Continue(!matches!(node, NodeRef::Reference(_)))
    }

    fn visit_start(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        self.tags.push(node.type_name());
        ControlFlow::Continue(())
    }
}

#[test]
fn pre_visit_veto_skips_the_node_and_its_subtree() {
    let mut visitor = ReferenceVeto::default();
    assert!(sample().accept(&mut visitor).is_continue());
    // Neither the references nor their literal children appear; their
    // siblings still do.
    assert!(!visitor.tags.contains(&"Reference"));
    assert!(visitor.tags.contains(&"ClaimResponse"));
    assert!(visitor.tags.contains(&"CodeableConcept"));
    // The only string-carrying leaves left are status, the coding pair,
    // use, and outcome.
    assert_eq!(visitor.tags.iter().filter(|t| **t == "string").count(), 5);
}

/// Skips descent into CodeableConcept while still running teardown hooks.
#[derive(Default)]
struct ConceptSkipper {
    starts: Vec<&'static str>,
    ends: Vec<&'static str>,
}

impl Visitor for ConceptSkipper {
    fn visit_start(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        self.starts.push(node.type_name());
        ControlFlow::Continue(())
    }

    fn visit(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop, Descent> {
        if matches!(node, NodeRef::CodeableConcept(_)) {
            ControlFlow::Continue(Descent::Skip)
        } else {
            ControlFlow::Continue(Descent::Children)
        }
    }

    fn visit_end(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        self.ends.push(node.type_name());
        ControlFlow::Continue(())
    }
}

#[test]
fn descent_skip_prunes_children_but_closes_the_node() {
    let mut visitor = ConceptSkipper::default();
    assert!(sample().accept(&mut visitor).is_continue());
    assert!(visitor.starts.contains(&"CodeableConcept"));
    assert!(!visitor.starts.contains(&"Coding"));
    // Every opened node was closed, in particular the pruned one.
    let mut starts = visitor.starts.clone();
    let mut ends = visitor.ends.clone();
    starts.sort_unstable();
    ends.sort_unstable();
    assert_eq!(starts, ends);
}

/// Stops the whole traversal after a fixed number of nodes.
struct Budget {
    remaining: usize,
    seen: usize,
}

impl Visitor for Budget {
    fn visit_start(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        _node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        if self.remaining == 0 {
            return ControlFlow::Break(Stop);
        }
        self.remaining -= 1;
        self.seen += 1;
        ControlFlow::Continue(())
    }
}

#[test]
fn breaking_with_stop_ends_the_whole_traversal() {
    let mut visitor = Budget {
        remaining: 4,
        seen: 0,
    };
    let outcome = sample().accept(&mut visitor);
    assert_eq!(outcome, ControlFlow::Break(Stop));
    assert_eq!(visitor.seen, 4);
}

#[test]
fn collecting_visitor_reports_dotted_backbone_tags() {
    let item = Item::builder()
        .item_sequence(seq(1))
        .adjudication(
            Adjudication::builder()
                .category(claim_type())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let mut collector = CollectingVisitor::new();
    assert!(item.accept(&mut collector).is_continue());
    let (root_path, root_tag) = &collector.visited()[0];
    assert_eq!(root_path, "ClaimResponse.item");
    assert_eq!(*root_tag, "ClaimResponse.item");
}
