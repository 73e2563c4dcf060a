//! Generic pre-order traversal over heterogeneous model trees.
//!
//! The node kinds form the closed [`NodeRef`] enum and [`walk`] drives the
//! hook sequence directly, with no double dispatch. For each node the walk
//! calls `pre_visit` (which may veto the node and its subtree),
//! `visit_start`, `visit` (which may veto descent into children), the
//! declared children in declaration order, `visit_end`, and `post_visit`.
//! Any hook can end the whole traversal by breaking with [`Stop`].

mod collecting;

pub use collecting::CollectingVisitor;

use std::ops::ControlFlow;

use crate::model::claim_response::{
    AddItem, Adjudication, ClaimResponse, Item, Payment, ProcessNote, Total,
};
use crate::model::datatype::{
    CodeableConcept, Coding, Identifier, Meta, Money, Narrative, Period, Quantity, Reference,
};
use crate::model::element::Extension;
use crate::model::organization::Organization;
use crate::model::patient::Patient;
use crate::model::primitive::{
    Boolean, Date, DateTime, Decimal, FhirString, Integer, PositiveInt,
};

/// Sentinel value that ends an entire traversal early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop;

/// Whether to descend into a node's children after `visit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Visit the declared children in declaration order.
    Children,
    /// Skip the children; `visit_end`/`post_visit` still run.
    Skip,
}

/// A borrowed view of any node kind in the model.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// A boolean primitive.
    Boolean(&'a Boolean),
    /// A string-carrying primitive (`string`, `code`, `uri`).
    String(&'a FhirString),
    /// An integer primitive.
    Integer(&'a Integer),
    /// A positiveInt primitive.
    PositiveInt(&'a PositiveInt),
    /// A decimal primitive.
    Decimal(&'a Decimal),
    /// A date primitive.
    Date(&'a Date),
    /// A dateTime primitive.
    DateTime(&'a DateTime),
    /// An extension.
    Extension(&'a Extension),
    /// A Coding datatype.
    Coding(&'a Coding),
    /// A CodeableConcept datatype.
    CodeableConcept(&'a CodeableConcept),
    /// An Identifier datatype.
    Identifier(&'a Identifier),
    /// A Period datatype.
    Period(&'a Period),
    /// A Quantity datatype.
    Quantity(&'a Quantity),
    /// A Money datatype.
    Money(&'a Money),
    /// A Reference datatype.
    Reference(&'a Reference),
    /// A Narrative datatype.
    Narrative(&'a Narrative),
    /// A Meta datatype.
    Meta(&'a Meta),
    /// A ClaimResponse resource.
    ClaimResponse(&'a ClaimResponse),
    /// A ClaimResponse line item.
    ClaimResponseItem(&'a Item),
    /// An adjudication result.
    ClaimResponseAdjudication(&'a Adjudication),
    /// An insurer-added line item.
    ClaimResponseAddItem(&'a AddItem),
    /// An adjudication total.
    ClaimResponseTotal(&'a Total),
    /// Payment details.
    ClaimResponsePayment(&'a Payment),
    /// A processing note.
    ClaimResponseProcessNote(&'a ProcessNote),
    /// A Patient resource.
    Patient(&'a Patient),
    /// An Organization resource.
    Organization(&'a Organization),
}

impl NodeRef<'_> {
    /// The node's type tag, dotted for backbone elements.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeRef::Boolean(_) => "boolean",
            NodeRef::String(_) => "string",
            NodeRef::Integer(_) => "integer",
            NodeRef::PositiveInt(_) => "positiveInt",
            NodeRef::Decimal(_) => "decimal",
            NodeRef::Date(_) => "date",
            NodeRef::DateTime(_) => "dateTime",
            NodeRef::Extension(_) => "Extension",
            NodeRef::Coding(_) => "Coding",
            NodeRef::CodeableConcept(_) => "CodeableConcept",
            NodeRef::Identifier(_) => "Identifier",
            NodeRef::Period(_) => "Period",
            NodeRef::Quantity(_) => "Quantity",
            NodeRef::Money(_) => "Money",
            NodeRef::Reference(_) => "Reference",
            NodeRef::Narrative(_) => "Narrative",
            NodeRef::Meta(_) => "Meta",
            NodeRef::ClaimResponse(_) => "ClaimResponse",
            NodeRef::ClaimResponseItem(_) => "ClaimResponse.item",
            NodeRef::ClaimResponseAdjudication(_) => "ClaimResponse.item.adjudication",
            NodeRef::ClaimResponseAddItem(_) => "ClaimResponse.addItem",
            NodeRef::ClaimResponseTotal(_) => "ClaimResponse.total",
            NodeRef::ClaimResponsePayment(_) => "ClaimResponse.payment",
            NodeRef::ClaimResponseProcessNote(_) => "ClaimResponse.processNote",
            NodeRef::Patient(_) => "Patient",
            NodeRef::Organization(_) => "Organization",
        }
    }
}

/// A node that can expose itself to traversal.
pub trait Visitable {
    /// Borrowed node-kind view of this node.
    fn node(&self) -> NodeRef<'_>;

    /// Walk the declared children in declaration order: primitive fields,
    /// then structured fields, then repeating fields, matching the schema's
    /// field order. Leaf nodes do nothing. This ordering is a contract
    /// relied on by serializers.
    fn visit_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop>;

    /// Run a full traversal rooted at this node.
    fn accept(&self, visitor: &mut dyn Visitor) -> ControlFlow<Stop>
    where
        Self: Sized,
    {
        walk(self.node().type_name(), None, self, visitor)
    }
}

/// Traversal hooks. Every method has a pass-through default, so a visitor
/// implements only what it needs.
#[allow(unused_variables)]
pub trait Visitor {
    /// Called before anything else for a node; return `false` to skip the
    /// node and its entire subtree.
    fn pre_visit(&mut self, node: NodeRef<'_>) -> ControlFlow<Stop, bool> {
        ControlFlow::Continue(true)
    }

    /// Setup hook, called once per visited node.
    fn visit_start(
        &mut self,
        name: &str,
        index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        ControlFlow::Continue(())
    }

    /// The visit itself; return [`Descent::Skip`] to keep the walk out of
    /// the node's children while still running the teardown hooks.
    fn visit(
        &mut self,
        name: &str,
        index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop, Descent> {
        ControlFlow::Continue(Descent::Children)
    }

    /// Teardown hook, mirror of `visit_start`.
    fn visit_end(
        &mut self,
        name: &str,
        index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        ControlFlow::Continue(())
    }

    /// Final hook for a node, mirror of `pre_visit`.
    fn post_visit(&mut self, node: NodeRef<'_>) -> ControlFlow<Stop> {
        ControlFlow::Continue(())
    }
}

/// Visit one node: hook sequence, then children unless vetoed.
///
/// `name` is the declared field name in the enclosing node (or the type name
/// at the root); `index` is the position for entries of repeating fields.
pub fn walk(
    name: &str,
    index: Option<usize>,
    node: &dyn Visitable,
    visitor: &mut dyn Visitor,
) -> ControlFlow<Stop> {
    let node_ref = node.node();
    if !visitor.pre_visit(node_ref)? {
        return ControlFlow::Continue(());
    }
    visitor.visit_start(name, index, node_ref)?;
    if let Descent::Children = visitor.visit(name, index, node_ref)? {
        node.visit_children(visitor)?;
    }
    visitor.visit_end(name, index, node_ref)?;
    visitor.post_visit(node_ref)
}

/// Walk an optional singular field.
pub fn walk_field<T: Visitable>(
    name: &str,
    value: &Option<T>,
    visitor: &mut dyn Visitor,
) -> ControlFlow<Stop> {
    if let Some(value) = value {
        walk(name, None, value, visitor)?;
    }
    ControlFlow::Continue(())
}

/// Walk every entry of a repeating field in insertion order.
pub fn walk_list<T: Visitable>(
    name: &str,
    values: &[T],
    visitor: &mut dyn Visitor,
) -> ControlFlow<Stop> {
    for (index, value) in values.iter().enumerate() {
        walk(name, Some(index), value, visitor)?;
    }
    ControlFlow::Continue(())
}
