//! A visitor that records what it sees.

use std::ops::ControlFlow;

use crate::visit::{NodeRef, Stop, Visitor};

/// Records the field path and type tag of every visited node, in visit
/// order. Useful for search-parameter extraction prototypes and for test
/// assertions about traversal order.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    path: Vec<String>,
    visited: Vec<(String, &'static str)>,
}

impl CollectingVisitor {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The visited nodes as `(path, type_tag)` pairs, in visit order.
    pub fn visited(&self) -> &[(String, &'static str)] {
        &self.visited
    }

    /// Consume the collector and return its record.
    pub fn into_visited(self) -> Vec<(String, &'static str)> {
        self.visited
    }

    fn segment(name: &str, index: Option<usize>) -> String {
        match index {
            Some(index) => format!("{name}[{index}]"),
            None => name.to_string(),
        }
    }
}

impl Visitor for CollectingVisitor {
    fn visit_start(
        &mut self,
        name: &str,
        index: Option<usize>,
        node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        self.path.push(Self::segment(name, index));
        self.visited.push((self.path.join("."), node.type_name()));
        ControlFlow::Continue(())
    }

    fn visit_end(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        _node: NodeRef<'_>,
    ) -> ControlFlow<Stop> {
        self.path.pop();
        ControlFlow::Continue(())
    }
}
