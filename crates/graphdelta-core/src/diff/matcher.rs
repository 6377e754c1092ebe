//! Pairs the nodes of two graphs by global id.

use crate::diff::pair::{FakeNodePair, NodePair, RealNodePair};
use crate::errors::Result;
use crate::graph::{ObjectGraph, ObjectNode};

/// Outcome of matching a left graph against a right graph
#[derive(Debug, Clone)]
pub struct GraphPairing<'a, 'r> {
    /// One pair per right node, in right discovery order
    pub pairs: Vec<NodePair<'a, 'r>>,
    /// Left nodes with no right counterpart, in left discovery order
    pub removed: Vec<&'a ObjectNode<'r>>,
}

/// Match `left` against `right`
///
/// # Errors
///
/// `Internal` if a node found by id does not carry that id.
pub fn match_graphs<'a, 'r>(
    left: &'a ObjectGraph<'r>,
    right: &'a ObjectGraph<'r>,
) -> Result<GraphPairing<'a, 'r>> {
    let mut pairs = Vec::with_capacity(right.len());
    for node in right.nodes() {
        let pair = match left.get(node.global_id()) {
            Some(previous) => NodePair::from(RealNodePair::new(previous, node)?),
            None => NodePair::from(FakeNodePair::new(node)),
        };
        pairs.push(pair);
    }

    let removed = left
        .nodes()
        .iter()
        .filter(|node| !right.contains(node.global_id()))
        .collect();

    Ok(GraphPairing { pairs, removed })
}
