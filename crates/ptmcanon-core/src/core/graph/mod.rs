//! # Graph Abstractions
//!
//! The matcher in [`crate::core::isomorphism`] is written against the
//! [`LabeledGraph`] trait rather than a concrete molecule type, so the same
//! search runs on molecule subgraphs, reference patterns, and the small
//! synthetic graphs used in tests.
//!
//! - [`compat`] - Node-compatibility predicates, including the standard PTM rule
//! - [`view`] - Induced subgraph views over a [`MolecularSystem`](crate::core::models::system::MolecularSystem)

pub mod compat;
pub mod view;

use std::fmt::Debug;
use std::hash::Hash;

/// An undirected graph with a label attached to every node.
///
/// Node identifiers must be totally ordered: the matcher relies on that order
/// both for deterministic enumeration and for the symmetry-breaking constraints.
pub trait LabeledGraph {
    type Node: Copy + Eq + Hash + Ord + Debug;
    type Label;

    /// All node identifiers of the graph, in ascending order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// The label of `node`. `node` must belong to the graph.
    fn label(&self, node: Self::Node) -> &Self::Label;

    /// The neighbors of `node` within the graph.
    fn neighbors(&self, node: Self::Node) -> Vec<Self::Node>;

    fn has_edge(&self, a: Self::Node, b: Self::Node) -> bool {
        self.neighbors(a).contains(&b)
    }

    fn node_count(&self) -> usize {
        self.nodes().len()
    }
}
