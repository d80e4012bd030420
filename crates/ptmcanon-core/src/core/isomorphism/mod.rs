//! # Isomorphism Module
//!
//! A symmetry-aware subgraph matcher for small pattern graphs.
//!
//! Patterns are colored by equitable partition refinement, starting from the
//! classes induced by the compatibility predicate and node degree. The colors
//! restrict the automorphism search, whose stabilizer chain yields ordering
//! constraints between symmetric pattern nodes. The embedding search itself is
//! a backtracking search with an explicit choice-point stack, assigning pattern
//! nodes most-constrained first.
//!
//! The search is exponential in the pattern size in the worst case; it is meant
//! for patterns of a handful of nodes matched against local host subgraphs.
//!
//! - [`matcher`] - Public entry points ([`find_subgraphs`], [`subgraph_is_isomorphic`], [`analyze_symmetry`])
//! - [`symmetry`] - Stabilizer-chain symmetry analysis

mod indexed;
pub mod matcher;
mod partition;
mod search;
pub mod symmetry;

pub use matcher::{Mapping, SubgraphMatcher, analyze_symmetry, find_subgraphs, subgraph_is_isomorphic};
pub use symmetry::SymmetryAnalysis;
