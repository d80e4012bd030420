//! # ptmcanon Core Library
//!
//! Recognition and canonicalization of post-translational modifications (PTMs)
//! on molecule graphs.
//!
//! Upstream tools name every atom they can from residue templates and flag the
//! rest as unresolved. This library explains those flagged atoms with small
//! reference graphs of known modifications, renames the matched atoms to their
//! canonical names, and records which modifications were applied.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`),
//!   graph abstractions, the symmetry-aware subgraph matcher, the pattern
//!   library, and I/O.
//!
//! - **[`engine`]: The Logic Core.** Island location, the covering search that
//!   selects patterns for each residue group, and the canonicalizer that writes
//!   results back into the molecule.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a
//!   single canonicalization step with progress reporting and a textual report.

pub mod core;
pub mod engine;
pub mod workflows;
