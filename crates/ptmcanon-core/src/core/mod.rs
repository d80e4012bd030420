//! # Core Module
//!
//! The fundamental building blocks of modification canonicalization.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, bonds, and the molecule graph
//! - **Graph Abstractions** ([`graph`]) - The labeled-graph trait, compatibility rules, and subgraph views
//! - **Subgraph Matching** ([`isomorphism`]) - Symmetry-aware subgraph isomorphism
//! - **Reference Patterns** ([`patterns`]) - Validated modification graphs and their registry
//! - **File I/O** ([`io`]) - Reading and writing attributed molecule graphs
//! - **Lookup Tables** ([`utils`]) - Element symbols

pub mod graph;
pub mod io;
pub mod isomorphism;
pub mod models;
pub mod patterns;
pub mod utils;
