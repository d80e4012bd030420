//! # Workflows Module
//!
//! High-level entry points that run a complete procedure on a molecule.
//!
//! - **Canonicalization Workflow** ([`canonicalize`]) - Locates unresolved atoms,
//!   resolves every residue group against a pattern library, and applies the
//!   recognized modifications.

pub mod canonicalize;
