//! # Engine Module
//!
//! The stateful layer of modification canonicalization: it finds the unresolved
//! atoms of a molecule, explains them with library patterns, and writes the
//! result back.
//!
//! ## Architecture
//!
//! - **Island Location** ([`islands`]) - Connected runs of unresolved atoms and their grouping by anchor residues
//! - **Covering Search** ([`resolver`]) - Selects library patterns that exactly cover a residue group
//! - **Application** ([`canonicalizer`]) - Renames matched atoms and records the audit trail
//! - **Configuration** ([`config`]) - Candidate ordering and failure policy
//! - **Progress Monitoring** ([`progress`]) - Optional progress callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod canonicalizer;
pub mod config;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod islands;
pub mod progress;
pub mod resolver;
