//! # Core Models Module
//!
//! Data structures representing the molecule graph that canonicalization
//! operates on: atoms with their unresolved-flag and audit trail, residues with
//! an atom-name index, payload-free bonds, and the [`system::MolecularSystem`]
//! arena tying them together.
//!
//! ## Usage
//!
//! ```ignore
//! use ptmcanon::core::models::{atom::Atom, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let residue_id = system.add_residue(1, "MET");
//! let n = system.add_atom_to_residue(residue_id, Atom::new("N", "N", residue_id)).unwrap();
//! let h = system.add_atom_to_residue(residue_id, Atom::new("HN2", "H", residue_id).flagged()).unwrap();
//! system.add_bond(n, h);
//! ```

pub mod atom;
pub mod ids;
pub mod residue;
pub mod system;
pub mod topology;
