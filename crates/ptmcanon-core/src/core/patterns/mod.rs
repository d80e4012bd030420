//! Reference modification patterns.
//!
//! - [`pattern`] - A single validated pattern graph and its atoms
//! - [`library`] - The named registry, with built-in entries and TOML loading

pub mod library;
pub mod pattern;

pub use library::{LibraryLoadError, PatternLibrary};
pub use pattern::{Pattern, PatternAtom, PatternError};
