//! Provides input/output for attributed molecule graphs.
//!
//! Structure-file parsing is left to upstream tools; this module only persists
//! the graph the canonicalizer works on, through a trait-based interface.

pub mod graph_toml;
pub mod traits;
