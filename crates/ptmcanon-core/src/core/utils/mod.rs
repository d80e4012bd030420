//! Small static lookup tables shared across the core.

pub mod elements;
