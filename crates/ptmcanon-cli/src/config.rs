//! Configuration of the `canonize` command: defaults, the optional TOML file,
//! and CLI overrides, merged in that order of increasing precedence.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, library_source};
