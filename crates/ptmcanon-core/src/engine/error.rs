use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Coverage(#[from] CoverageError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

/// No combination of library patterns exactly covers a residue group's unresolved atoms.
///
/// `uncovered` lists the atoms left over by the attempt that got closest to a
/// full cover, formatted as `NAME (residue N)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "No combination of known modifications accounts for the unresolved atoms in residue group {residue_numbers:?} (uncovered: {})",
    .uncovered.join(", ")
)]
pub struct CoverageError {
    pub residue_numbers: Vec<isize>,
    pub uncovered: Vec<String>,
}
