use crate::cli::{PatternsArgs, PatternsCommands};
use crate::config::library_source;
use crate::error::Result;
use ptmcanon::core::patterns::PatternLibrary;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub fn run(args: PatternsArgs) -> Result<()> {
    match args.command {
        PatternsCommands::List { library } => {
            let library = library_source(&library).load()?;
            print!("{}", describe(&library));
        }
        PatternsCommands::Check { path } => {
            println!("{}", check(&path)?);
        }
    }
    Ok(())
}

/// One row per pattern with its atom, anchor and PTM-atom counts.
fn describe(library: &PatternLibrary) -> String {
    if library.is_empty() {
        return "The pattern library is empty.\n".to_string();
    }

    let width = library
        .names()
        .map(str::len)
        .chain(std::iter::once("PATTERN".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>5}  {:>7}  {:>9}",
        "PATTERN", "ATOMS", "ANCHORS", "PTM-ATOMS"
    );
    for pattern in library.patterns() {
        let _ = writeln!(
            out,
            "{:<width$}  {:>5}  {:>7}  {:>9}",
            pattern.name(),
            pattern.len(),
            pattern.anchor_count(),
            pattern.ptm_atom_count()
        );
    }
    out
}

fn check(path: &Path) -> Result<String> {
    info!("Validating pattern file {:?}", path);
    let library = PatternLibrary::load(path)?;
    Ok(format!(
        "✓ {} defines {} valid pattern(s).",
        path.display(),
        library.len()
    ))
}
