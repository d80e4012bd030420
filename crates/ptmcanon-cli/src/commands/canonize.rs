use crate::cli::CanonizeArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ptmcanon::{
    core::io::{graph_toml::GraphTomlFile, traits::MolecularFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: CanonizeArgs) -> Result<()> {
    execute(&args, &CliProgressHandler::new())
}

fn execute(args: &CanonizeArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let config = build_config(args)?;
    let library = config.patterns.load()?;

    info!("Loading input graph from {:?}", &config.input_path);
    let (mut system, metadata) =
        GraphTomlFile::read_from_path(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    info!(
        atoms = system.atom_count(),
        unresolved = system.ptm_atoms().len(),
        "Input graph loaded."
    );

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Canonicalizing modifications...");
    let report = workflows::canonicalize::run(&mut system, &library, &config.core_config, &reporter)?;

    if report.is_empty() {
        println!("No unresolved atoms found; the graph is written unchanged.");
    } else {
        print!("{report}");
        println!(
            "Recognized {} residue group(s), renamed {} atom(s).",
            report.groups.len(),
            report.rename_count()
        );
    }

    info!("Writing canonicalized graph to {:?}", &config.output_path);
    GraphTomlFile::write_to_path(&system, &metadata, &config.output_path).map_err(|e| {
        CliError::FileParsing {
            path: config.output_path.clone(),
            source: e.into(),
        }
    })?;
    println!("✓ Output written to: {}", config.output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const N_TERMINAL_FRAGMENT: &str = r#"
bonds = [[1, 2], [1, 3], [1, 4], [1, 5]]

[[atoms]]
serial = 1
resid = 1
resname = "MET"
name = "N"
element = "N"

[[atoms]]
serial = 2
resid = 1
resname = "MET"
name = "HN"
element = "H"

[[atoms]]
serial = 3
resid = 1
resname = "MET"
name = "HN2"
element = "H"
ptm-atom = true

[[atoms]]
serial = 4
resid = 1
resname = "MET"
name = "HN3"
element = "H"
ptm-atom = true

[[atoms]]
serial = 5
resid = 1
resname = "MET"
name = "CA"
element = "C"
"#;

    fn canonize_args(input: &Path, output: &Path, extra: &[&str]) -> CanonizeArgs {
        let mut argv = vec![
            "ptmcanon",
            "canonize",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Canonize(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn canonize_renames_terminal_atoms_and_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.toml");
        let output = dir.path().join("out.toml");
        fs::write(&input, N_TERMINAL_FRAGMENT).unwrap();

        execute(
            &canonize_args(&input, &output, &[]),
            &CliProgressHandler::hidden(),
        )
        .unwrap();

        let (system, metadata) = GraphTomlFile::read_from_path(&output).unwrap();
        assert!(system.ptm_atoms().is_empty());
        let names: Vec<&str> = system.atoms_iter().map(|(_, a)| a.name.as_str()).collect();
        assert!(names.contains(&"HN1"));
        assert!(!names.contains(&"HN"));
        assert_eq!(metadata.serials.len(), 5);
        assert!(
            system
                .atoms_iter()
                .all(|(_, a)| a.modifications == vec!["N-terminus".to_string()])
        );
    }

    #[test]
    fn canonize_fails_without_matching_patterns_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.toml");
        let output = dir.path().join("out.toml");
        fs::write(&input, N_TERMINAL_FRAGMENT).unwrap();

        let result = execute(
            &canonize_args(&input, &output, &["--no-builtin"]),
            &CliProgressHandler::hidden(),
        );

        assert!(matches!(result, Err(CliError::PtmCore(_))));
        assert!(!output.exists());
    }

    #[test]
    fn canonize_reports_unreadable_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.toml");
        let output = dir.path().join("out.toml");
        fs::write(&input, "atoms = 3\n").unwrap();

        let result = execute(
            &canonize_args(&input, &output, &[]),
            &CliProgressHandler::hidden(),
        );

        match result {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, input),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => panic!("expected an error"),
        }
    }
}
