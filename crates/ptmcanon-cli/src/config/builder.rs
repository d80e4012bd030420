use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, PatternSource};
use crate::cli::{CanonizeArgs, LibraryArgs};
use crate::error::{CliError, Result};
use ptmcanon::engine::config as core_config;
use std::str::FromStr;

pub fn build_config(args: &CanonizeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(config_path) => FileConfig::from_file(config_path)?,
        None => FileConfig::default(),
    };
    let search_file = file_config.search.clone().unwrap_or_default();

    let candidate_order = match args.candidate_order {
        Some(order) => order,
        None => parse_or(search_file.candidate_order.as_deref(), defaults.candidate_order)?,
    };
    let failure_policy = match args.failure_policy {
        Some(policy) => policy,
        None => parse_or(search_file.failure_policy.as_deref(), defaults.failure_policy)?,
    };

    let core_config = core_config::CanonicalizationConfigBuilder::new()
        .candidate_order(candidate_order)
        .failure_policy(failure_policy)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        patterns: pattern_source(&args.library, &file_config, &defaults),
        core_config,
    })
}

/// The pattern source of a command that has no configuration file.
pub fn library_source(args: &LibraryArgs) -> PatternSource {
    pattern_source(args, &FileConfig::default(), &DefaultsConfig::default())
}

fn pattern_source(
    args: &LibraryArgs,
    file_config: &FileConfig,
    defaults: &DefaultsConfig,
) -> PatternSource {
    PatternSource {
        include_builtin: !args.no_builtin
            && file_config
                .include_builtin
                .unwrap_or(defaults.include_builtin),
        extra: args
            .pattern_library
            .clone()
            .or_else(|| file_config.pattern_library.clone()),
    }
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T>
where
    T: FromStr<Err = core_config::ConfigError>,
{
    value
        .map(str::parse)
        .transpose()
        .map(|parsed| parsed.unwrap_or(default))
        .map_err(|e| CliError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use ptmcanon::engine::config::{CandidateOrder, FailurePolicy};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn canonize_args(extra: &[&str]) -> CanonizeArgs {
        let mut argv = vec!["ptmcanon", "canonize", "-i", "in.toml", "-o", "out.toml"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Canonize(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let config = build_config(&canonize_args(&[])).unwrap();
        assert_eq!(config.input_path, PathBuf::from("in.toml"));
        assert_eq!(config.core_config.candidate_order, CandidateOrder::SmallestFirst);
        assert_eq!(config.core_config.failure_policy, FailurePolicy::Atomic);
        assert_eq!(
            config.patterns,
            PatternSource {
                include_builtin: true,
                extra: None
            }
        );
    }

    #[test]
    fn cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "pattern-library = \"/abs/file.toml\"\n[search]\ncandidate-order = \"largest-first\"\nfailure-policy = \"group-granular\"\n",
        )
        .unwrap();
        let path_str = path.to_str().unwrap();

        let from_file = build_config(&canonize_args(&["-c", path_str])).unwrap();
        assert_eq!(from_file.core_config.candidate_order, CandidateOrder::LargestFirst);
        assert_eq!(from_file.core_config.failure_policy, FailurePolicy::GroupGranular);
        assert_eq!(from_file.patterns.extra, Some(PathBuf::from("/abs/file.toml")));

        let overridden = build_config(&canonize_args(&[
            "-c",
            path_str,
            "--candidate-order",
            "smallest-first",
            "-l",
            "cli.toml",
            "--no-builtin",
        ]))
        .unwrap();
        assert_eq!(overridden.core_config.candidate_order, CandidateOrder::SmallestFirst);
        assert_eq!(overridden.core_config.failure_policy, FailurePolicy::GroupGranular);
        assert_eq!(overridden.patterns.extra, Some(PathBuf::from("cli.toml")));
        assert!(!overridden.patterns.include_builtin);
    }

    #[test]
    fn library_source_honours_no_builtin() {
        let args = LibraryArgs {
            pattern_library: Some(PathBuf::from("extra.toml")),
            no_builtin: true,
        };
        assert_eq!(
            library_source(&args),
            PatternSource {
                include_builtin: false,
                extra: Some(PathBuf::from("extra.toml"))
            }
        );
    }

    #[test]
    fn invalid_file_value_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nfailure-policy = \"rollback\"\n").unwrap();

        let result = build_config(&canonize_args(&["-c", path.to_str().unwrap()]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("rollback")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
