use crate::core::graph::view::SubsystemView;
use crate::core::models::system::MolecularSystem;
use crate::core::patterns::PatternLibrary;
use crate::engine::canonicalizer::{self, Rename};
use crate::engine::config::{CanonicalizationConfig, FailurePolicy};
use crate::engine::error::EngineError;
use crate::engine::islands::{self, ResidueGroup};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolver;
use std::fmt;
use tracing::{info, info_span, instrument, warn};

/// The outcome of one residue group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub residue_numbers: Vec<isize>,
    /// Names of the applied patterns, in application order.
    pub patterns: Vec<String>,
    pub renames: Vec<Rename>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalizationReport {
    pub groups: Vec<GroupReport>,
}

impl CanonicalizationReport {
    pub fn rename_count(&self) -> usize {
        self.groups.iter().map(|g| g.renames.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for CanonicalizationReport {
    /// One line per residue group with the recognized patterns, followed by one
    /// indented line per rename.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            let residues: Vec<String> = group
                .residue_numbers
                .iter()
                .map(|n| n.to_string())
                .collect();
            writeln!(
                f,
                "Residues [{}]: {}",
                residues.join(", "),
                group.patterns.join(", ")
            )?;
            for rename in &group.renames {
                writeln!(f, "  {rename}")?;
            }
        }
        Ok(())
    }
}

/// Canonicalizes every recognized modification of `system`.
///
/// Unresolved atoms are split into islands, islands are grouped by the residues
/// they attach to, and each group is resolved against `library` and applied in
/// turn. With [`FailurePolicy::Atomic`], `system` is only modified if every group
/// succeeds; with [`FailurePolicy::GroupGranular`], groups applied before a
/// failure keep their changes.
///
/// # Errors
///
/// Returns [`EngineError::Coverage`] for the first group no pattern combination
/// explains.
#[instrument(skip_all, name = "canonicalization_workflow")]
pub fn run(
    system: &mut MolecularSystem,
    library: &PatternLibrary,
    config: &CanonicalizationConfig,
    reporter: &ProgressReporter,
) -> Result<CanonicalizationReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Locating Islands",
    });
    let islands = islands::locate(system);
    let island_count = islands.len();
    let groups = islands::group_by_anchor_residues(system, islands);
    reporter.report(Progress::Message(format!(
        "{} island(s) in {} residue group(s)",
        island_count,
        groups.len()
    )));
    reporter.report(Progress::PhaseFinish);
    info!(
        islands = island_count,
        groups = groups.len(),
        "Located unresolved atoms."
    );

    if groups.is_empty() {
        info!("No unresolved atoms; nothing to canonicalize.");
        return Ok(CanonicalizationReport::default());
    }

    let report = match config.failure_policy {
        FailurePolicy::Atomic => {
            let mut working_system = system.clone();
            let report = process_groups(&mut working_system, &groups, library, config, reporter)?;
            *system = working_system;
            report
        }
        FailurePolicy::GroupGranular => {
            process_groups(system, &groups, library, config, reporter)?
        }
    };

    info!(
        groups = report.groups.len(),
        renames = report.rename_count(),
        "Canonicalization complete."
    );
    Ok(report)
}

fn process_groups(
    system: &mut MolecularSystem,
    groups: &[ResidueGroup],
    library: &PatternLibrary,
    config: &CanonicalizationConfig,
    reporter: &ProgressReporter,
) -> Result<CanonicalizationReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Resolving Residue Groups",
    });
    reporter.report(Progress::TaskStart {
        total_steps: groups.len() as u64,
    });

    let mut report = CanonicalizationReport::default();
    for group in groups {
        let _span = info_span!("residue_group", residues = ?group.residue_numbers).entered();
        let node_ids = group.node_ids(system);

        let matches = {
            let view = SubsystemView::new(system, node_ids.iter().copied());
            resolver::resolve(&view, group, library, config.candidate_order)
        }
        .inspect_err(|e| warn!("{e}"))?;

        let renames = canonicalizer::apply(system, &node_ids, &matches)?;
        report.groups.push(GroupReport {
            residue_numbers: group.residue_numbers.clone(),
            patterns: matches
                .iter()
                .map(|m| m.pattern.name().to_string())
                .collect(),
            renames,
        });
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(report)
}
