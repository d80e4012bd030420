use super::error::EngineError;
use super::resolver::PatternMatch;
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// One atom rename performed while applying a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub atom_id: AtomId,
    pub residue_number: isize,
    pub from: String,
    pub to: String,
}

impl fmt::Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Renamed {} to {} in residue {}",
            self.from, self.to, self.residue_number
        )
    }
}

/// Applies the accepted matches of one residue group to `system`.
///
/// Every atom mapped onto a flagged or renaming pattern atom gets the pattern's
/// name for it, keeps a snapshot of its state before the first rename, and
/// loses its unresolved flag. Every atom in `group_node_ids` has each pattern
/// name appended to its modification list, in match order.
///
/// Returns the renames that changed an atom name.
///
/// # Errors
///
/// Returns [`EngineError::Internal`] if a match refers to an atom or pattern
/// atom that does not exist.
pub fn apply(
    system: &mut MolecularSystem,
    group_node_ids: &BTreeSet<AtomId>,
    matches: &[PatternMatch<'_>],
) -> Result<Vec<Rename>, EngineError> {
    info!(
        patterns = ?matches.iter().map(|m| m.pattern.name()).collect::<Vec<_>>(),
        atoms = group_node_ids.len(),
        "Recognized modifications in residue group"
    );

    let mut renames = Vec::new();
    for pattern_match in matches {
        let pattern = pattern_match.pattern;
        for (&atom_id, &pattern_index) in &pattern_match.mapping {
            let pattern_atom = pattern.atom(pattern_index).ok_or_else(|| {
                EngineError::Internal(format!(
                    "Pattern '{}' has no atom {}",
                    pattern.name(),
                    pattern_index
                ))
            })?;
            let Some(target) = pattern_atom.target_name() else {
                continue;
            };

            let residue_number = system
                .residue_number_of(atom_id)
                .ok_or_else(|| missing_atom(atom_id))?;
            let atom = system.atom_mut(atom_id).ok_or_else(|| missing_atom(atom_id))?;
            if atom.provenance.is_none() {
                atom.provenance = Some(atom.snapshot(residue_number));
            }
            if pattern_atom.ptm_atom {
                atom.ptm_atom = false;
            }

            let from = system
                .rename_atom(atom_id, target)
                .ok_or_else(|| missing_atom(atom_id))?;
            if from != target {
                debug!(residue = residue_number, from = %from, to = target, "Renaming atom");
                renames.push(Rename {
                    atom_id,
                    residue_number,
                    from,
                    to: target.to_string(),
                });
            }
        }

        for &atom_id in group_node_ids {
            system
                .atom_mut(atom_id)
                .ok_or_else(|| missing_atom(atom_id))?
                .modifications
                .push(pattern.name().to_string());
        }
    }
    Ok(renames)
}

fn missing_atom(atom_id: AtomId) -> EngineError {
    EngineError::Internal(format!("Matched atom {atom_id:?} is not part of the system"))
}
