use super::config::CandidateOrder;
use super::error::CoverageError;
use super::islands::ResidueGroup;
use crate::core::graph::compat::PtmCompat;
use crate::core::graph::view::SubsystemView;
use crate::core::isomorphism::{Mapping, SubgraphMatcher, subgraph_is_isomorphic};
use crate::core::models::ids::AtomId;
use crate::core::patterns::{Pattern, PatternLibrary};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// A pattern accepted for a residue group, with the molecule atoms it maps.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch<'lib> {
    pub pattern: &'lib Pattern,
    /// Molecule atom to pattern atom index.
    pub mapping: Mapping<AtomId, usize>,
}

impl PatternMatch<'_> {
    /// Molecule atoms the match maps onto flagged pattern atoms.
    pub fn covered_atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.mapping
            .iter()
            .filter(|&(_, &p)| self.pattern.atoms()[p].ptm_atom)
            .map(|(&atom, _)| atom)
    }
}

/// Library patterns that embed somewhere in `view`, in search order.
pub fn candidates<'lib>(
    view: &SubsystemView<'_>,
    library: &'lib PatternLibrary,
    order: CandidateOrder,
) -> Vec<&'lib Pattern> {
    let mut candidates: Vec<&Pattern> = library
        .patterns()
        .par_iter()
        .filter(|pattern| subgraph_is_isomorphic(view, *pattern, &PtmCompat))
        .collect();
    match order {
        CandidateOrder::SmallestFirst => candidates.sort_by_key(|p| p.len()),
        CandidateOrder::LargestFirst => candidates.sort_by_key(|p| Reverse(p.len())),
    }
    candidates
}

struct Choice<'lib> {
    candidate: usize,
    accepted: PatternMatch<'lib>,
}

/// Finds patterns whose flagged atoms exactly cover the group's unresolved atoms.
///
/// `view` is the group's residue subgraph. Candidates are tried in `order`;
/// for each, the first symmetry-reduced embedding into the atoms still
/// available (every unflagged atom of `view` plus the group's uncovered
/// flagged atoms) is accepted greedily, and the search continues with that
/// candidate and the ones after it. When a branch dead-ends, the most recent
/// choice is undone and the next candidate is tried in its place. Alternative
/// embeddings of the same candidate are not revisited.
///
/// Matches are returned in application order.
///
/// # Errors
///
/// Returns [`CoverageError`] once every choice is exhausted, reporting the
/// atoms left over by the attempt that covered the most.
pub fn resolve<'lib>(
    view: &SubsystemView<'_>,
    group: &ResidueGroup,
    library: &'lib PatternLibrary,
    order: CandidateOrder,
) -> Result<Vec<PatternMatch<'lib>>, CoverageError> {
    let candidates = candidates(view, library, order);
    debug!(
        residues = ?group.residue_numbers,
        candidates = ?candidates.iter().map(|p| p.name()).collect::<Vec<_>>(),
        "Filtered candidate patterns"
    );

    let mut uncovered = group.unresolved_atoms();
    let mut closest = uncovered.clone();
    let mut choices: Vec<Choice<'lib>> = Vec::new();
    let mut next_candidate = 0;

    loop {
        if uncovered.is_empty() {
            return Ok(choices.into_iter().map(|c| c.accepted).collect());
        }

        let available = view.restricted(|id, atom| !atom.ptm_atom || uncovered.contains(&id));
        let step = (next_candidate..candidates.len()).find_map(|index| {
            SubgraphMatcher::new(&available, candidates[index], &PtmCompat)
                .first_subgraph(true)
                .map(|mapping| (index, mapping))
        });

        match step {
            Some((candidate, mapping)) => {
                let accepted = PatternMatch {
                    pattern: candidates[candidate],
                    mapping,
                };
                for atom in accepted.covered_atoms() {
                    uncovered.remove(&atom);
                }
                trace!(
                    pattern = accepted.pattern.name(),
                    remaining = uncovered.len(),
                    "Accepted candidate"
                );
                if uncovered.len() < closest.len() {
                    closest = uncovered.clone();
                }
                choices.push(Choice {
                    candidate,
                    accepted,
                });
                next_candidate = candidate;
            }
            None => match choices.pop() {
                Some(choice) => {
                    trace!(pattern = choice.accepted.pattern.name(), "Backtracking");
                    uncovered.extend(choice.accepted.covered_atoms());
                    next_candidate = choice.candidate + 1;
                }
                None => {
                    return Err(CoverageError {
                        residue_numbers: group.residue_numbers.clone(),
                        uncovered: describe_atoms(view, &closest),
                    });
                }
            },
        }
    }
}

fn describe_atoms(view: &SubsystemView<'_>, atoms: &BTreeSet<AtomId>) -> Vec<String> {
    let system = view.system();
    atoms
        .iter()
        .filter_map(|&id| {
            let atom = system.atom(id)?;
            let residue_number = system.residue_number_of(id)?;
            Some(format!("{} (residue {})", atom.name, residue_number))
        })
        .collect()
}
