use super::indexed::IndexedGraph;
use super::search::Search;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::ControlFlow;

/// The symmetry-breaking data derived from a pattern's automorphism group.
///
/// `constraints` holds pairs `(a, b)` of pattern nodes: a match is only
/// reported if the host image of `a` sorts before the host image of `b`.
/// `orbits` maps each node that was fixed while walking down the stabilizer
/// chain to its orbit at that level. Both are empty for an asymmetric pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryAnalysis<N: Ord> {
    pub constraints: Vec<(N, N)>,
    pub orbits: BTreeMap<N, BTreeSet<N>>,
}

impl<N: Ord> SymmetryAnalysis<N> {
    pub fn is_trivial(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<N: Ord> Default for SymmetryAnalysis<N> {
    fn default() -> Self {
        Self {
            constraints: Vec::new(),
            orbits: BTreeMap::new(),
        }
    }
}

/// Walks the stabilizer chain of the pattern's automorphism group.
///
/// Nodes are visited in index order. For each node `u`, its orbit under the
/// automorphisms that fix every previously chosen node is computed with
/// existence queries restricted to `u`'s color class. A non-trivial orbit adds
/// the constraints `image(u) < image(v)` for every other orbit member and fixes
/// `u` for the following levels. Together the constraints admit exactly one
/// mapping per equivalence class under the group.
pub(crate) fn stabilizer_chain<P: Copy + Ord>(
    pattern: &IndexedGraph<P>,
    colors: &[usize],
) -> SymmetryAnalysis<usize> {
    let n = pattern.len();
    let cells: Vec<Vec<usize>> = (0..n)
        .map(|u| (0..n).filter(|&v| colors[v] == colors[u]).collect())
        .collect();
    let mut analysis = SymmetryAnalysis::default();
    if cells.iter().all(|cell| cell.len() == 1) {
        return analysis;
    }

    let mut fixed: Vec<usize> = Vec::new();
    for u in 0..n {
        if cells[u].len() == 1 {
            continue;
        }
        let mut orbit = BTreeSet::from([u]);
        for &v in &cells[u] {
            if orbit.contains(&v) || fixed.contains(&v) {
                continue;
            }
            if let Some(automorphism) = find_automorphism(pattern, &cells, &fixed, u, v) {
                orbit.insert(v);
                // Powers of the same automorphism stay within the orbit.
                let mut image = automorphism[v];
                while image != u && orbit.insert(image) {
                    image = automorphism[image];
                }
            }
        }
        if orbit.len() > 1 {
            analysis
                .constraints
                .extend(orbit.iter().filter(|&&v| v != u).map(|&v| (u, v)));
            analysis.orbits.insert(u, orbit);
            fixed.push(u);
        }
    }
    analysis
}

fn find_automorphism<P: Copy + Ord>(
    pattern: &IndexedGraph<P>,
    cells: &[Vec<usize>],
    fixed: &[usize],
    from: usize,
    to: usize,
) -> Option<Vec<usize>> {
    let mut candidates = cells.to_vec();
    for &f in fixed {
        candidates[f] = vec![f];
    }
    candidates[from] = vec![to];

    let mut found = None;
    Search {
        host: pattern,
        pattern,
        candidates: &candidates,
        constraints: &[],
    }
    .run(|assignment| {
        found = Some(assignment.to_vec());
        ControlFlow::Break(())
    });
    found
}
