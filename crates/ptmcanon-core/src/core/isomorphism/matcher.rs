use super::indexed::IndexedGraph;
use super::partition::equitable_coloring;
use super::search::Search;
use super::symmetry::{SymmetryAnalysis, stabilizer_chain};
use crate::core::graph::LabeledGraph;
use crate::core::graph::compat::NodeCompat;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::ControlFlow;

/// A subgraph embedding, keyed by host node and valued by pattern node.
pub type Mapping<H, P> = BTreeMap<H, P>;

/// Enumerates embeddings of a small pattern graph into a host graph.
///
/// An embedding is an injective map from pattern nodes to host nodes under
/// which every pattern edge lands on a host edge and every mapped pair is
/// accepted by the compatibility predicate. Host edges between images that
/// have no pattern counterpart are allowed.
///
/// With symmetry reduction enabled, only one representative is reported per
/// class of embeddings that differ by an automorphism of the pattern.
pub struct SubgraphMatcher<'a, H: LabeledGraph, P: LabeledGraph, C> {
    pattern: &'a P,
    compat: &'a C,
    host_index: IndexedGraph<H::Node>,
    pattern_index: IndexedGraph<P::Node>,
    candidates: Vec<Vec<usize>>,
}

impl<'a, H, P, C> SubgraphMatcher<'a, H, P, C>
where
    H: LabeledGraph,
    P: LabeledGraph,
    C: NodeCompat<H::Label, P::Label>,
{
    pub fn new(host: &'a H, pattern: &'a P, compat: &'a C) -> Self {
        let host_index = IndexedGraph::from_graph(host);
        let pattern_index = IndexedGraph::from_graph(pattern);
        let candidates = (0..pattern_index.len())
            .map(|p| {
                let pattern_label = pattern.label(pattern_index.ids[p]);
                let min_degree = pattern_index.degree(p);
                (0..host_index.len())
                    .filter(|&h| {
                        host_index.degree(h) >= min_degree
                            && <C as NodeCompat<H::Label, P::Label>>::compatible(
                                compat,
                                host.label(host_index.ids[h]),
                                pattern_label,
                            )
                    })
                    .collect()
            })
            .collect();
        Self {
            pattern,
            compat,
            host_index,
            pattern_index,
            candidates,
        }
    }

    /// Returns `true` if at least one embedding exists.
    pub fn subgraph_is_isomorphic(&self) -> bool {
        let mut found = false;
        self.search(&[], |_| {
            found = true;
            ControlFlow::Break(())
        });
        found
    }

    /// Runs the search, converting each index assignment into a [`Mapping`].
    fn search(
        &self,
        constraints: &[(usize, usize)],
        mut visit: impl FnMut(Mapping<H::Node, P::Node>) -> ControlFlow<()>,
    ) {
        Search {
            host: &self.host_index,
            pattern: &self.pattern_index,
            candidates: &self.candidates,
            constraints,
        }
        .run(|assignment| {
            let mapping = assignment
                .iter()
                .enumerate()
                .map(|(p, &h)| (self.host_index.ids[h], self.pattern_index.ids[p]))
                .collect();
            visit(mapping)
        });
    }
}

impl<'a, H, P, C> SubgraphMatcher<'a, H, P, C>
where
    H: LabeledGraph,
    P: LabeledGraph,
    C: NodeCompat<H::Label, P::Label> + NodeCompat<P::Label, P::Label>,
{
    /// Enumerates embeddings, one per symmetry class when `symmetry` is set.
    pub fn find_subgraphs(&self, symmetry: bool) -> Vec<Mapping<H::Node, P::Node>> {
        let constraints = self.constraints_for(symmetry);
        let mut mappings = Vec::new();
        self.search(&constraints, |mapping| {
            mappings.push(mapping);
            ControlFlow::Continue(())
        });
        mappings
    }

    /// Returns the first embedding in enumeration order, if any.
    pub fn first_subgraph(&self, symmetry: bool) -> Option<Mapping<H::Node, P::Node>> {
        let constraints = self.constraints_for(symmetry);
        let mut first = None;
        self.search(&constraints, |mapping| {
            first = Some(mapping);
            ControlFlow::Break(())
        });
        first
    }

    pub fn analyze_symmetry(&self) -> SymmetryAnalysis<P::Node> {
        let analysis = self.indexed_symmetry();
        let ids = &self.pattern_index.ids;
        SymmetryAnalysis {
            constraints: analysis
                .constraints
                .iter()
                .map(|&(a, b)| (ids[a], ids[b]))
                .collect(),
            orbits: analysis
                .orbits
                .iter()
                .map(|(&u, orbit)| (ids[u], orbit.iter().map(|&v| ids[v]).collect::<BTreeSet<_>>()))
                .collect(),
        }
    }

    fn constraints_for(&self, symmetry: bool) -> Vec<(usize, usize)> {
        if symmetry {
            self.indexed_symmetry().constraints
        } else {
            Vec::new()
        }
    }

    fn indexed_symmetry(&self) -> SymmetryAnalysis<usize> {
        pattern_symmetry(self.pattern, &self.pattern_index, self.compat)
    }
}

fn pattern_symmetry<P, C>(
    pattern: &P,
    index: &IndexedGraph<P::Node>,
    compat: &C,
) -> SymmetryAnalysis<usize>
where
    P: LabeledGraph,
    C: NodeCompat<P::Label, P::Label>,
{
    let colors = equitable_coloring(index, |a, b| {
        <C as NodeCompat<P::Label, P::Label>>::compatible(
            compat,
            pattern.label(index.ids[a]),
            pattern.label(index.ids[b]),
        )
    });
    stabilizer_chain(index, &colors)
}

/// Enumerates embeddings of `pattern` into `host`.
pub fn find_subgraphs<H, P, C>(
    host: &H,
    pattern: &P,
    compat: &C,
    symmetry: bool,
) -> Vec<Mapping<H::Node, P::Node>>
where
    H: LabeledGraph,
    P: LabeledGraph,
    C: NodeCompat<H::Label, P::Label> + NodeCompat<P::Label, P::Label>,
{
    SubgraphMatcher::new(host, pattern, compat).find_subgraphs(symmetry)
}

/// Returns `true` if `pattern` embeds into `host`.
pub fn subgraph_is_isomorphic<H, P, C>(host: &H, pattern: &P, compat: &C) -> bool
where
    H: LabeledGraph,
    P: LabeledGraph,
    C: NodeCompat<H::Label, P::Label>,
{
    SubgraphMatcher::new(host, pattern, compat).subgraph_is_isomorphic()
}

/// Computes the symmetry-breaking constraints and orbits of `pattern`.
pub fn analyze_symmetry<P, C>(pattern: &P, compat: &C) -> SymmetryAnalysis<P::Node>
where
    P: LabeledGraph,
    C: NodeCompat<P::Label, P::Label>,
{
    let index = IndexedGraph::from_graph(pattern);
    let analysis = pattern_symmetry(pattern, &index, compat);
    SymmetryAnalysis {
        constraints: analysis
            .constraints
            .iter()
            .map(|&(a, b)| (index.ids[a], index.ids[b]))
            .collect(),
        orbits: analysis
            .orbits
            .iter()
            .map(|(&u, orbit)| (index.ids[u], orbit.iter().map(|&v| index.ids[v]).collect()))
            .collect(),
    }
}
