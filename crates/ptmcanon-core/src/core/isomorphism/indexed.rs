use crate::core::graph::LabeledGraph;

/// A dense, index-addressed copy of a [`LabeledGraph`]'s topology.
///
/// Node `i` is the `i`-th identifier in ascending order, so comparing indices
/// is the same as comparing the original identifiers.
#[derive(Debug, Clone)]
pub(crate) struct IndexedGraph<N> {
    pub ids: Vec<N>,
    /// Sorted neighbor indices per node.
    pub adjacency: Vec<Vec<usize>>,
}

impl<N: Copy + Ord> IndexedGraph<N> {
    pub fn from_graph<G: LabeledGraph<Node = N>>(graph: &G) -> Self {
        let mut ids = graph.nodes();
        ids.sort();
        ids.dedup();
        let adjacency = ids
            .iter()
            .map(|&id| {
                let mut neighbors: Vec<usize> = graph
                    .neighbors(id)
                    .into_iter()
                    .filter_map(|n| ids.binary_search(&n).ok())
                    .collect();
                neighbors.sort_unstable();
                neighbors.dedup();
                neighbors
            })
            .collect();
        Self { ids, adjacency }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }
}
