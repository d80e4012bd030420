use super::indexed::IndexedGraph;

/// Computes an equitable coloring of `graph`.
///
/// The initial partition groups nodes that `same_class` considers equivalent
/// and that have the same degree. It is then refined until every node in a
/// color class has the same number of neighbors in every other class.
/// Automorphisms that respect `same_class` preserve the resulting colors.
///
/// Colors are dense integers starting at zero, assigned in order of the
/// sorted class signatures, so the result depends only on the graph.
pub(crate) fn equitable_coloring<N: Copy + Ord>(
    graph: &IndexedGraph<N>,
    same_class: impl Fn(usize, usize) -> bool,
) -> Vec<usize> {
    let n = graph.len();
    let mut representatives: Vec<usize> = Vec::new();
    let mut class_of = vec![0usize; n];
    for node in 0..n {
        let class = match representatives
            .iter()
            .position(|&rep| graph.degree(rep) == graph.degree(node) && same_class(rep, node))
        {
            Some(class) => class,
            None => {
                representatives.push(node);
                representatives.len() - 1
            }
        };
        class_of[node] = class;
    }

    let mut colors = class_of;
    let mut color_count = representatives.len();
    loop {
        let signatures: Vec<(usize, Vec<usize>)> = (0..n)
            .map(|node| {
                let mut neighbor_colors: Vec<usize> =
                    graph.adjacency[node].iter().map(|&nb| colors[nb]).collect();
                neighbor_colors.sort_unstable();
                (colors[node], neighbor_colors)
            })
            .collect();

        let mut distinct = signatures.clone();
        distinct.sort();
        distinct.dedup();

        let refined: Vec<usize> = signatures
            .iter()
            .map(|sig| distinct.binary_search(sig).unwrap_or_default())
            .collect();

        if distinct.len() == color_count {
            return refined;
        }
        color_count = distinct.len();
        colors = refined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::LabeledGraph;

    struct Plain {
        edges: Vec<(u32, u32)>,
        n: u32,
    }

    impl LabeledGraph for Plain {
        type Node = u32;
        type Label = ();

        fn nodes(&self) -> Vec<u32> {
            (0..self.n).collect()
        }

        fn label(&self, _node: u32) -> &() {
            &()
        }

        fn neighbors(&self, node: u32) -> Vec<u32> {
            self.edges
                .iter()
                .filter_map(|&(a, b)| match (a == node, b == node) {
                    (true, _) => Some(b),
                    (_, true) => Some(a),
                    _ => None,
                })
                .collect()
        }
    }

    fn classes(colors: &[usize]) -> usize {
        let mut distinct = colors.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        distinct.len()
    }

    #[test]
    fn path_splits_ends_from_middle() {
        let graph = IndexedGraph::from_graph(&Plain {
            n: 5,
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 4)],
        });
        let colors = equitable_coloring(&graph, |_, _| true);
        assert_eq!(colors[0], colors[4]);
        assert_eq!(colors[1], colors[3]);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_eq!(classes(&colors), 3);
    }

    #[test]
    fn cycle_is_a_single_class() {
        let graph = IndexedGraph::from_graph(&Plain {
            n: 4,
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        });
        let colors = equitable_coloring(&graph, |_, _| true);
        assert_eq!(classes(&colors), 1);
    }

    #[test]
    fn initial_classes_are_respected() {
        let graph = IndexedGraph::from_graph(&Plain {
            n: 4,
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        });
        let colors = equitable_coloring(&graph, |a, b| a % 2 == b % 2);
        assert_eq!(colors[0], colors[2]);
        assert_eq!(colors[1], colors[3]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn refinement_propagates_through_neighbors() {
        // Star center 0 with leaves 1..=3, plus a pendant 4 on leaf 1.
        let graph = IndexedGraph::from_graph(&Plain {
            n: 5,
            edges: vec![(0, 1), (0, 2), (0, 3), (1, 4)],
        });
        let colors = equitable_coloring(&graph, |_, _| true);
        assert_eq!(colors[2], colors[3]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[4], colors[2]);
    }
}
