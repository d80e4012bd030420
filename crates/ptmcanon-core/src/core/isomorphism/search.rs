use super::indexed::IndexedGraph;
use std::ops::ControlFlow;

const UNASSIGNED: usize = usize::MAX;

/// A single subgraph-monomorphism search over index-addressed graphs.
///
/// `candidates[p]` lists, in ascending order, the host nodes pattern node `p`
/// may be mapped to. Each constraint `(a, b)` requires the host image of `a` to
/// be smaller than the host image of `b`.
pub(crate) struct Search<'a, H, P> {
    pub host: &'a IndexedGraph<H>,
    pub pattern: &'a IndexedGraph<P>,
    pub candidates: &'a [Vec<usize>],
    pub constraints: &'a [(usize, usize)],
}

impl<H: Copy + Ord, P: Copy + Ord> Search<'_, H, P> {
    /// Enumerates every valid assignment, handing each to `visit` as a slice
    /// indexed by pattern node. Stops early when `visit` breaks.
    ///
    /// Backtracking keeps its choice points on an explicit stack: one cursor
    /// into the candidate list per level of the matching order.
    pub fn run(&self, mut visit: impl FnMut(&[usize]) -> ControlFlow<()>) {
        let order = self.matching_order();
        if order.is_empty() {
            let _ = visit(&[]);
            return;
        }
        if self.candidates.iter().any(Vec::is_empty) {
            return;
        }

        let mut assignment = vec![UNASSIGNED; self.pattern.len()];
        let mut used = vec![false; self.host.len()];
        let mut cursors = vec![0usize; order.len()];
        let mut level = 0usize;

        loop {
            let node = order[level];
            if assignment[node] != UNASSIGNED {
                used[assignment[node]] = false;
                assignment[node] = UNASSIGNED;
            }

            let candidates = &self.candidates[node];
            let mut chosen = None;
            while cursors[level] < candidates.len() {
                let host_node = candidates[cursors[level]];
                cursors[level] += 1;
                if self.is_feasible(node, host_node, &assignment, &used) {
                    chosen = Some(host_node);
                    break;
                }
            }

            match chosen {
                Some(host_node) => {
                    assignment[node] = host_node;
                    used[host_node] = true;
                    if level + 1 == order.len() {
                        if visit(&assignment).is_break() {
                            return;
                        }
                    } else {
                        level += 1;
                        cursors[level] = 0;
                    }
                }
                None => {
                    if level == 0 {
                        return;
                    }
                    level -= 1;
                }
            }
        }
    }

    fn is_feasible(&self, node: usize, host_node: usize, assignment: &[usize], used: &[bool]) -> bool {
        if used[host_node] {
            return false;
        }
        let edges_kept = self.pattern.adjacency[node].iter().all(|&neighbor| {
            let image = assignment[neighbor];
            image == UNASSIGNED || self.host.has_edge(host_node, image)
        });
        if !edges_kept {
            return false;
        }
        self.constraints.iter().all(|&(smaller, larger)| {
            if smaller == node && assignment[larger] != UNASSIGNED {
                host_node < assignment[larger]
            } else if larger == node && assignment[smaller] != UNASSIGNED {
                assignment[smaller] < host_node
            } else {
                true
            }
        })
    }

    /// Orders pattern nodes most-constrained first.
    ///
    /// Starts from the node with the fewest candidates (ties: highest degree,
    /// then lowest index) and then repeatedly takes the node with the most
    /// already-ordered neighbors, breaking ties the same way.
    fn matching_order(&self) -> Vec<usize> {
        let n = self.pattern.len();
        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        let mut connections = vec![0usize; n];

        while order.len() < n {
            let next = (0..n)
                .filter(|&p| !placed[p])
                .min_by_key(|&p| {
                    (
                        std::cmp::Reverse(connections[p]),
                        self.candidates[p].len(),
                        std::cmp::Reverse(self.pattern.degree(p)),
                        p,
                    )
                });
            let Some(next) = next else { break };
            placed[next] = true;
            order.push(next);
            for &neighbor in &self.pattern.adjacency[next] {
                connections[neighbor] += 1;
            }
        }
        order
    }
}
