use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A maximal connected run of unresolved atoms and the resolved atoms bordering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    /// Flagged atoms, connected through flagged-only bonds.
    pub atoms: BTreeSet<AtomId>,
    /// Unflagged neighbors of `atoms`.
    pub anchors: BTreeSet<AtomId>,
}

/// Partitions every flagged atom of `system` into islands.
///
/// Each island is grown breadth-first from the smallest remaining flagged
/// [`AtomId`], expanding only through flagged atoms. Islands are returned in
/// the order they were discovered.
pub fn locate(system: &MolecularSystem) -> Vec<Island> {
    let mut unresolved = system.ptm_atoms();
    let mut islands = Vec::new();

    while let Some(seed) = unresolved.pop_first() {
        let mut island = Island {
            atoms: BTreeSet::from([seed]),
            anchors: BTreeSet::new(),
        };
        let mut frontier = VecDeque::from([seed]);

        while let Some(current) = frontier.pop_front() {
            for &neighbor in system.get_bonded_neighbors(current).unwrap_or_default() {
                if unresolved.remove(&neighbor) {
                    island.atoms.insert(neighbor);
                    frontier.push_back(neighbor);
                } else if !island.atoms.contains(&neighbor) {
                    island.anchors.insert(neighbor);
                }
            }
        }
        islands.push(island);
    }
    islands
}

/// Islands whose anchors span the same set of residues, resolved as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueGroup {
    /// Sorted, distinct residue numbers of all anchors.
    pub residue_numbers: Vec<isize>,
    pub islands: Vec<Island>,
}

impl ResidueGroup {
    /// Every unresolved atom of the group.
    pub fn unresolved_atoms(&self) -> BTreeSet<AtomId> {
        self.islands
            .iter()
            .flat_map(|island| island.atoms.iter().copied())
            .collect()
    }

    /// The atoms of the group's residues plus its unresolved atoms.
    ///
    /// This is the node set of the residue subgraph patterns are matched
    /// against, and the set of atoms whose audit trail records every pattern
    /// applied to the group.
    pub fn node_ids(&self, system: &MolecularSystem) -> BTreeSet<AtomId> {
        let mut nodes = system.atoms_in_residues(&self.residue_numbers);
        nodes.extend(self.unresolved_atoms());
        nodes
    }
}

/// Groups islands by the residue numbers of their anchors, ordered by that key.
pub fn group_by_anchor_residues(system: &MolecularSystem, islands: Vec<Island>) -> Vec<ResidueGroup> {
    let mut groups: BTreeMap<Vec<isize>, Vec<Island>> = BTreeMap::new();
    for island in islands {
        let key: BTreeSet<isize> = island
            .anchors
            .iter()
            .filter_map(|&anchor| system.residue_number_of(anchor))
            .collect();
        groups.entry(key.into_iter().collect()).or_default().push(island);
    }
    groups
        .into_iter()
        .map(|(residue_numbers, islands)| ResidueGroup {
            residue_numbers,
            islands,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{MoleculeBuilder, terminated_dipeptide, with_phosphoserine};
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[test]
    fn locate_splits_atoms_joined_only_through_an_anchor() {
        let mol = terminated_dipeptide();
        let islands = locate(&mol.system);
        assert_eq!(islands.len(), 3);

        for name in ["HN2", "HN3"] {
            let island = islands
                .iter()
                .find(|i| i.atoms.contains(&mol.id(1, name)))
                .unwrap();
            assert_eq!(island.atoms.len(), 1);
            assert_eq!(island.anchors, BTreeSet::from([mol.id(1, "N")]));
        }
    }

    #[test]
    fn locate_seeds_from_smallest_atom_id() {
        let mol = terminated_dipeptide();
        let islands = locate(&mol.system);
        let seeds: Vec<AtomId> = islands.iter().map(|i| *i.atoms.first().unwrap()).collect();
        let mut sorted = seeds.clone();
        sorted.sort();
        assert_eq!(seeds, sorted);
    }

    #[test]
    fn group_by_anchor_residues_keys_on_sorted_residue_numbers() {
        let mol = with_phosphoserine(terminated_dipeptide());
        let groups = group_by_anchor_residues(&mol.system, locate(&mol.system));
        let keys: Vec<_> = groups.iter().map(|g| g.residue_numbers.clone()).collect();
        assert_eq!(keys, vec![vec![1], vec![2], vec![3]]);

        assert_eq!(groups[0].islands.len(), 2);
        assert_eq!(groups[0].unresolved_atoms().len(), 2);

        let phospho = &groups[2];
        assert_eq!(phospho.islands.len(), 1);
        assert_eq!(phospho.unresolved_atoms().len(), 4);
        assert_eq!(phospho.islands[0].anchors, BTreeSet::from([mol.id(3, "OG")]));
    }

    #[test]
    fn node_ids_cover_group_residues() {
        let mol = terminated_dipeptide();
        let groups = group_by_anchor_residues(&mol.system, locate(&mol.system));
        let n_term = &groups[0];
        let nodes = n_term.node_ids(&mol.system);
        assert_eq!(nodes.len(), 7);
        assert!(nodes.contains(&mol.id(1, "CA")));
        assert!(!nodes.contains(&mol.id(2, "N")));
    }

    #[test]
    fn cross_residue_island_forms_its_own_group() {
        let mut mol = MoleculeBuilder::new();
        mol.atom(4, "CYS", "SG", "S");
        mol.atom(9, "CYS", "SG", "S");
        mol.flagged(4, "CYS", "X", "C");
        mol.bond((4, "SG"), (4, "X"));
        mol.bond((4, "X"), (9, "SG"));

        let groups = group_by_anchor_residues(&mol.system, locate(&mol.system));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].residue_numbers, vec![4, 9]);
        assert_eq!(groups[0].islands[0].anchors.len(), 2);
    }

    #[test]
    fn anchorless_island_has_empty_key() {
        let mut mol = MoleculeBuilder::new();
        mol.flagged(1, "HOH", "OW", "O");
        let groups = group_by_anchor_residues(&mol.system, locate(&mol.system));
        assert_eq!(groups.len(), 1);
        assert!(groups[0].residue_numbers.is_empty());
        assert_eq!(groups[0].node_ids(&mol.system).len(), 1);
    }

    #[test]
    fn locate_on_clean_molecule_is_empty() {
        let mut mol = MoleculeBuilder::new();
        mol.atom(1, "GLY", "N", "N");
        mol.atom(1, "GLY", "CA", "C");
        mol.bond((1, "N"), (1, "CA"));
        assert!(locate(&mol.system).is_empty());
    }

    /// A random molecule: up to 12 atoms over 3 residues, random flags and bonds.
    #[derive(Clone, Debug)]
    struct RandomMolecule {
        flags: Vec<(isize, bool)>,
        bonds: Vec<(usize, usize)>,
    }

    impl Arbitrary for RandomMolecule {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 13;
            let flags = (0..n)
                .map(|_| ((u8::arbitrary(g) % 3) as isize, bool::arbitrary(g)))
                .collect();
            let mut bonds = Vec::new();
            for a in 0..n {
                for b in (a + 1)..n {
                    if u8::arbitrary(g) % 4 == 0 {
                        bonds.push((a, b));
                    }
                }
            }
            Self { flags, bonds }
        }
    }

    impl RandomMolecule {
        fn build(&self) -> MolecularSystem {
            let mut mol = MoleculeBuilder::new();
            let ids: Vec<AtomId> = self
                .flags
                .iter()
                .enumerate()
                .map(|(i, &(resid, flagged))| {
                    let name = format!("A{i}");
                    if flagged {
                        mol.flagged(resid, "UNK", &name, "C")
                    } else {
                        mol.atom(resid, "UNK", &name, "C")
                    }
                })
                .collect();
            for &(a, b) in &self.bonds {
                mol.system.add_bond(ids[a], ids[b]).unwrap();
            }
            mol.system
        }
    }

    fn connected_through_flagged(system: &MolecularSystem, atoms: &BTreeSet<AtomId>) -> bool {
        let Some(&start) = atoms.first() else {
            return false;
        };
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for &n in system.get_bonded_neighbors(current).unwrap() {
                if atoms.contains(&n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen == *atoms
    }

    quickcheck! {
        fn prop_islands_partition_flagged_atoms(molecule: RandomMolecule) -> bool {
            let system = molecule.build();
            let islands = locate(&system);
            let mut union = BTreeSet::new();
            for island in &islands {
                if !island.atoms.is_disjoint(&union) {
                    return false;
                }
                union.extend(island.atoms.iter().copied());
            }
            union == system.ptm_atoms()
        }

        fn prop_islands_are_flagged_components_with_exact_anchors(molecule: RandomMolecule) -> bool {
            let system = molecule.build();
            locate(&system).iter().all(|island| {
                let expected_anchors: BTreeSet<AtomId> = island
                    .atoms
                    .iter()
                    .flat_map(|&a| system.get_bonded_neighbors(a).unwrap().iter().copied())
                    .filter(|&n| !system.atom(n).unwrap().ptm_atom)
                    .collect();
                let closed = island.atoms.iter().all(|&a| {
                    system
                        .get_bonded_neighbors(a)
                        .unwrap()
                        .iter()
                        .all(|&n| !system.atom(n).unwrap().ptm_atom || island.atoms.contains(&n))
                });
                connected_through_flagged(&system, &island.atoms)
                    && island.anchors == expected_anchors
                    && closed
            })
        }

        fn prop_groups_keep_every_island(molecule: RandomMolecule) -> bool {
            let system = molecule.build();
            let islands = locate(&system);
            let count = islands.len();
            let groups = group_by_anchor_residues(&system, islands);
            let keys: BTreeSet<_> = groups.iter().map(|g| g.residue_numbers.clone()).collect();
            groups.iter().map(|g| g.islands.len()).sum::<usize>() == count
                && keys.len() == groups.len()
                && groups.iter().all(|g| g.residue_numbers.windows(2).all(|w| w[0] < w[1]))
        }
    }
}
