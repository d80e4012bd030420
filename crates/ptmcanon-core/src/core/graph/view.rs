use super::LabeledGraph;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use std::collections::BTreeSet;

/// The subgraph of a [`MolecularSystem`] induced by a set of atoms.
///
/// Used as the matcher's host graph: a residue group, or the part of it that is
/// still available during the covering search.
#[derive(Debug, Clone)]
pub struct SubsystemView<'a> {
    system: &'a MolecularSystem,
    atoms: BTreeSet<AtomId>,
}

impl<'a> SubsystemView<'a> {
    /// Creates a view over `atoms`. IDs not present in `system` are dropped.
    pub fn new(system: &'a MolecularSystem, atoms: impl IntoIterator<Item = AtomId>) -> Self {
        let atoms = atoms
            .into_iter()
            .filter(|id| system.atom(*id).is_some())
            .collect();
        Self { system, atoms }
    }

    pub fn system(&self) -> &'a MolecularSystem {
        self.system
    }

    pub fn atoms(&self) -> &BTreeSet<AtomId> {
        &self.atoms
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }

    /// Narrows the view to the atoms accepted by `keep`.
    pub fn restricted(&self, mut keep: impl FnMut(AtomId, &Atom) -> bool) -> Self {
        let atoms = self
            .atoms
            .iter()
            .copied()
            .filter(|id| keep(*id, self.label(*id)))
            .collect();
        Self {
            system: self.system,
            atoms,
        }
    }
}

impl LabeledGraph for SubsystemView<'_> {
    type Node = AtomId;
    type Label = Atom;

    fn nodes(&self) -> Vec<AtomId> {
        self.atoms.iter().copied().collect()
    }

    fn label(&self, node: AtomId) -> &Atom {
        self.system
            .atom(node)
            .expect("atoms of a SubsystemView exist in its system")
    }

    fn neighbors(&self, node: AtomId) -> Vec<AtomId> {
        self.system
            .get_bonded_neighbors(node)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|id| self.atoms.contains(id))
            .collect()
    }

    fn has_edge(&self, a: AtomId, b: AtomId) -> bool {
        self.atoms.contains(&a) && self.atoms.contains(&b) && self.system.are_bonded(a, b)
    }

    fn node_count(&self) -> usize {
        self.atoms.len()
    }
}
