use super::atom::Atom;
use super::ids::{AtomId, ResidueId};
use super::residue::Residue;
use super::topology::Bond;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{BTreeSet, HashMap};

/// Represents a molecule graph: atoms grouped into residues, connected by bonds.
///
/// Atoms live in a slot-map arena and the bond graph is kept as a cached
/// adjacency list indexed by [`AtomId`], so neighbor queries during graph
/// matching never scan the bond list.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// List of all bonds in the system.
    bonds: Vec<Bond>,
    /// Lookup map for finding residues by residue number.
    residue_number_map: HashMap<isize, ResidueId>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the system.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns the number of atoms in the system.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the system.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Returns a slice of all bonds in the system.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Finds a residue ID by its residue number.
    pub fn find_residue_by_number(&self, residue_number: isize) -> Option<ResidueId> {
        self.residue_number_map.get(&residue_number).copied()
    }

    /// Returns the residue number of the residue owning `atom_id`.
    pub fn residue_number_of(&self, atom_id: AtomId) -> Option<isize> {
        let atom = self.atoms.get(atom_id)?;
        self.residues.get(atom.residue_id).map(|r| r.number)
    }

    /// Adds a new residue to the system or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the given number already
    /// exists, its ID is returned and `name` is ignored.
    pub fn add_residue(&mut self, residue_number: isize, name: &str) -> ResidueId {
        *self
            .residue_number_map
            .entry(residue_number)
            .or_insert_with(|| self.residues.insert(Residue::new(residue_number, name)))
    }

    /// Adds an atom to a specific residue.
    ///
    /// The atom's `residue_id` is overwritten with `residue_id`.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (if the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        let name = atom.name.clone();

        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        residue.add_atom(&name, atom_id);

        Some(atom_id)
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding an existing bond succeeds without creating duplicates.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (if either atom doesn't
    /// exist or both IDs are the same atom).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId) -> Option<()> {
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
        {
            return None;
        }

        if self.bond_adjacency[atom1_id].contains(&atom2_id) {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Retrieves the bonded neighbors of an atom.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Returns `true` if the two atoms share a bond.
    pub fn are_bonded(&self, atom1_id: AtomId, atom2_id: AtomId) -> bool {
        self.bond_adjacency
            .get(atom1_id)
            .is_some_and(|neighbors| neighbors.contains(&atom2_id))
    }

    /// Renames an atom, keeping the parent residue's name index consistent.
    ///
    /// # Return
    ///
    /// Returns the previous name, or `None` if the atom doesn't exist.
    pub fn rename_atom(&mut self, atom_id: AtomId, new_name: &str) -> Option<String> {
        let atom = self.atoms.get_mut(atom_id)?;
        let old_name = std::mem::replace(&mut atom.name, new_name.to_string());
        if let Some(residue) = self.residues.get_mut(atom.residue_id) {
            residue.rename_atom(&old_name, new_name, atom_id);
        }
        Some(old_name)
    }

    /// Returns all atoms currently flagged as unresolved, ordered by ID.
    pub fn ptm_atoms(&self) -> BTreeSet<AtomId> {
        self.atoms
            .iter()
            .filter(|(_, atom)| atom.ptm_atom)
            .map(|(id, _)| id)
            .collect()
    }

    /// Collects the atoms of every residue whose number is in `residue_numbers`.
    pub fn atoms_in_residues(&self, residue_numbers: &[isize]) -> BTreeSet<AtomId> {
        residue_numbers
            .iter()
            .filter_map(|number| self.find_residue_by_number(*number))
            .filter_map(|residue_id| self.residues.get(residue_id))
            .flat_map(|residue| residue.atoms().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_system() -> (MolecularSystem, Vec<AtomId>) {
        let mut system = MolecularSystem::new();
        let res1 = system.add_residue(1, "MET");
        let res2 = system.add_residue(2, "ALA");
        let n = system
            .add_atom_to_residue(res1, Atom::new("N", "N", res1))
            .unwrap();
        let hn2 = system
            .add_atom_to_residue(res1, Atom::new("HN2", "H", res1).flagged())
            .unwrap();
        let ca = system
            .add_atom_to_residue(res2, Atom::new("CA", "C", res2))
            .unwrap();
        system.add_bond(n, hn2).unwrap();
        system.add_bond(n, ca).unwrap();
        (system, vec![n, hn2, ca])
    }

    #[test]
    fn add_residue_is_idempotent() {
        let mut system = MolecularSystem::new();
        let first = system.add_residue(3, "LYS");
        let second = system.add_residue(3, "ignored");
        assert_eq!(first, second);
        assert_eq!(system.residue(first).unwrap().name, "LYS");
        assert_eq!(system.find_residue_by_number(3), Some(first));
    }

    #[test]
    fn add_atom_to_missing_residue_returns_none() {
        let mut system = MolecularSystem::new();
        let residue_id = system.add_residue(1, "GLY");
        let mut other = MolecularSystem::new();
        assert!(
            other
                .add_atom_to_residue(residue_id, Atom::new("CA", "C", residue_id))
                .is_none()
        );
        assert_eq!(other.atom_count(), 0);
    }

    #[test]
    fn add_bond_updates_adjacency_and_is_idempotent() {
        let (mut system, ids) = build_system();
        assert_eq!(system.bonds().len(), 2);
        system.add_bond(ids[1], ids[0]).unwrap();
        assert_eq!(system.bonds().len(), 2);
        assert!(system.are_bonded(ids[0], ids[1]));
        assert!(system.are_bonded(ids[1], ids[0]));
        assert!(!system.are_bonded(ids[1], ids[2]));
        assert_eq!(system.get_bonded_neighbors(ids[0]).unwrap().len(), 2);
    }

    #[test]
    fn add_bond_rejects_self_bonds() {
        let (mut system, ids) = build_system();
        assert!(system.add_bond(ids[0], ids[0]).is_none());
    }

    #[test]
    fn rename_atom_updates_name_and_residue_index() {
        let (mut system, ids) = build_system();
        let old = system.rename_atom(ids[1], "HN3").unwrap();
        assert_eq!(old, "HN2");
        assert_eq!(system.atom(ids[1]).unwrap().name, "HN3");
        let residue = system.residue(system.find_residue_by_number(1).unwrap()).unwrap();
        assert_eq!(residue.get_atom_id_by_name("HN3"), Some(ids[1]));
        assert!(residue.get_atom_id_by_name("HN2").is_none());
    }

    #[test]
    fn ptm_atoms_returns_only_flagged_atoms() {
        let (system, ids) = build_system();
        assert_eq!(system.ptm_atoms(), BTreeSet::from([ids[1]]));
    }

    #[test]
    fn residue_queries_resolve_numbers_and_members() {
        let (system, ids) = build_system();
        assert_eq!(system.residue_number_of(ids[2]), Some(2));
        assert_eq!(system.atoms_in_residues(&[1]), BTreeSet::from([ids[0], ids[1]]));
        assert_eq!(system.atoms_in_residues(&[1, 2]).len(), 3);
        assert!(system.atoms_in_residues(&[99]).is_empty());
    }
}
