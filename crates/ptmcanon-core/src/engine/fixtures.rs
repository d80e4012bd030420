//! Small molecules shared by the engine and workflow tests.

use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use std::collections::HashMap;

pub(crate) struct MoleculeBuilder {
    pub system: MolecularSystem,
    ids: HashMap<(isize, String), AtomId>,
}

impl MoleculeBuilder {
    pub fn new() -> Self {
        Self {
            system: MolecularSystem::new(),
            ids: HashMap::new(),
        }
    }

    pub fn atom(&mut self, resid: isize, resname: &str, name: &str, element: &str) -> AtomId {
        self.add(resid, resname, Atom::new(name, element, Default::default()), name)
    }

    pub fn flagged(&mut self, resid: isize, resname: &str, name: &str, element: &str) -> AtomId {
        self.add(
            resid,
            resname,
            Atom::new(name, element, Default::default()).flagged(),
            name,
        )
    }

    fn add(&mut self, resid: isize, resname: &str, atom: Atom, name: &str) -> AtomId {
        let residue_id = self.system.add_residue(resid, resname);
        let id = self.system.add_atom_to_residue(residue_id, atom).unwrap();
        self.ids.insert((resid, name.to_string()), id);
        id
    }

    pub fn bond(&mut self, a: (isize, &str), b: (isize, &str)) {
        let (a, b) = (self.id(a.0, a.1), self.id(b.0, b.1));
        self.system.add_bond(a, b).unwrap();
    }

    /// The id of the atom created as `name` in residue `resid`, regardless of later renames.
    pub fn id(&self, resid: isize, name: &str) -> AtomId {
        self.ids[&(resid, name.to_string())]
    }
}

/// Residue 1 (MET) carries an N-terminus with two extra flagged hydrogens,
/// residue 2 (ALA) a C-terminus with one extra flagged oxygen.
pub(crate) fn terminated_dipeptide() -> MoleculeBuilder {
    let mut mol = MoleculeBuilder::new();
    for name in ["N", "HN", "CA", "C", "O"] {
        mol.atom(1, "MET", name, &name[..1]);
    }
    mol.flagged(1, "MET", "HN2", "H");
    mol.flagged(1, "MET", "HN3", "H");
    for name in ["N", "HN", "CA", "C", "O"] {
        mol.atom(2, "ALA", name, &name[..1]);
    }
    mol.flagged(2, "ALA", "OC2", "O");

    for resid in [1, 2] {
        mol.bond((resid, "N"), (resid, "HN"));
        mol.bond((resid, "N"), (resid, "CA"));
        mol.bond((resid, "CA"), (resid, "C"));
        mol.bond((resid, "C"), (resid, "O"));
    }
    mol.bond((1, "N"), (1, "HN2"));
    mol.bond((1, "N"), (1, "HN3"));
    mol.bond((1, "C"), (2, "N"));
    mol.bond((2, "C"), (2, "OC2"));
    mol
}

/// Appends residue 3 (SER) whose side chain carries a phosphate no built-in pattern explains.
pub(crate) fn with_phosphoserine(mut mol: MoleculeBuilder) -> MoleculeBuilder {
    for name in ["N", "CA", "C", "O", "CB", "OG"] {
        mol.atom(3, "SER", name, &name[..1]);
    }
    mol.flagged(3, "SER", "P", "P");
    for name in ["O1P", "O2P", "O3P"] {
        mol.flagged(3, "SER", name, "O");
    }
    mol.bond((3, "N"), (3, "CA"));
    mol.bond((3, "CA"), (3, "C"));
    mol.bond((3, "C"), (3, "O"));
    mol.bond((3, "CA"), (3, "CB"));
    mol.bond((3, "CB"), (3, "OG"));
    mol.bond((3, "OG"), (3, "P"));
    for name in ["O1P", "O2P", "O3P"] {
        mol.bond((3, "P"), (3, name));
    }
    mol
}
