use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, AtomSnapshot};
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Data of a graph document that has no place in [`MolecularSystem`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphTomlMetadata {
    pub title: Option<String>,
    /// Serial number each atom was read with; reused when writing.
    pub serials: HashMap<AtomId, usize>,
}

#[derive(Debug, Error)]
pub enum GraphTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Duplicate atom serial: {0}")]
    DuplicateSerial(usize),
    #[error("Bond refers to unknown atom serial: {0}")]
    UnknownSerial(usize),
    #[error("Invalid bond between atom serial {0} and itself")]
    SelfBond(usize),
    #[error("Residue {resid} is named both '{first}' and '{second}'")]
    ResidueNameConflict {
        resid: isize,
        first: String,
        second: String,
    },
}

/// An attributed molecule graph stored as a TOML document.
///
/// ```toml
/// title = "tripeptide"
/// bonds = [[1, 2], [1, 3]]
///
/// [[atoms]]
/// serial = 1
/// resid = 1
/// resname = "MET"
/// name = "N"
/// element = "N"
///
/// [[atoms]]
/// serial = 2
/// resid = 1
/// resname = "MET"
/// name = "HN2"
/// element = "H"
/// ptm-atom = true
/// ```
pub struct GraphTomlFile;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    bonds: Vec<[usize; 2]>,
    #[serde(default)]
    atoms: Vec<AtomRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct AtomRecord {
    serial: usize,
    resid: isize,
    resname: String,
    name: String,
    element: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    ptm_atom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    modifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provenance: Option<SnapshotRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SnapshotRecord {
    name: String,
    element: String,
    resid: isize,
    #[serde(default)]
    ptm_atom: bool,
}

impl From<&AtomSnapshot> for SnapshotRecord {
    fn from(snapshot: &AtomSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            element: snapshot.element.clone(),
            resid: snapshot.residue_number,
            ptm_atom: snapshot.ptm_atom,
        }
    }
}

impl From<SnapshotRecord> for AtomSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        Self {
            name: record.name,
            element: record.element,
            residue_number: record.resid,
            ptm_atom: record.ptm_atom,
        }
    }
}

impl GraphTomlFile {
    fn build_document(
        system: &MolecularSystem,
        metadata: &GraphTomlMetadata,
    ) -> Result<GraphDocument, GraphTomlError> {
        let mut residues: Vec<_> = system.residues_iter().map(|(_, r)| r).collect();
        residues.sort_by_key(|r| r.number);

        let mut next_serial = metadata.serials.values().copied().max().unwrap_or(0) + 1;
        let mut serials: HashMap<AtomId, usize> = HashMap::with_capacity(system.atom_count());
        let mut used = HashSet::with_capacity(system.atom_count());
        let mut atoms = Vec::with_capacity(system.atom_count());

        for residue in residues {
            for &atom_id in residue.atoms() {
                let Some(atom) = system.atom(atom_id) else {
                    continue;
                };
                let serial = match metadata.serials.get(&atom_id) {
                    Some(&serial) => serial,
                    None => {
                        next_serial += 1;
                        next_serial - 1
                    }
                };
                if !used.insert(serial) {
                    return Err(GraphTomlError::DuplicateSerial(serial));
                }
                serials.insert(atom_id, serial);
                atoms.push(AtomRecord {
                    serial,
                    resid: residue.number,
                    resname: residue.name.clone(),
                    name: atom.name.clone(),
                    element: atom.element.clone(),
                    ptm_atom: atom.ptm_atom,
                    position: atom.position.map(|p| [p.x, p.y, p.z]),
                    modifications: atom.modifications.clone(),
                    provenance: atom.provenance.as_ref().map(SnapshotRecord::from),
                });
            }
        }

        let bonds = system
            .bonds()
            .iter()
            .filter_map(|bond| {
                let a = serials.get(&bond.atom1_id)?;
                let b = serials.get(&bond.atom2_id)?;
                Some([*a, *b])
            })
            .collect();

        Ok(GraphDocument {
            title: metadata.title.clone(),
            bonds,
            atoms,
        })
    }
}

impl MolecularFile for GraphTomlFile {
    type Metadata = GraphTomlMetadata;
    type Error = GraphTomlError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let document: GraphDocument = toml::from_str(&content)?;

        let mut system = MolecularSystem::new();
        let mut metadata = GraphTomlMetadata {
            title: document.title,
            serials: HashMap::with_capacity(document.atoms.len()),
        };
        let mut by_serial: HashMap<usize, AtomId> = HashMap::with_capacity(document.atoms.len());

        for record in document.atoms {
            if by_serial.contains_key(&record.serial) {
                return Err(GraphTomlError::DuplicateSerial(record.serial));
            }
            let residue_id = system.add_residue(record.resid, &record.resname);
            if let Some(residue) = system.residue(residue_id) {
                if residue.name != record.resname {
                    return Err(GraphTomlError::ResidueNameConflict {
                        resid: record.resid,
                        first: residue.name.clone(),
                        second: record.resname,
                    });
                }
            }

            let mut atom = Atom::new(&record.name, &record.element, residue_id);
            atom.ptm_atom = record.ptm_atom;
            atom.position = record.position.map(|[x, y, z]| Point3::new(x, y, z));
            atom.modifications = record.modifications;
            atom.provenance = record.provenance.map(AtomSnapshot::from);

            let atom_id = system
                .add_atom_to_residue(residue_id, atom)
                .ok_or(GraphTomlError::UnknownSerial(record.serial))?;
            by_serial.insert(record.serial, atom_id);
            metadata.serials.insert(atom_id, record.serial);
        }

        for [a, b] in document.bonds {
            if a == b {
                return Err(GraphTomlError::SelfBond(a));
            }
            let id_a = *by_serial.get(&a).ok_or(GraphTomlError::UnknownSerial(a))?;
            let id_b = *by_serial.get(&b).ok_or(GraphTomlError::UnknownSerial(b))?;
            system.add_bond(id_a, id_b);
        }

        Ok((system, metadata))
    }

    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let document = Self::build_document(system, metadata)?;
        let text = toml::to_string(&document)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(system, &GraphTomlMetadata::default(), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRIPEPTIDE: &str = r#"
title = "terminal fragment"
bonds = [[1, 2], [1, 3], [1, 4], [1, 5], [5, 6]]

[[atoms]]
serial = 1
resid = 1
resname = "MET"
name = "N"
element = "N"
position = [0.0, 1.0, 2.0]

[[atoms]]
serial = 2
resid = 1
resname = "MET"
name = "HN"
element = "H"

[[atoms]]
serial = 3
resid = 1
resname = "MET"
name = "HN2"
element = "H"
ptm-atom = true

[[atoms]]
serial = 4
resid = 1
resname = "MET"
name = "HN3"
element = "H"
ptm-atom = true

[[atoms]]
serial = 5
resid = 1
resname = "MET"
name = "CA"
element = "C"

[[atoms]]
serial = 6
resid = 2
resname = "ALA"
name = "N"
element = "N"
"#;

    fn read(text: &str) -> Result<(MolecularSystem, GraphTomlMetadata), GraphTomlError> {
        GraphTomlFile::read_from(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn read_from_builds_system_graph() {
        let (system, metadata) = read(TRIPEPTIDE).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("terminal fragment"));
        assert_eq!(system.atom_count(), 6);
        assert_eq!(system.bonds().len(), 5);
        assert_eq!(system.ptm_atoms().len(), 2);

        let res1 = system.find_residue_by_number(1).unwrap();
        let residue = system.residue(res1).unwrap();
        assert_eq!(residue.name, "MET");
        let n = residue.get_atom_id_by_name("N").unwrap();
        assert_eq!(system.get_bonded_neighbors(n).unwrap().len(), 4);
        assert_eq!(
            system.atom(n).unwrap().position,
            Some(Point3::new(0.0, 1.0, 2.0))
        );
        assert_eq!(metadata.serials[&n], 1);
    }

    #[test]
    fn write_then_read_preserves_canonicalization_state() {
        let (mut system, metadata) = read(TRIPEPTIDE).unwrap();
        let res1 = system.find_residue_by_number(1).unwrap();
        let hn = system.residue(res1).unwrap().get_atom_id_by_name("HN").unwrap();
        let snapshot = system.atom(hn).unwrap().snapshot(1);
        system.rename_atom(hn, "HN1");
        let atom = system.atom_mut(hn).unwrap();
        atom.provenance = Some(snapshot.clone());
        atom.modifications.push("N-terminus".to_string());

        let mut buffer = Vec::new();
        GraphTomlFile::write_to(&system, &metadata, &mut buffer).unwrap();
        let (reread, reread_meta) = read(std::str::from_utf8(&buffer).unwrap()).unwrap();

        assert_eq!(reread_meta.title, metadata.title);
        assert_eq!(reread.atom_count(), 6);
        assert_eq!(reread.bonds().len(), 5);
        let res1 = reread.find_residue_by_number(1).unwrap();
        let hn1 = reread.residue(res1).unwrap().get_atom_id_by_name("HN1").unwrap();
        let atom = reread.atom(hn1).unwrap();
        assert_eq!(atom.modifications, vec!["N-terminus".to_string()]);
        assert_eq!(atom.provenance, Some(snapshot));
        assert_eq!(reread_meta.serials[&hn1], 2);
    }

    #[test]
    fn write_system_to_assigns_sequential_serials() {
        let mut system = MolecularSystem::new();
        let res = system.add_residue(7, "GLY");
        let a = system.add_atom_to_residue(res, Atom::new("C", "C", res)).unwrap();
        let b = system.add_atom_to_residue(res, Atom::new("O", "O", res)).unwrap();
        system.add_bond(a, b).unwrap();

        let mut buffer = Vec::new();
        GraphTomlFile::write_system_to(&system, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("serial = 1"));
        assert!(text.contains("serial = 2"));
        assert!(!text.contains("title"));
        assert!(!text.contains("ptm-atom"));
    }

    #[test]
    fn read_from_rejects_duplicate_serials() {
        let text = r#"
[[atoms]]
serial = 1
resid = 1
resname = "ALA"
name = "N"
element = "N"

[[atoms]]
serial = 1
resid = 1
resname = "ALA"
name = "CA"
element = "C"
"#;
        assert!(matches!(read(text), Err(GraphTomlError::DuplicateSerial(1))));
    }

    #[test]
    fn read_from_rejects_bonds_to_unknown_serials() {
        let text = r#"
bonds = [[1, 9]]

[[atoms]]
serial = 1
resid = 1
resname = "ALA"
name = "N"
element = "N"
"#;
        assert!(matches!(read(text), Err(GraphTomlError::UnknownSerial(9))));
    }

    #[test]
    fn read_from_rejects_conflicting_residue_names() {
        let text = r#"
[[atoms]]
serial = 1
resid = 1
resname = "ALA"
name = "N"
element = "N"

[[atoms]]
serial = 2
resid = 1
resname = "GLY"
name = "CA"
element = "C"
"#;
        assert!(matches!(
            read(text),
            Err(GraphTomlError::ResidueNameConflict { resid: 1, .. })
        ));
    }

    #[test]
    fn read_from_rejects_unknown_fields() {
        let text = r#"
[[atoms]]
serial = 1
resid = 1
resname = "ALA"
name = "N"
element = "N"
charge = 0.5
"#;
        assert!(matches!(read(text), Err(GraphTomlError::TomlDe(_))));
    }
}
