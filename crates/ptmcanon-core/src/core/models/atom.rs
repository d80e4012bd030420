use super::ids::ResidueId;
use nalgebra::Point3;

/// The state of an atom captured just before it was renamed by a recognized modification.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSnapshot {
    /// The atom name before canonicalization.
    pub name: String,
    /// The element symbol at the time of the snapshot.
    pub element: String,
    /// The residue number the atom belonged to.
    pub residue_number: isize,
    /// Whether the atom was still flagged as unresolved.
    pub ptm_atom: bool,
}

/// Represents an atom of a molecule graph together with its canonicalization state.
///
/// Besides its identity (name, element, parent residue), an atom carries the
/// `ptm_atom` flag set by upstream pipeline steps for atoms that could not be
/// named from the residue templates, and an audit trail of the modifications
/// that were recognized on its residue group.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "HN2").
    pub name: String,
    /// The element symbol (e.g., "C", "H").
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// `true` when the atom is unresolved and must be explained by a modification.
    pub ptm_atom: bool,
    /// Names of the modifications applied to this atom's residue group, in application order.
    pub modifications: Vec<String>,
    /// Pre-rename snapshot, present once the atom has been renamed by a modification.
    pub provenance: Option<AtomSnapshot>,
    /// Cartesian coordinates in Angstroms, if known. Opaque to canonicalization.
    pub position: Option<Point3<f64>>,
}

impl Atom {
    /// Creates a new, unflagged `Atom` with no position and an empty audit trail.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The element symbol of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    pub fn new(name: &str, element: &str, residue_id: ResidueId) -> Self {
        Self {
            name: name.to_string(),
            element: element.to_string(),
            residue_id,
            ptm_atom: false,
            modifications: Vec::new(),
            provenance: None,
            position: None,
        }
    }

    /// Marks the atom as unresolved (builder style).
    pub fn flagged(mut self) -> Self {
        self.ptm_atom = true;
        self
    }

    /// Sets the atom position (builder style).
    pub fn with_position(mut self, position: Point3<f64>) -> Self {
        self.position = Some(position);
        self
    }

    pub fn snapshot(&self, residue_number: isize) -> AtomSnapshot {
        AtomSnapshot {
            name: self.name.clone(),
            element: self.element.clone(),
            residue_number,
            ptm_atom: self.ptm_atom,
        }
    }
}
