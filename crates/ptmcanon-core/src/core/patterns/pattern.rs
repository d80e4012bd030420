use crate::core::graph::LabeledGraph;
use crate::core::graph::compat::AtomLike;
use crate::core::utils::elements::is_known_element;
use thiserror::Error;

/// A node of a reference modification graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternAtom {
    /// The canonical atom name.
    pub name: String,
    /// The element symbol, compared against flagged molecule atoms.
    pub element: String,
    /// `true` for atoms the modification adds; `false` for anchor atoms.
    pub ptm_atom: bool,
    /// Name the matched molecule atom receives instead of `name`.
    pub rename: Option<String>,
}

impl PatternAtom {
    /// An anchor atom, matched by name against unflagged molecule atoms.
    pub fn anchor(name: &str, element: &str) -> Self {
        Self {
            name: name.to_string(),
            element: element.to_string(),
            ptm_atom: false,
            rename: None,
        }
    }

    /// A modification atom, matched by element against flagged molecule atoms.
    pub fn ptm(name: &str, element: &str) -> Self {
        Self {
            ptm_atom: true,
            ..Self::anchor(name, element)
        }
    }

    pub fn renamed_to(mut self, rename: &str) -> Self {
        self.rename = Some(rename.to_string());
        self
    }

    /// The name a molecule atom mapped onto this node receives, if it is renamed at all.
    ///
    /// Flagged nodes and nodes with an explicit `rename` rename their image;
    /// plain anchors leave it alone.
    pub fn target_name(&self) -> Option<&str> {
        match (&self.rename, self.ptm_atom) {
            (Some(rename), _) => Some(rename),
            (None, true) => Some(&self.name),
            (None, false) => None,
        }
    }
}

impl PatternAtom {
    /// Strips surrounding whitespace, since matching compares names and elements exactly.
    fn trim(&mut self) {
        fn trim_in_place(value: &mut String) {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.element);
        if let Some(rename) = self.rename.as_mut() {
            trim_in_place(rename);
        }
    }
}

impl AtomLike for PatternAtom {
    fn atom_name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> &str {
        &self.element
    }

    fn is_ptm_atom(&self) -> bool {
        self.ptm_atom
    }
}

/// A validated reference modification graph.
///
/// Nodes are addressed by their index in [`Pattern::atoms`]. Every pattern has
/// at least one anchor atom, tying it to a real residue, and at least one
/// modification atom, so applying it always consumes unresolved atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    atoms: Vec<PatternAtom>,
    bonds: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Pattern {
    /// Builds and validates a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the name or an atom name is empty, an element
    /// symbol is unknown, a bond refers to a missing atom or to the same atom
    /// twice, or the pattern lacks an anchor or a modification atom.
    pub fn new(
        name: &str,
        mut atoms: Vec<PatternAtom>,
        bonds: Vec<(usize, usize)>,
    ) -> Result<Self, PatternError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        for (index, atom) in atoms.iter_mut().enumerate() {
            atom.trim();
            if atom.name.is_empty() || atom.rename.as_deref() == Some("") {
                return Err(PatternError::EmptyAtomName {
                    pattern: name.to_string(),
                    index,
                });
            }
            if !is_known_element(&atom.element) {
                return Err(PatternError::UnknownElement {
                    pattern: name.to_string(),
                    atom: atom.name.clone(),
                    element: atom.element.clone(),
                });
            }
        }
        if !atoms.iter().any(|a| !a.ptm_atom) {
            return Err(PatternError::NoAnchor(name.to_string()));
        }
        if !atoms.iter().any(|a| a.ptm_atom) {
            return Err(PatternError::NoPtmAtom(name.to_string()));
        }

        let mut adjacency = vec![Vec::new(); atoms.len()];
        for &(a, b) in &bonds {
            if a >= atoms.len() || b >= atoms.len() {
                return Err(PatternError::BondOutOfRange {
                    pattern: name.to_string(),
                    bond: (a, b),
                    atom_count: atoms.len(),
                });
            }
            if a == b {
                return Err(PatternError::SelfBond {
                    pattern: name.to_string(),
                    index: a,
                });
            }
            if !adjacency[a].contains(&b) {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }

        Ok(Self {
            name: name.to_string(),
            atoms,
            bonds,
            adjacency,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[PatternAtom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&PatternAtom> {
        self.atoms.get(index)
    }

    pub fn bonds(&self) -> &[(usize, usize)] {
        &self.bonds
    }

    /// Total number of atoms, anchors included.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn anchor_count(&self) -> usize {
        self.atoms.iter().filter(|a| !a.ptm_atom).count()
    }

    pub fn ptm_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.ptm_atom).count()
    }
}

impl LabeledGraph for Pattern {
    type Node = usize;
    type Label = PatternAtom;

    fn nodes(&self) -> Vec<usize> {
        (0..self.atoms.len()).collect()
    }

    fn label(&self, node: usize) -> &PatternAtom {
        &self.atoms[node]
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.adjacency.get(node).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern name must not be empty")]
    EmptyName,
    #[error("Atom {index} of pattern '{pattern}' has an empty name")]
    EmptyAtomName { pattern: String, index: usize },
    #[error("Atom '{atom}' of pattern '{pattern}' has unknown element '{element}'")]
    UnknownElement {
        pattern: String,
        atom: String,
        element: String,
    },
    #[error("Pattern '{0}' has no anchor atom (every atom is flagged as a PTM atom)")]
    NoAnchor(String),
    #[error("Pattern '{0}' has no PTM atom and could never explain an unresolved atom")]
    NoPtmAtom(String),
    #[error("Bond {bond:?} of pattern '{pattern}' refers to a missing atom (pattern has {atom_count} atoms)")]
    BondOutOfRange {
        pattern: String,
        bond: (usize, usize),
        atom_count: usize,
    },
    #[error("Pattern '{pattern}' bonds atom {index} to itself")]
    SelfBond { pattern: String, index: usize },
    #[error("Duplicate pattern name '{0}'")]
    DuplicateName(String),
}
