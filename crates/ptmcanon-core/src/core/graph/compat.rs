use crate::core::models::atom::Atom;

/// Decides whether a host node may be mapped onto a pattern node.
///
/// Any `Fn(&A, &B) -> bool` closure is a compatibility predicate. For symmetry
/// analysis the matcher also evaluates the predicate between two pattern labels;
/// restricted to pattern labels it must behave as an equivalence relation under
/// which equivalent pattern nodes accept exactly the same host nodes.
pub trait NodeCompat<A, B> {
    fn compatible(&self, host: &A, pattern: &B) -> bool;
}

impl<A, B, F> NodeCompat<A, B> for F
where
    F: Fn(&A, &B) -> bool,
{
    fn compatible(&self, host: &A, pattern: &B) -> bool {
        self(host, pattern)
    }
}

/// The fields of an atom the modification-matching rule looks at.
pub trait AtomLike {
    fn atom_name(&self) -> &str;
    fn element(&self) -> &str;
    fn is_ptm_atom(&self) -> bool;
}

impl AtomLike for Atom {
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

/// The standard compatibility rule for modification matching.
///
/// Two atoms are compatible only if both or neither are flagged as unresolved.
/// Flagged atoms are compared by element, since their names are not trusted;
/// unflagged atoms are compared by atom name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PtmCompat;

impl<A: AtomLike, B: AtomLike> NodeCompat<A, B> for PtmCompat {
    fn compatible(&self, host: &A, pattern: &B) -> bool {
        if host.is_ptm_atom() != pattern.is_ptm_atom() {
            return false;
        }
        if pattern.is_ptm_atom() {
            host.element() == pattern.element()
        } else {
            host.atom_name() == pattern.atom_name()
        }
    }
}
