use std::fmt;

/// Distinguishes real covalent bonds from non-covalent connectivity markers.
///
/// Pseudo-bonds (hydrogen bonds, metal coordination, missing-segment markers) are kept on the
/// structure for bookkeeping but never take part in connectivity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondKind {
    #[default]
    Covalent,
    Pseudo,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Covalent => "Covalent",
                Self::Pseudo => "Pseudo",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize, // position of the first atom in the atom sequence
    pub atom2: usize, // position of the second atom in the atom sequence
    pub kind: BondKind,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, kind: BondKind) -> Self {
        Self { atom1, atom2, kind }
    }

    /// Returns true when both bonds join the same pair of atoms, in either direction.
    pub fn joins_same_atoms(&self, other: &Bond) -> bool {
        (self.atom1 == other.atom1 && self.atom2 == other.atom2)
            || (self.atom1 == other.atom2 && self.atom2 == other.atom1)
    }

    pub fn is_covalent(&self) -> bool {
        self.kind == BondKind::Covalent
    }
}
