use std::fmt;

/// A single atom of an [`AtomicStructure`](super::structure::AtomicStructure).
///
/// Atoms carry identity only. Coordinates live in the structure's coordinate frames and
/// neighbours in its bond table, both addressed by the atom's position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The element symbol (e.g. "C", "Cl"), compared by exact string equality.
    pub element: String,
    /// A human-readable label used in diagnostics (e.g. "/A:12@CA" or "C1").
    pub label: String,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a label.
    ///
    /// Surrounding whitespace is trimmed from both; the element symbol is otherwise kept
    /// verbatim so that positional comparison stays exact.
    pub fn new(element: &str, label: &str) -> Self {
        Self {
            element: element.trim().to_string(),
            label: label.trim().to_string(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.element)
        } else {
            write!(f, "{}", self.label)
        }
    }
}
