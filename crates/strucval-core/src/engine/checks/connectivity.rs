use crate::core::models::structure::AtomicStructure;
use crate::engine::trace::DebugTrace;

/// Dense symmetric covalent adjacency of a structure, indexed by atom position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn from_structure(structure: &AtomicStructure) -> Self {
        let size = structure.num_atoms();
        let mut cells = vec![false; size * size];
        for i in 0..size {
            for &j in structure.bonded_neighbors(i).unwrap_or_default() {
                cells[i * size + j] = true;
                cells[j * size + i] = true;
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_bonded(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.cells[i * self.size + j]
    }

    /// Returns every pair `(i, j)` with `i > j` whose bonded state differs between the two
    /// matrices, ordered by `i` then `j`.
    pub fn differing_pairs(&self, other: &Self) -> Vec<(usize, usize)> {
        let size = self.size.max(other.size);
        (0..size)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .filter(|&(i, j)| self.is_bonded(i, j) != other.is_bonded(i, j))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub matches: bool,
    pub differences: Vec<(usize, usize)>,
}

/// Compares the covalent bond graphs of two structures of equal size.
pub fn compare(test: &AtomicStructure, reference: &AtomicStructure) -> ConnectivityReport {
    check(test, reference, &mut DebugTrace::new(false))
}

pub(crate) fn check(
    test: &AtomicStructure,
    reference: &AtomicStructure,
    trace: &mut DebugTrace,
) -> ConnectivityReport {
    let test_adjacency = AdjacencyMatrix::from_structure(test);
    let reference_adjacency = AdjacencyMatrix::from_structure(reference);

    if test_adjacency == reference_adjacency {
        return ConnectivityReport {
            matches: true,
            differences: Vec::new(),
        };
    }

    let differences = test_adjacency.differing_pairs(&reference_adjacency);
    trace.line(|| "connectivity differs".to_string());
    for &(i, j) in &differences {
        trace.line(|| format!("{}-{}", label_of(reference, i), label_of(reference, j)));
    }

    ConnectivityReport {
        matches: false,
        differences,
    }
}

fn label_of(structure: &AtomicStructure, index: usize) -> String {
    structure
        .atom(index)
        .map(|atom| atom.to_string())
        .unwrap_or_else(|| format!("#{index}"))
}
