use super::atom::Atom;
use super::topology::{Bond, BondKind};
use crate::core::utils::geometry;
use nalgebra::{Isometry3, Point3};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Atom index {index} is out of range for a structure with {len} atoms")]
    AtomIndexOutOfRange { index: usize, len: usize },

    #[error("Atom {index} cannot be bonded to itself")]
    SelfBond { index: usize },

    #[error("Coordinate frame has {found} points but the structure has {expected} atoms")]
    FrameLengthMismatch { expected: usize, found: usize },

    #[error("Frame index {index} is out of range for a structure with {len} frames")]
    FrameIndexOutOfRange { index: usize, len: usize },
}

/// A dense set of 3D points, one per atom, index-aligned with the atom sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateFrame {
    points: Vec<Point3<f64>>,
}

impl CoordinateFrame {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An ordered atom sequence with its bonds and one or more coordinate frames.
///
/// The position of an atom in the sequence is its identity for every comparison: element
/// lists, adjacency matrices and coordinate arrays are all indexed by it, and nothing in this
/// crate ever reorders atoms. Every frame holds exactly one point per atom; exactly one frame is
/// active at a time and is what the validator reads.
#[derive(Debug, Clone)]
pub struct AtomicStructure {
    /// Name used in diagnostics and manifest cross-references.
    name: String,
    /// Atoms in sequence order.
    atoms: Vec<Atom>,
    /// Every bond added to the structure, covalent and pseudo.
    bonds: Vec<Bond>,
    /// Covalent neighbours of each atom, by position.
    adjacency: Vec<Vec<usize>>,
    /// Coordinate frames; never empty.
    frames: Vec<CoordinateFrame>,
    /// Index into `frames` of the frame the validator reads.
    active_frame: usize,
}

impl AtomicStructure {
    /// Creates an empty structure with a single, empty coordinate frame.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
            bonds: Vec::new(),
            adjacency: Vec::new(),
            frames: vec![CoordinateFrame::default()],
            active_frame: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an atom and returns its position in the sequence.
    ///
    /// The coordinate is appended to every frame so that all frames stay index-aligned with
    /// the atom sequence. Frames that should differ are added afterwards with
    /// [`add_frame`](Self::add_frame).
    pub fn add_atom(&mut self, atom: Atom, position: Point3<f64>) -> usize {
        let index = self.atoms.len();
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        for frame in &mut self.frames {
            frame.points.push(position);
        }
        index
    }

    /// Adds a bond between the atoms at positions `atom1` and `atom2`.
    ///
    /// Adding a bond that already exists with the same kind succeeds without creating a
    /// duplicate. Only covalent bonds enter the neighbour relation.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AtomIndexOutOfRange`] if either position does not exist and
    /// [`StructureError::SelfBond`] if both positions are the same.
    pub fn add_bond(
        &mut self,
        atom1: usize,
        atom2: usize,
        kind: BondKind,
    ) -> Result<(), StructureError> {
        let len = self.atoms.len();
        for index in [atom1, atom2] {
            if index >= len {
                return Err(StructureError::AtomIndexOutOfRange { index, len });
            }
        }
        if atom1 == atom2 {
            return Err(StructureError::SelfBond { index: atom1 });
        }

        let bond = Bond::new(atom1, atom2, kind);
        if self
            .bonds
            .iter()
            .any(|existing| existing.kind == kind && existing.joins_same_atoms(&bond))
        {
            return Ok(());
        }

        trace!(structure = %self.name, atom1, atom2, %kind, "Adding bond.");
        if bond.is_covalent() && !self.adjacency[atom1].contains(&atom2) {
            self.adjacency[atom1].push(atom2);
            self.adjacency[atom2].push(atom1);
        }
        self.bonds.push(bond);
        Ok(())
    }

    /// Adds a further coordinate frame and returns its index. The active frame is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::FrameLengthMismatch`] unless the frame has exactly one point
    /// per atom.
    pub fn add_frame(&mut self, points: Vec<Point3<f64>>) -> Result<usize, StructureError> {
        if points.len() != self.atoms.len() {
            return Err(StructureError::FrameLengthMismatch {
                expected: self.atoms.len(),
                found: points.len(),
            });
        }
        self.frames.push(CoordinateFrame::new(points));
        Ok(self.frames.len() - 1)
    }

    /// Selects the frame the validator reads.
    pub fn set_active_frame(&mut self, index: usize) -> Result<(), StructureError> {
        if index >= self.frames.len() {
            return Err(StructureError::FrameIndexOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.active_frame = index;
        Ok(())
    }

    pub fn active_frame_index(&self) -> usize {
        self.active_frame
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns the element symbols in sequence order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|atom| atom.element.as_str())
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the covalent neighbours of the atom at `index`; pseudo-bonds are not included.
    pub fn bonded_neighbors(&self, index: usize) -> Option<&[usize]> {
        self.adjacency.get(index).map(|v| v.as_slice())
    }

    /// Returns the points of the active frame, index-aligned with [`atoms`](Self::atoms).
    pub fn coords(&self) -> &[Point3<f64>] {
        self.frames[self.active_frame].points()
    }

    pub fn coord(&self, index: usize) -> Option<Point3<f64>> {
        self.coords().get(index).copied()
    }

    /// Returns the centroid of the active frame (the origin for an empty structure).
    pub fn centroid(&self) -> Point3<f64> {
        geometry::centroid(self.coords())
    }

    /// Returns a copy with `isometry` applied to every point of every frame.
    ///
    /// Atoms, bonds and the active frame are carried over unchanged.
    pub fn transformed(&self, isometry: &Isometry3<f64>) -> Self {
        let mut copy = self.clone();
        for frame in &mut copy.frames {
            for point in &mut frame.points {
                *point = isometry * *point;
            }
        }
        copy
    }
}
