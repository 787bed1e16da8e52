//! # Core Models Module
//!
//! Data structures describing an atomic structure as the validator sees it.
//!
//! ## Key Components
//!
//! - [`atom`] - Element symbol and identifying label of a single atom
//! - [`topology`] - Bonds between atoms, covalent or pseudo
//! - [`structure`] - The ordered atom sequence, its bonds, and its coordinate frames
//!
//! ## Usage
//!
//! ```
//! use nalgebra::Point3;
//! use strucval::core::models::{atom::Atom, structure::AtomicStructure, topology::BondKind};
//!
//! let mut water = AtomicStructure::new("water");
//! let o = water.add_atom(Atom::new("O", "O1"), Point3::new(0.0, 0.0, 0.0));
//! let h1 = water.add_atom(Atom::new("H", "H1"), Point3::new(0.96, 0.0, 0.0));
//! water.add_bond(o, h1, BondKind::Covalent).unwrap();
//! assert_eq!(water.num_atoms(), 2);
//! ```

pub mod atom;
pub mod structure;
pub mod topology;
