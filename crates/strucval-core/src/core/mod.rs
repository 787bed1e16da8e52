//! # Core Module
//!
//! Fundamental building blocks shared by the validation engine and the harness.
//!
//! - **Structure Representation** ([`models`]) - Atoms, bonds, coordinate frames and the
//!   `AtomicStructure` that owns them
//! - **Numerical Utilities** ([`utils`]) - The 3×3 linear-algebra boundary used by the
//!   superposition check, and the element symbol table
//!
//! Structures are always built in memory; no molecular file format is read here.

pub mod models;
pub mod utils;
