//! # Core Utilities
//!
//! - [`geometry`] - Centroids, cross-covariance, 3×3 SVD and determinant, RMSD
//! - [`elements`] - Static table of element symbols

pub mod elements;
pub mod geometry;
