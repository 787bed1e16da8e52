//! Size-adaptive RMSD acceptance thresholds.
//!
//! A tolerance derived from machine epsilon alone is far too tight for real structures:
//! accumulated rounding and alignment error grow with both the number of atoms and the spatial
//! extent of the structure. The estimate below scales `sqrt(eps)` by a power of the atom count
//! and by the largest distance from the centre of mass, then blends the result through a
//! fractional exponent that keeps the three sensitivity presets well separated.

use crate::core::models::structure::AtomicStructure;
use crate::core::utils::geometry;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Named adjustment of the exponent used to derive the RMSD threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sensitivity {
    /// Exponent reduced by one; the smallest threshold.
    Tight,
    #[default]
    Normal,
    /// Exponent increased by one; the largest threshold.
    Loose,
}

impl Sensitivity {
    /// Integer offset applied to the base exponents: -1, 0 or +1.
    pub fn offset(self) -> i32 {
        match self {
            Self::Tight => -1,
            Self::Normal => 0,
            Self::Loose => 1,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid sensitivity '{0}'. Expected 'tight', 'normal' or 'loose'.")]
pub struct ParseSensitivityError(pub String);

impl FromStr for Sensitivity {
    type Err = ParseSensitivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tight" => Ok(Self::Tight),
            "normal" => Ok(Self::Normal),
            "loose" => Ok(Self::Loose),
            _ => Err(ParseSensitivityError(s.to_string())),
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Tight => "tight",
                Self::Normal => "normal",
                Self::Loose => "loose",
            }
        )
    }
}

/// Smallest threshold ever returned, used when a structure has no spatial extent.
pub fn min_tolerance() -> f64 {
    f64::EPSILON.sqrt()
}

/// Estimates the RMSD acceptance threshold for comparisons against `reference`.
///
/// With `n` atoms, offset `s` from `sensitivity`, base exponent `p = 2 + s` and `max_d` the
/// largest distance of any atom in the active frame from its centre of mass:
///
/// ```text
/// tol0 = n^p * sqrt(eps)
/// tol1 = tol0 * max_d * p
/// tol  = tol1^(2 / (4 + s))
/// ```
///
/// The result is always strictly positive: structures without spatial extent (empty,
/// single-atom, or all atoms coincident) yield [`min_tolerance`].
pub fn estimate(reference: &AtomicStructure, sensitivity: Sensitivity) -> f64 {
    let s = sensitivity.offset();
    let p = 2 + s;
    let n = reference.num_atoms() as f64;

    let tol0 = n.powi(p) * f64::EPSILON.sqrt();

    let com = reference.centroid();
    let max_d = geometry::max_distance_from(reference.coords(), &com);

    let tol1 = tol0 * max_d * f64::from(p);
    let tolerance = tol1.powf(2.0 / f64::from(4 + s));

    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        min_tolerance()
    };

    debug!(
        structure = reference.name(),
        atoms = reference.num_atoms(),
        max_distance = max_d,
        %sensitivity,
        tolerance,
        "Estimated RMSD tolerance."
    );
    tolerance
}
