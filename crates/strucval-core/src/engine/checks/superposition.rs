//! Optimal rigid-body superposition (Kabsch) and the RMSD acceptance test.

use crate::core::models::structure::AtomicStructure;
use crate::core::utils::geometry;
use crate::engine::error::ValidationError;
use crate::engine::trace::DebugTrace;
use nalgebra::{Matrix3, Vector3};
use tracing::trace;

/// Inputs for which the superposition is undefined and the geometry stage passes trivially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    Empty,
    SingleAtom,
}

/// The optimal rotation of a centred test coordinate set onto a centred reference set.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    /// Proper rotation applied to column vectors: `aligned_i = rotation * test_i`.
    pub rotation: Matrix3<f64>,
    /// Whether the unconstrained optimum was a reflection and had to be corrected.
    pub reflection_corrected: bool,
    pub aligned: Vec<Vector3<f64>>,
    pub rmsd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryReport {
    pub rmsd: f64,
    pub threshold: f64,
    pub passed: bool,
    pub degeneracy: Option<Degeneracy>,
}

/// Finds the proper rotation minimizing the RMSD between two centred coordinate sets.
///
/// # Errors
///
/// Returns [`ValidationError::LengthMismatch`] when the sets differ in length and
/// [`ValidationError::Decomposition`] when the covariance matrix cannot be factorized.
pub fn superpose(
    test: &[Vector3<f64>],
    reference: &[Vector3<f64>],
) -> Result<Superposition, ValidationError> {
    if test.len() != reference.len() {
        return Err(ValidationError::LengthMismatch {
            test: test.len(),
            reference: reference.len(),
        });
    }

    let h = geometry::covariance(reference, test);
    let svd = geometry::svd(&h)
        .ok_or(ValidationError::Decomposition("covariance matrix did not converge"))?;

    let reflection_corrected = geometry::det(&(svd.u * svd.v_t)) < 0.0;
    let mut correction = Matrix3::identity();
    if reflection_corrected {
        correction[(2, 2)] = -1.0;
    }
    let rotation = svd.u * correction * svd.v_t;
    trace!(?rotation, reflection_corrected, "Computed optimal rotation.");

    let aligned: Vec<Vector3<f64>> = test.iter().map(|t| rotation * t).collect();
    let rmsd = geometry::calculate_rmsd(&aligned, reference).unwrap_or(0.0);

    Ok(Superposition {
        rotation,
        reflection_corrected,
        aligned,
        rmsd,
    })
}

/// Superposes the active frame of `test` onto that of `reference` and accepts the pair when
/// the RMSD is strictly below `threshold`.
///
/// Both structures must hold the same number of atoms. Empty and single-atom structures pass
/// with an RMSD of zero.
pub(crate) fn validate(
    test: &AtomicStructure,
    reference: &AtomicStructure,
    threshold: f64,
    trace: &mut DebugTrace,
) -> Result<GeometryReport, ValidationError> {
    ensure_finite(test)?;
    ensure_finite(reference)?;

    let n = test.num_atoms();
    if n != reference.num_atoms() {
        return Err(ValidationError::LengthMismatch {
            test: n,
            reference: reference.num_atoms(),
        });
    }

    let degeneracy = match n {
        0 => Some(Degeneracy::Empty),
        1 => Some(Degeneracy::SingleAtom),
        _ => None,
    };
    if let Some(degeneracy) = degeneracy {
        trace.line(|| format!("superposition skipped: {degeneracy:?} structure"));
        return Ok(GeometryReport {
            rmsd: 0.0,
            threshold,
            passed: true,
            degeneracy: Some(degeneracy),
        });
    }

    let reference_centered = geometry::centered(reference.coords());
    let test_centered = geometry::centered(test.coords());

    trace.line(|| "ref centered:".to_string());
    trace.coordinates(reference.atoms(), &reference_centered);
    trace.line(|| "test centered:".to_string());
    trace.coordinates(test.atoms(), &test_centered);

    let superposition = superpose(&test_centered, &reference_centered)?;
    let passed = superposition.rmsd < threshold;

    trace.line(|| format!("RMSD: {}\tTHRESH: {}", superposition.rmsd, threshold));
    trace.line(|| "test aligned:".to_string());
    trace.coordinates(test.atoms(), &superposition.aligned);

    Ok(GeometryReport {
        rmsd: superposition.rmsd,
        threshold,
        passed,
        degeneracy: None,
    })
}

fn ensure_finite(structure: &AtomicStructure) -> Result<(), ValidationError> {
    match structure
        .coords()
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(ValidationError::NonFiniteCoordinate {
            structure: structure.name().to_string(),
            index,
        }),
        None => Ok(()),
    }
}
