//! The linear-algebra boundary of the validator.
//!
//! Everything numerically delicate that the superposition check needs goes through the few
//! functions in this module, so that the checks themselves only deal in points and verdicts.

use nalgebra::{Matrix3, Point3, Vector3};

/// Factors of a 3×3 singular value decomposition `m = u · diag(singular_values) · v_t`,
/// with the singular values in descending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd3 {
    pub u: Matrix3<f64>,
    pub singular_values: Vector3<f64>,
    pub v_t: Matrix3<f64>,
}

/// Returns the arithmetic mean of `points`, or the origin when there are none.
pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}

/// Returns the displacement of every point from the centroid of `points`.
pub fn centered(points: &[Point3<f64>]) -> Vec<Vector3<f64>> {
    let center = centroid(points);
    points.iter().map(|p| p - center).collect()
}

/// Returns the cross-covariance `Aᵀ·B` of two paired coordinate sets written as n×3 row
/// matrices, i.e. the sum over pairs of `a_i · b_iᵀ`.
///
/// Pairs beyond the shorter of the two inputs are ignored.
pub fn covariance(a: &[Vector3<f64>], b: &[Vector3<f64>]) -> Matrix3<f64> {
    a.iter()
        .zip(b.iter())
        .fold(Matrix3::zeros(), |acc, (a_i, b_i)| acc + a_i * b_i.transpose())
}

/// Computes the singular value decomposition of `m`.
///
/// Returns `None` if the iteration does not converge or the factors are unavailable, which
/// only happens for non-finite input.
pub fn svd(m: &Matrix3<f64>) -> Option<Svd3> {
    let decomposition = (*m).try_svd(true, true, f64::EPSILON, 0)?;
    let (u, v_t) = (decomposition.u?, decomposition.v_t?);
    let values = decomposition.singular_values;

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    Some(Svd3 {
        u: Matrix3::from_columns(&order.map(|i| u.column(i).into_owned())),
        singular_values: Vector3::from(order.map(|i| values[i])),
        v_t: Matrix3::from_rows(&order.map(|i| v_t.row(i).into_owned())),
    })
}

pub fn det(m: &Matrix3<f64>) -> f64 {
    m.determinant()
}

/// Returns the largest Euclidean distance from `center` to any of `points` (0 when empty).
pub fn max_distance_from(points: &[Point3<f64>], center: &Point3<f64>) -> f64 {
    points
        .iter()
        .map(|p| (p - center).norm())
        .fold(0.0, f64::max)
}

pub fn calculate_rmsd(coords1: &[Vector3<f64>], coords2: &[Vector3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}
