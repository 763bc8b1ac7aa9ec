//! Orthogonal-projection constructions shared by the Luther and Vora
//! metrics.
//!
//! Two routes onto the same subspace: `projection_matrix` goes through the
//! pseudo-inverse and never branches on rank, `orthonormal_basis` goes
//! through QR and truncates to the numerically estimated rank. The first
//! stays smooth for consumers that differentiate through the result; the
//! second yields a clean orthonormal basis even for rank-deficient input.

use ndarray::{s, Array2};

use crate::error::{MetricError, MetricResult};
use crate::linalg::qr::qr_reduced;
use crate::linalg::svd::pinv;

/// Orthogonal projection matrix onto `span(basis)`: `basis · pinv(basis)`.
///
/// Defined for any basis, including rank-deficient or non-square ones; the
/// pseudo-inverse implicitly drops near-zero singular directions. The result
/// is symmetric and idempotent within floating tolerance, with trace equal
/// to the numerical rank of `basis`.
pub fn projection_matrix(basis: &Array2<f32>) -> Array2<f32> {
    basis.dot(&pinv(basis))
}

/// Orthonormal basis spanning `col(x)`, truncated to numerical rank.
///
/// Computes a reduced QR factorization and keeps the leading columns of the
/// orthogonal factor whose R-diagonal magnitude exceeds
/// `ε · max(n, k)`, discarding directions a rank-deficient `x` does not
/// actually span.
///
/// Fails with `InvalidInput` when `x` has zero elements.
pub fn orthonormal_basis(x: &Array2<f32>) -> MetricResult<Array2<f32>> {
    if x.is_empty() {
        return Err(MetricError::invalid_input(
            "orthonormal_basis requires a non-empty matrix",
        ));
    }
    let (n, k) = x.dim();
    let (q, r) = qr_reduced(x);
    let tol = f32::EPSILON * n.max(k) as f32;
    let rank = (0..q.ncols()).filter(|&j| r[[j, j]].abs() > tol).count();
    Ok(q.slice(s![.., ..rank]).to_owned())
}

/// Projector `q · qᵗ` onto the column span of `q`.
///
/// Precondition: `q` has orthonormal columns (as produced by
/// [`orthonormal_basis`]).
pub fn subspace_projector(q: &Array2<f32>) -> Array2<f32> {
    q.dot(&q.t())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn max_abs_diff(a: &Array2<f32>, b: &Array2<f32>) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn projection_matrix_is_symmetric_and_idempotent() {
        let basis = array![
            [1.0_f32, 0.5],
            [0.0, 1.0],
            [2.0, -1.0],
            [1.0, 1.0],
        ];
        let p = projection_matrix(&basis);
        assert_eq!(p.dim(), (4, 4));
        assert!(max_abs_diff(&p, &p.t().to_owned()) < 1e-4);
        assert!(max_abs_diff(&p.dot(&p), &p) < 1e-4);
    }

    #[test]
    fn projection_matrix_trace_equals_rank() {
        let basis = array![
            [1.0_f32, 2.0],
            [0.0, 1.0],
            [1.0, 0.0],
        ];
        let p = projection_matrix(&basis);
        let trace: f32 = p.diag().sum();
        assert!((trace - 2.0).abs() < 1e-3);
    }

    #[test]
    fn projection_matrix_tolerates_rank_deficiency() {
        // Second column is a multiple of the first; trace collapses to 1.
        let basis = array![
            [1.0_f32, 3.0],
            [2.0, 6.0],
            [0.0, 0.0],
        ];
        let p = projection_matrix(&basis);
        let trace: f32 = p.diag().sum();
        assert!((trace - 1.0).abs() < 1e-3);
    }

    #[test]
    fn orthonormal_basis_truncates_dependent_columns() {
        // Third column is exactly the sum of the first two.
        let x = array![
            [1.0_f32, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ];
        let q = orthonormal_basis(&x).unwrap();
        assert_eq!(q.ncols(), 2);
        let gram = q.t().dot(&q);
        let eye = Array2::<f32>::eye(2);
        assert!(max_abs_diff(&gram, &eye) < 1e-5);
    }

    #[test]
    fn orthonormal_basis_rejects_empty_input() {
        let x = Array2::<f32>::zeros((0, 3));
        assert!(matches!(
            orthonormal_basis(&x),
            Err(MetricError::InvalidInput { .. })
        ));
    }

    #[test]
    fn subspace_projector_from_orthonormal_columns() {
        let q = array![[1.0_f32, 0.0], [0.0, 1.0], [0.0, 0.0]];
        let p = subspace_projector(&q);
        assert!(max_abs_diff(&p.dot(&p), &p) < 1e-6);
        let trace: f32 = p.diag().sum();
        assert!((trace - 2.0).abs() < 1e-6);
    }
}
