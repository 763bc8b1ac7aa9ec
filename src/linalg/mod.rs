//! Dense linear-algebra kernels backing the metrics.
//!
//! Everything here operates on `ndarray::Array2<f32>` with no external
//! factorization backend: reduced QR (Householder), a one-sided Jacobi SVD
//! with a Moore-Penrose pseudo-inverse built on top of it, a Cholesky-based
//! SPD inverse, and the orthogonal-projection constructions shared by the
//! Luther and Vora metrics.

pub mod projection;
pub mod qr;
pub mod solve;
pub mod svd;

pub use projection::{orthonormal_basis, projection_matrix, subspace_projector};
pub use qr::qr_reduced;
pub use solve::spd_inverse;
pub use svd::{pinv, svd_jacobi, Svd};

use ndarray::Array2;

/// Frobenius norm: square root of the sum of squared entries.
pub fn frobenius_norm(a: &Array2<f32>) -> f32 {
    a.iter().map(|&x| x * x).sum::<f32>().sqrt()
}

/// Trace of a square matrix (sum of diagonal entries).
///
/// # Panics
/// Panics if `a` is not square.
pub fn trace(a: &Array2<f32>) -> f32 {
    assert_eq!(a.nrows(), a.ncols(), "trace requires a square matrix");
    a.diag().sum()
}
