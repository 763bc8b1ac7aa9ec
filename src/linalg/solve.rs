//! Cholesky factorization and inverse for symmetric positive-definite
//! matrices (the regularized Gram matrices of the Vora metric).
//!
//! Runs in `f64` end to end: the Gram matrices this serves carry ridges as
//! small as 1e-6, which `f32` rounding of an O(1) Gram can swamp outright.
//! Callers working in `f32` widen before the solve and narrow the result.

use ndarray::Array2;

use crate::error::{MetricError, MetricResult};

/// Lower-triangular Cholesky factor `l` with `l · lᵗ = g`.
///
/// Fails with `InvalidInput` when `g` is not positive definite.
///
/// # Panics
/// Panics if `g` is not square.
pub fn cholesky(g: &Array2<f64>) -> MetricResult<Array2<f64>> {
    let n = g.nrows();
    assert_eq!(n, g.ncols(), "Cholesky requires a square matrix");

    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = g[[i, j]];
            for t in 0..j {
                sum -= l[[i, t]] * l[[j, t]];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(MetricError::invalid_input(
                        "matrix is not positive definite",
                    ));
                }
                l[[i, j]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }
    Ok(l)
}

/// Inverse of a symmetric positive-definite matrix via Cholesky.
///
/// Solves `l · lᵗ · x = e_c` for every identity column, so no general
/// pivoted elimination is needed.
pub fn spd_inverse(g: &Array2<f64>) -> MetricResult<Array2<f64>> {
    let n = g.nrows();
    let l = cholesky(g)?;

    let mut inv = Array2::<f64>::zeros((n, n));
    let mut y = vec![0.0_f64; n];
    let mut x = vec![0.0_f64; n];
    for c in 0..n {
        // Forward substitution: l · y = e_c
        for i in 0..n {
            let mut sum = if i == c { 1.0 } else { 0.0 };
            for t in 0..i {
                sum -= l[[i, t]] * y[t];
            }
            y[i] = sum / l[[i, i]];
        }
        // Back substitution: lᵗ · x = y
        for i in (0..n).rev() {
            let mut sum = y[i];
            for t in (i + 1)..n {
                sum -= l[[t, i]] * x[t];
            }
            x[i] = sum / l[[i, i]];
        }
        for i in 0..n {
            inv[[i, c]] = x[i];
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn cholesky_factors_spd_matrix() {
        let g = array![[4.0_f64, 2.0], [2.0, 3.0]];
        let l = cholesky(&g).unwrap();
        let rebuilt = l.dot(&l.t());
        for (a, b) in rebuilt.iter().zip(g.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(l[[0, 1]], 0.0);
    }

    #[test]
    fn cholesky_rejects_indefinite_matrix() {
        let g = array![[1.0_f64, 2.0], [2.0, 1.0]];
        assert!(matches!(
            cholesky(&g),
            Err(MetricError::InvalidInput { .. })
        ));
    }

    #[test]
    fn cholesky_resolves_tiny_ridge_above_rounding() {
        // Singular rank-1 Gram plus a 1e-6 ridge: comfortably positive
        // definite in f64.
        let mut g = array![[1.0_f64, 1.0], [1.0, 1.0]];
        for j in 0..2 {
            g[[j, j]] += 1e-6;
        }
        assert!(cholesky(&g).is_ok());
    }

    #[test]
    fn spd_inverse_matches_identity() {
        let g = array![[2.0_f64, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let inv = spd_inverse(&g).unwrap();
        let eye = g.dot(&inv);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((eye[[i, j]] - expected).abs() < 1e-10);
            }
        }
    }
}
