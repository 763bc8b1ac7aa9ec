//! One-sided Jacobi SVD and the Moore-Penrose pseudo-inverse.
//!
//! The Jacobi method orthogonalizes the columns of the working matrix with
//! plane rotations (applied to an accumulated `V` as well), which makes it
//! simple, backend-free, and accurate for the small, well-scaled matrices
//! the metrics operate on. Column dot products accumulate in `f64` so the
//! rotation angles are not limited by `f32` rounding.

use ndarray::{Array1, Array2};

/// Singular value decomposition `a = u · diag(sigma) · vᵗ`.
///
/// `sigma` is sorted in descending order; `u` and `v` have orthonormal
/// columns (up to floating tolerance).
#[derive(Debug, Clone)]
pub struct Svd {
    pub u: Array2<f32>,
    pub sigma: Array1<f32>,
    pub v: Array2<f32>,
}

const MAX_SWEEPS: usize = 60;

/// Compute the SVD of `a` by cyclic one-sided Jacobi sweeps.
///
/// Handles any shape, including rank-deficient input (dependent columns come
/// out with singular value ≈ 0). Wide matrices are factored through their
/// transpose.
pub fn svd_jacobi(a: &Array2<f32>) -> Svd {
    let (n, k) = a.dim();
    if n < k {
        let t = svd_jacobi(&a.t().to_owned());
        return Svd {
            u: t.v,
            sigma: t.sigma,
            v: t.u,
        };
    }

    let mut u = a.to_owned();
    let mut v = Array2::<f32>::eye(k);

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..k {
            for q in (p + 1)..k {
                let mut app = 0.0_f64;
                let mut aqq = 0.0_f64;
                let mut apq = 0.0_f64;
                for i in 0..n {
                    let x = f64::from(u[[i, p]]);
                    let y = f64::from(u[[i, q]]);
                    app += x * x;
                    aqq += y * y;
                    apq += x * y;
                }
                if app == 0.0 || aqq == 0.0 {
                    continue;
                }
                if apq.abs() <= f64::from(f32::EPSILON) * (app * aqq).sqrt() {
                    continue;
                }

                let zeta = (aqq - app) / (2.0 * apq);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let cs = 1.0 / (1.0 + t * t).sqrt();
                let sn = cs * t;

                for i in 0..n {
                    let up = f64::from(u[[i, p]]);
                    let uq = f64::from(u[[i, q]]);
                    u[[i, p]] = (cs * up - sn * uq) as f32;
                    u[[i, q]] = (sn * up + cs * uq) as f32;
                }
                for i in 0..k {
                    let vp = f64::from(v[[i, p]]);
                    let vq = f64::from(v[[i, q]]);
                    v[[i, p]] = (cs * vp - sn * vq) as f32;
                    v[[i, q]] = (sn * vp + cs * vq) as f32;
                }
                rotated = true;
            }
        }
        if !rotated {
            break;
        }
    }

    // Extract singular values as column norms, normalize the left vectors.
    let mut sigma = Array1::<f32>::zeros(k);
    for j in 0..k {
        let norm = u
            .column(j)
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt();
        sigma[j] = norm as f32;
        if norm > 0.0 {
            let inv = (1.0 / norm) as f32;
            for i in 0..n {
                u[[i, j]] *= inv;
            }
        }
    }

    // Selection sort into descending sigma order, swapping U and V columns
    // alongside.
    for i in 0..k {
        let mut best = i;
        for j in (i + 1)..k {
            if sigma[j] > sigma[best] {
                best = j;
            }
        }
        if best != i {
            sigma.swap(i, best);
            for row in 0..n {
                u.swap([row, i], [row, best]);
            }
            for row in 0..k {
                v.swap([row, i], [row, best]);
            }
        }
    }

    Svd { u, sigma, v }
}

/// Moore-Penrose pseudo-inverse of `a`.
///
/// Defined for any matrix: singular values below
/// `max(n, k) · ε · σ_max` are treated as zero, so rank-deficient and
/// non-square inputs are inverted in the least-squares sense without error.
/// For `a: (n, k)` the result has shape `(k, n)`.
pub fn pinv(a: &Array2<f32>) -> Array2<f32> {
    let (n, k) = a.dim();
    if n == 0 || k == 0 {
        return Array2::zeros((k, n));
    }
    let Svd { u, sigma, v } = svd_jacobi(a);
    let smax = sigma[0];
    let tol = n.max(k) as f32 * f32::EPSILON * smax;

    let rank = sigma.iter().take_while(|&&s| s > tol).count();
    let mut out = Array2::<f32>::zeros((k, n));
    for j in 0..rank {
        let inv = 1.0 / sigma[j];
        let uj = u.column(j);
        let vj = v.column(j);
        for row in 0..k {
            let scale = vj[row] * inv;
            if scale == 0.0 {
                continue;
            }
            for col in 0..n {
                out[[row, col]] += scale * uj[col];
            }
        }
    }
    out
}
