//! Householder QR factorization (reduced form).

use ndarray::{s, Array1, Array2};

/// Reduced QR factorization of `a`.
///
/// For `a` with shape `(n, k)` returns `(q, r)` with `q: (n, p)`,
/// `r: (p, k)` and `p = min(n, k)`, such that `qᵗ·q = I` and `q·r = a`.
/// The diagonal of `r` may carry either sign; callers interested in rank
/// should look at its magnitude.
pub fn qr_reduced(a: &Array2<f32>) -> (Array2<f32>, Array2<f32>) {
    let (n, k) = a.dim();
    let p = n.min(k);
    let mut r = a.to_owned();
    // One Householder vector per step; a zero-length vector marks a step
    // skipped because the remaining column was already zero.
    let mut reflectors: Vec<Array1<f32>> = Vec::with_capacity(p);

    for j in 0..p {
        let mut v: Array1<f32> = r.slice(s![j.., j]).to_owned();
        let norm = v.dot(&v).sqrt();
        if norm <= f32::MIN_POSITIVE {
            reflectors.push(Array1::zeros(0));
            continue;
        }
        let alpha = if v[0] >= 0.0 { -norm } else { norm };
        v[0] -= alpha;
        let vtv = v.dot(&v);

        // Apply H = I - 2·v·vᵗ/(vᵗ·v) to the trailing block of R.
        for c in j..k {
            let tau = 2.0 * v.dot(&r.slice(s![j.., c])) / vtv;
            let mut col = r.slice_mut(s![j.., c]);
            col.scaled_add(-tau, &v);
        }
        r[[j, j]] = alpha;
        for i in (j + 1)..n {
            r[[i, j]] = 0.0;
        }
        reflectors.push(v);
    }

    // Q = H_0·H_1·…·H_{p-1} applied to the first p columns of the identity,
    // built by running the reflectors in reverse.
    let mut q = Array2::<f32>::zeros((n, p));
    for j in 0..p {
        q[[j, j]] = 1.0;
    }
    for j in (0..p).rev() {
        let v = &reflectors[j];
        if v.is_empty() {
            continue;
        }
        let vtv = v.dot(v);
        for c in 0..p {
            let tau = 2.0 * v.dot(&q.slice(s![j.., c])) / vtv;
            let mut col = q.slice_mut(s![j.., c]);
            col.scaled_add(-tau, v);
        }
    }

    let r_upper = r.slice(s![..p, ..]).to_owned();
    (q, r_upper)
}
