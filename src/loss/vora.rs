//! Vora-Value: subspace similarity between a sensor set and reference CMFs.
//!
//! Unlike the Luther residual, which only measures how well the sensors fit
//! inside the CMF span, the Vora-Value is a symmetric similarity between the
//! two subspaces: the mean squared cosine of their principal angles, bounded
//! in `[0, 1]` with `1` for identical subspaces.
//!
//! Two formulations are provided. [`vora_value`] is the rank-adaptive form,
//! robust for rank-deficient sensor sets; [`vora_value_general`] builds the
//! projectors through a ridge-regularized Gram inverse instead of a
//! rank-selecting QR branch, so it stays smooth for consumers that
//! differentiate through the metric.

use ndarray::Array2;

use crate::error::{MetricError, MetricResult};
use crate::linalg::{orthonormal_basis, spd_inverse, subspace_projector, trace};

/// Ridge added to the Gram matrix in the regularized projector.
const RIDGE: f32 = 1e-6;

/// Vora-Value of `sensors` against `cmfs`, in `[0, 1]`.
///
/// Computed via orthonormal bases and projectors:
/// `trace(P_sensors · P_cmfs) / m` with `m = min(rank(sensors), rank(cmfs))`,
/// clamped to `[0, 1]` to absorb floating-point overshoot at the boundary.
///
/// Fails with `ShapeMismatch` when the row counts differ, and with
/// `InvalidInput` when either input is empty or has numerical rank zero.
pub fn vora_value(sensors: &Array2<f32>, cmfs: &Array2<f32>) -> MetricResult<f32> {
    if sensors.nrows() != cmfs.nrows() {
        return Err(MetricError::shape_mismatch(
            cmfs.nrows(),
            sensors.nrows(),
            "sensors and cmfs wavelength samples (rows)",
        ));
    }

    let q_s = orthonormal_basis(sensors)?;
    let q_c = orthonormal_basis(cmfs)?;
    let m = q_s.ncols().min(q_c.ncols());
    if m == 0 {
        return Err(MetricError::invalid_input(
            "both inputs must have numerical rank at least one",
        ));
    }

    let p_s = subspace_projector(&q_s);
    let p_c = subspace_projector(&q_c);
    // trace(Ps·Pc) is the sum of squared cosines of the principal angles.
    let val = trace(&p_s.dot(&p_c)) / m as f32;
    Ok(val.clamp(0.0, 1.0))
}

/// Vora-Value with ridge-regularized projectors.
///
/// Both projectors are formed directly as `X·(XᵗX + λI)⁻¹·Xᵗ` with fixed
/// `λ = 1e-6`, and `m = min(cols(q), cols(x))`. The regularized Gram matrix
/// is symmetric positive definite by construction, so its inverse goes
/// through Cholesky.
///
/// Fails with `ShapeMismatch` when the row counts differ, and with
/// `InvalidInput` when either input has zero columns.
pub fn vora_value_general(q: &Array2<f32>, x: &Array2<f32>) -> MetricResult<f32> {
    if q.nrows() != x.nrows() {
        return Err(MetricError::shape_mismatch(
            x.nrows(),
            q.nrows(),
            "Q and X sample counts (rows)",
        ));
    }
    let m = q.ncols().min(x.ncols());
    if m == 0 {
        return Err(MetricError::invalid_input(
            "both inputs must have at least one column",
        ));
    }

    let p_q = ridge_projector(q)?;
    let p_x = ridge_projector(x)?;
    let val = trace(&p_q.dot(&p_x)) / m as f32;
    Ok(val.clamp(0.0, 1.0))
}

/// Loss counterpart of the Vora-Value: `1 − vora_value`, in `[0, 1]`.
pub fn vora_loss(sensors: &Array2<f32>, cmfs: &Array2<f32>) -> MetricResult<f32> {
    Ok(1.0 - vora_value(sensors, cmfs)?)
}

// The Gram matrix and its inverse are formed in f64: rounding an O(1) Gram
// to f32 perturbs its eigenvalues by ~1e-5, which would swamp the 1e-6 ridge
// and spuriously reject nearly rank-deficient input.
fn ridge_projector(x: &Array2<f32>) -> MetricResult<Array2<f32>> {
    let k = x.ncols();
    let wide = x.mapv(f64::from);
    let mut gram = wide.t().dot(&wide);
    for j in 0..k {
        gram[[j, j]] += f64::from(RIDGE);
    }
    let inv = spd_inverse(&gram)?;
    let projector = wide.dot(&inv).dot(&wide.t());
    Ok(projector.mapv(|v| v as f32))
}
