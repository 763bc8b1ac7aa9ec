//! Deviation from the Luther condition.
//!
//! A sensor set satisfies the Luther condition when its spectral
//! sensitivities are an exact linear combination of the reference
//! color-matching functions. Three interchangeable forms of the same
//! residual are provided: the subspace form ([`luther_loss`]), the explicit
//! mapping form ([`luther_mapping_loss`]), and the regression form
//! ([`luther_regression_loss`]); all agree numerically for the same inputs.

use ndarray::Array2;

use crate::error::{MetricError, MetricResult};
use crate::linalg::{frobenius_norm, pinv, projection_matrix};

/// Luther loss as subspace distance: `‖(I − P_cmfs)·sensors‖_F`.
///
/// `sensors` and `cmfs` are sampled at the same wavelengths (rows). With
/// `normalize` the residual norm is divided by `‖sensors‖_F + ε`, giving a
/// scale-free value in `[0, ∞)` with `0` meaning the Luther condition holds
/// exactly.
///
/// Fails with `ShapeMismatch` when the row counts differ.
pub fn luther_loss(
    sensors: &Array2<f32>,
    cmfs: &Array2<f32>,
    normalize: bool,
) -> MetricResult<f32> {
    if sensors.nrows() != cmfs.nrows() {
        return Err(MetricError::shape_mismatch(
            cmfs.nrows(),
            sensors.nrows(),
            "sensors and cmfs wavelength samples (rows)",
        ));
    }

    let projector = projection_matrix(cmfs);
    // (I - P)·S computed as S - P·S, which never materializes the identity.
    let residual = sensors - &projector.dot(sensors);
    let num = frobenius_norm(&residual);
    if !normalize {
        return Ok(num);
    }
    let denom = frobenius_norm(sensors);
    Ok(num / (denom + f32::EPSILON))
}

/// Least-squares mapping `A` such that `cmfs · A ≈ sensors`.
///
/// `A = pinv(cmfs) · sensors`; no validation beyond what the multiply
/// enforces structurally.
pub fn estimate_luther_mapping(cmfs: &Array2<f32>, sensors: &Array2<f32>) -> Array2<f32> {
    pinv(cmfs).dot(sensors)
}

/// Luther loss, mapping form: `‖Q·M − V‖_F`.
///
/// `Q: (N, k)` is the basis, `M: (k, m)` a linear mapping onto `m` target
/// channels, `V: (N, m)` the responses to match. With `normalize` the value
/// is divided by `‖V‖_F + ε`. With the optimal `M = pinv(Q)·V` this equals
/// `‖(I − P_Q)·V‖_F`.
///
/// Each of the three dimension pairs is checked separately so a failing
/// `ShapeMismatch` names the pair that disagreed.
pub fn luther_mapping_loss(
    q: &Array2<f32>,
    m: &Array2<f32>,
    v: &Array2<f32>,
    normalize: bool,
) -> MetricResult<f32> {
    if q.ncols() != m.nrows() {
        return Err(MetricError::shape_mismatch(
            q.ncols(),
            m.nrows(),
            "inner dimensions of Q and M",
        ));
    }
    if q.nrows() != v.nrows() {
        return Err(MetricError::shape_mismatch(
            q.nrows(),
            v.nrows(),
            "rows of Q and V (sample count)",
        ));
    }
    if m.ncols() != v.ncols() {
        return Err(MetricError::shape_mismatch(
            m.ncols(),
            v.ncols(),
            "columns of M and V (target channels)",
        ));
    }

    let diff = q.dot(m) - v;
    let num = frobenius_norm(&diff);
    if !normalize {
        return Ok(num);
    }
    let denom = frobenius_norm(v);
    Ok(num / (denom + f32::EPSILON))
}

/// Luther loss, regression form: least-squares error with `M = pinv(Q)·X`.
///
/// Equals the Frobenius norm of `(P_Q − I)·X` where `P_Q = Q·pinv(Q)`.
/// Fails with `ShapeMismatch` when `Q` and `X` disagree on the row count.
pub fn luther_regression_loss(
    q: &Array2<f32>,
    x: &Array2<f32>,
    normalize: bool,
) -> MetricResult<f32> {
    if q.nrows() != x.nrows() {
        return Err(MetricError::shape_mismatch(
            q.nrows(),
            x.nrows(),
            "rows of Q and X (sample count)",
        ));
    }
    let m_hat = pinv(q).dot(x);
    luther_mapping_loss(q, &m_hat, x, normalize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn cmfs_5x3() -> Array2<f32> {
        array![
            [1.0_f32, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ]
    }

    #[test]
    fn scaled_cmfs_satisfy_luther_condition() {
        let cmfs = cmfs_5x3();
        let sensors = cmfs.mapv(|v| 2.0 * v);
        let loss = luther_loss(&sensors, &cmfs, true).unwrap();
        assert!(loss < 1e-4, "loss was {loss}");
    }

    #[test]
    fn orthogonal_sensors_give_unit_normalized_loss() {
        let cmfs = cmfs_5x3();
        // Sensors living entirely outside span(cmfs).
        let sensors = array![
            [0.0_f32, 0.0],
            [0.0, 0.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
        ];
        let loss = luther_loss(&sensors, &cmfs, true).unwrap();
        assert!((loss - 1.0).abs() < 1e-3, "loss was {loss}");
    }

    #[test]
    fn row_mismatch_is_rejected() {
        let cmfs = cmfs_5x3();
        let sensors = Array2::<f32>::zeros((4, 3));
        assert!(matches!(
            luther_loss(&sensors, &cmfs, true),
            Err(MetricError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn estimated_mapping_reproduces_linear_transform() {
        let cmfs = cmfs_5x3();
        // sensors = cmfs · T for a known T.
        let t = array![[1.0_f32, 0.5], [0.0, 1.0], [2.0, 0.0]];
        let sensors = cmfs.dot(&t);
        let a = estimate_luther_mapping(&cmfs, &sensors);
        for (lhs, rhs) in a.iter().zip(t.iter()) {
            assert!((lhs - rhs).abs() < 1e-4);
        }
    }

    #[test]
    fn mapping_loss_checks_each_dimension_pair() {
        let q = Array2::<f32>::zeros((5, 3));
        let m = Array2::<f32>::zeros((3, 2));
        let v = Array2::<f32>::zeros((5, 2));

        assert!(luther_mapping_loss(&q, &m, &v, false).is_ok());

        let bad_m = Array2::<f32>::zeros((4, 2));
        let err = luther_mapping_loss(&q, &bad_m, &v, false).unwrap_err();
        assert!(err.to_string().contains("Q and M"));

        let bad_v_rows = Array2::<f32>::zeros((6, 2));
        let err = luther_mapping_loss(&q, &m, &bad_v_rows, false).unwrap_err();
        assert!(err.to_string().contains("Q and V"));

        let bad_v_cols = Array2::<f32>::zeros((5, 3));
        let err = luther_mapping_loss(&q, &m, &bad_v_cols, false).unwrap_err();
        assert!(err.to_string().contains("M and V"));
    }

    #[test]
    fn regression_loss_rejects_row_mismatch() {
        let q = Array2::<f32>::zeros((5, 3));
        let x = Array2::<f32>::zeros((6, 3));
        assert!(matches!(
            luther_regression_loss(&q, &x, false),
            Err(MetricError::ShapeMismatch { .. })
        ));
    }
}
