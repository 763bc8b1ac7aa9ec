//! # Spectral Subspace Metrics
//!
//! Figures of merit for camera (and other optical) sensor design: how well
//! does a set of spectral sensitivity curves align with a reference set of
//! color-matching functions (CMFs)?
//!
//! Matrices are dense `ndarray::Array2<f32>` with wavelength samples as rows
//! and one spectral curve per column. Every function is pure: no state, no
//! input mutation, freshly allocated outputs.
//!
//! ## Quick Start
//!
//! ```
//! use spectral_subspace_metrics::{luther_loss, vora_value};
//! use ndarray::array;
//!
//! // Reference CMFs: three curves over five wavelength samples.
//! let cmfs = array![
//!     [1.0_f32, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//!     [0.0, 0.0, 0.0],
//!     [0.0, 0.0, 0.0],
//! ];
//! // A sensor set that is an exact linear transform of the CMFs.
//! let sensors = cmfs.mapv(|v| 2.0 * v);
//!
//! let luther = luther_loss(&sensors, &cmfs, true).unwrap();
//! let vora = vora_value(&sensors, &cmfs).unwrap();
//! assert!(luther < 1e-4);
//! assert!((vora - 1.0).abs() < 1e-4);
//! ```
//!
//! ## Core Modules
//!
//! - [`linalg`] - Projection, QR, SVD/pseudo-inverse, and Cholesky kernels
//! - [`loss`] - Luther, Vora, and L2 metric functions
//! - [`evaluation`] - Aggregate figure-of-merit reports with TOML config
//! - [`logging`] - JSON line-delimited evaluation logging

pub mod error;
pub mod evaluation;
pub mod linalg;
pub mod logging;
pub mod loss;

pub use error::{MetricError, MetricResult};
pub use evaluation::{evaluate_sensors, ConfigError, EvaluationConfig, SensorEvaluation};
pub use linalg::{orthonormal_basis, projection_matrix, subspace_projector};
pub use logging::{log_evaluation, EvaluationLogEntry};
pub use loss::l2::{l2_loss, L2Loss, Reduction};
pub use loss::luther::{
    estimate_luther_mapping, luther_loss, luther_mapping_loss, luther_regression_loss,
};
pub use loss::vora::{vora_loss, vora_value, vora_value_general};
