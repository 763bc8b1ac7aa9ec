//! Aggregate sensor evaluation: every figure of merit in one pass.
//!
//! Configuration is loaded from TOML with sensible defaults, mirroring how
//! the rest of the toolchain configures itself.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::MetricResult;
use crate::loss::luther::luther_loss;
use crate::loss::vora::{vora_value, vora_value_general};

/// Configuration for [`evaluate_sensors`].
///
/// # Examples
///
/// ```
/// use spectral_subspace_metrics::EvaluationConfig;
///
/// let config = EvaluationConfig::from_toml_str("normalize_luther = false").unwrap();
/// assert!(!config.normalize_luther);
/// assert!(!config.regularized_vora);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Divide the Luther residual by the sensor norm (scale-free metric).
    pub normalize_luther: bool,
    /// Use the ridge-regularized Vora projectors instead of the
    /// rank-adaptive QR path.
    pub regularized_vora: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            normalize_luther: true,
            regularized_vora: false,
        }
    }
}

impl EvaluationConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(ConfigError::Parse)
    }
}

/// Errors raised while loading an [`EvaluationConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config TOML: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

/// Figures of merit for one sensor set against one reference CMF set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEvaluation {
    /// Number of wavelength samples (rows).
    pub samples: usize,
    /// Number of sensor channels (columns).
    pub channels: usize,
    /// Luther-condition deviation.
    pub luther_loss: f32,
    /// Subspace similarity in [0, 1].
    pub vora_value: f32,
    /// Complement of the Vora-Value.
    pub vora_loss: f32,
}

/// Compute the full figure-of-merit set for `sensors` against `cmfs`.
pub fn evaluate_sensors(
    sensors: &Array2<f32>,
    cmfs: &Array2<f32>,
    config: &EvaluationConfig,
) -> MetricResult<SensorEvaluation> {
    let luther = luther_loss(sensors, cmfs, config.normalize_luther)?;
    let vora = if config.regularized_vora {
        vora_value_general(sensors, cmfs)?
    } else {
        vora_value(sensors, cmfs)?
    };

    Ok(SensorEvaluation {
        samples: sensors.nrows(),
        channels: sensors.ncols(),
        luther_loss: luther,
        vora_value: vora,
        vora_loss: 1.0 - vora,
    })
}
