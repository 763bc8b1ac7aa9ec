//! Error types for the metric functions.
//!
//! Every metric either returns a fully computed value or fails with one of
//! the variants below before producing output. There are no retries and no
//! partial results; callers handle the error at the call site.

use std::fmt;

/// Result type alias for metric computations.
pub type MetricResult<T> = Result<T, MetricError>;

/// Error type shared by all metric entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Two matrices disagree on a dimension they are combined over.
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// An enumerated-option argument received a value outside its closed set.
    InvalidArgument {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Structurally degenerate input, e.g. an empty matrix where a basis is
    /// required.
    InvalidInput { context: String },
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::ShapeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            MetricError::InvalidArgument {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid argument '{}' = '{}': must be {}",
                    parameter, value, constraint
                )
            }
            MetricError::InvalidInput { context } => {
                write!(f, "Invalid input: {}", context)
            }
        }
    }
}

impl std::error::Error for MetricError {}

// Convenience constructors for common error patterns
impl MetricError {
    /// Create a shape mismatch error naming the dimension pair that failed.
    pub fn shape_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        MetricError::ShapeMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        MetricError::InvalidArgument {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(context: impl Into<String>) -> Self {
        MetricError::InvalidInput {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = MetricError::shape_mismatch(31, 41, "sensors and cmfs wavelength samples");
        let msg = err.to_string();
        assert!(msg.contains("31"));
        assert!(msg.contains("41"));
        assert!(msg.contains("wavelength samples"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = MetricError::invalid_argument("reduction", "bogus", "one of none, sum, mean");
        let msg = err.to_string();
        assert!(msg.contains("reduction"));
        assert!(msg.contains("bogus"));
        assert!(msg.contains("none, sum, mean"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = MetricError::invalid_input("basis matrix is empty");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = MetricError::shape_mismatch(5, 3, "rows");
        let err2 = MetricError::shape_mismatch(5, 3, "rows");
        let err3 = MetricError::shape_mismatch(5, 4, "rows");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetricError>();
    }
}
