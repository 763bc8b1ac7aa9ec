//! Elementwise squared-error loss with selectable reduction.

use std::str::FromStr;

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{MetricError, MetricResult};

/// Reduction applied to the elementwise squared error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Keep the full elementwise loss matrix.
    None,
    /// Sum over all elements.
    Sum,
    /// Mean over all elements.
    Mean,
}

impl FromStr for Reduction {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Reduction::None),
            "sum" => Ok(Reduction::Sum),
            "mean" => Ok(Reduction::Mean),
            other => Err(MetricError::invalid_argument(
                "reduction",
                other,
                "one of none, sum, mean",
            )),
        }
    }
}

/// Result of [`l2_loss`]: a matrix for `"none"`, a scalar otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum L2Loss {
    /// Full squared-error matrix, one entry per element (`"none"`).
    Elementwise(Array2<f32>),
    /// Reduced loss value (`"sum"` or `"mean"`).
    Scalar(f32),
}

impl L2Loss {
    /// Scalar value, if the loss was reduced.
    pub fn scalar(&self) -> Option<f32> {
        match self {
            L2Loss::Scalar(v) => Some(*v),
            L2Loss::Elementwise(_) => None,
        }
    }

    /// Elementwise loss matrix, if no reduction was applied.
    pub fn elementwise(&self) -> Option<&Array2<f32>> {
        match self {
            L2Loss::Elementwise(m) => Some(m),
            L2Loss::Scalar(_) => None,
        }
    }
}

/// L2 (squared-error) loss between `pred` and `target`.
///
/// `reduction` selects `"none"`, `"sum"`, or `"mean"`; any other string
/// fails with `InvalidArgument`. Shape agreement between the two inputs is
/// a caller precondition enforced by the underlying array subtraction.
pub fn l2_loss(pred: &Array2<f32>, target: &Array2<f32>, reduction: &str) -> MetricResult<L2Loss> {
    let reduction = Reduction::from_str(reduction)?;
    let diff = pred - target;
    match reduction {
        Reduction::None => Ok(L2Loss::Elementwise(diff.mapv(|d| d * d))),
        Reduction::Sum => Ok(L2Loss::Scalar(squared_sum(&diff))),
        Reduction::Mean => {
            let count = diff.len() as f32;
            Ok(L2Loss::Scalar(squared_sum(&diff) / count))
        }
    }
}

fn squared_sum(diff: &Array2<f32>) -> f32 {
    let slice = diff
        .as_slice()
        .expect("ndarray uses contiguous layout for Array2");
    slice.par_iter().map(|&d| d * d).sum::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identical_inputs_give_zero_loss() {
        let x = array![[0.1_f32, 0.2], [0.3, 0.4], [0.5, 0.6]];
        let loss = l2_loss(&x, &x, "sum").unwrap();
        assert!(loss.scalar().unwrap().abs() < 1e-7);
    }

    #[test]
    fn mean_equals_sum_over_count() {
        let pred = array![[1.0_f32, 2.0], [3.0, 4.0]];
        let target = array![[0.0_f32, 0.0], [0.0, 0.0]];
        let sum = l2_loss(&pred, &target, "sum").unwrap().scalar().unwrap();
        let mean = l2_loss(&pred, &target, "mean").unwrap().scalar().unwrap();
        assert!((sum - 30.0).abs() < 1e-5);
        assert!((mean - sum / 4.0).abs() < 1e-5);
    }

    #[test]
    fn none_keeps_elementwise_matrix() {
        let pred = array![[2.0_f32, 0.0]];
        let target = array![[0.0_f32, 1.0]];
        let loss = l2_loss(&pred, &target, "none").unwrap();
        let matrix = loss.elementwise().unwrap();
        assert!((matrix[[0, 0]] - 4.0).abs() < 1e-6);
        assert!((matrix[[0, 1]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_reduction_is_rejected() {
        let x = array![[1.0_f32]];
        assert!(matches!(
            l2_loss(&x, &x, "bogus"),
            Err(MetricError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn reduction_parses_from_str() {
        assert_eq!("sum".parse::<Reduction>().unwrap(), Reduction::Sum);
        assert!("average".parse::<Reduction>().is_err());
    }
}
