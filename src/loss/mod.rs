//! Loss functions for camera sensor design and evaluation.
//!
//! - Luther group: deviation from the Luther condition (an exact linear
//!   mapping from reference CMFs to the sensor responses)
//! - Vora group: subspace similarity between a sensor set and the CMFs
//! - L2: basic elementwise squared-error utility

pub mod l2;
pub mod luther;
pub mod vora;

pub use l2::{l2_loss, L2Loss, Reduction};
pub use luther::{
    estimate_luther_mapping, luther_loss, luther_mapping_loss, luther_regression_loss,
};
pub use vora::{vora_loss, vora_value, vora_value_general};
