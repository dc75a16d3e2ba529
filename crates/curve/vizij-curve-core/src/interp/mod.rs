//! Interpolation kernels used by the evaluator.
//!
//! Plain segments use the unit-interval cubic Hermite basis. Weighted segments
//! are evaluated as a cubic Bezier whose x polynomial is inverted numerically.

pub mod functions;

pub use functions::{hermite, hermite_derivative, weighted_segment, weighted_segment_derivative};
