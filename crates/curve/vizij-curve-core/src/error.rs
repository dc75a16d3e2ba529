//! Error types for the authoring and loading boundary.
//!
//! Evaluation itself never fails; these errors only come from editing an
//! [`AnimationCurve`](crate::curve::AnimationCurve) or parsing stored curves.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    /// A keyframe carries a NaN or infinite field.
    #[error("keyframe {index} has a non-finite field")]
    InvalidKeyframe { index: usize },

    /// Key times must be non-decreasing.
    #[error("keyframe {index} time {time} precedes previous time {previous}")]
    NonMonotonicTime {
        index: usize,
        time: f32,
        previous: f32,
    },

    #[error("key index {index} out of range (len {len})")]
    KeyIndexOutOfRange { index: usize, len: usize },

    #[error("parse error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
