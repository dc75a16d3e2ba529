//! Vizij Curve Core (engine-agnostic)
//!
//! Keyframe curves split into two halves:
//! - [`AnimationCurve`]: mutable authoring representation (and reference evaluator).
//! - [`BakedCurve`]: immutable snapshot produced by [`bake`], evaluated through a
//!   copyable [`CurveView`] from any number of threads with no allocation.
//!
//! [`batch`] fans arrays of query times across the rayon pool.

pub mod baking;
pub mod batch;
pub mod config;
pub mod curve;
pub mod error;
pub mod interp;
pub mod keyframe;
pub mod sampling;
pub mod stored_curve;

// Re-exports for consumers (adapters)
pub use baking::{bake, BakedCurve, CurveView};
pub use batch::{
    evaluate_into, evaluate_uniform, par_evaluate_into, par_evaluate_uniform, sample_frames,
    FrameSampling, MAX_FRAMES,
};
pub use config::Config;
pub use curve::AnimationCurve;
pub use error::CurveError;
pub use keyframe::{Keyframe, WeightedMode, DEFAULT_WEIGHT};
pub use sampling::{evaluate, evaluate_with_derivative};
pub use stored_curve::{parse_curve_json, to_curve_json};
