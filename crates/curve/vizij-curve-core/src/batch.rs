//! Batch evaluation: one query per element, results written to caller buffers.
//!
//! The parallel variants fan elements out over the rayon pool. Each worker
//! reads the shared [`CurveView`] and writes only its own output slot, so no
//! synchronization is involved beyond rayon's join at the end of the call.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::baking::CurveView;
use crate::config::Config;
use crate::sampling::evaluate;

/// Sequentially evaluate `times[i]` into `out[i]`.
///
/// `times` and `out` must have equal length; only the common prefix is written.
pub fn evaluate_into(curve: CurveView<'_>, times: &[f32], out: &mut [f32]) {
    debug_assert_eq!(times.len(), out.len(), "times/out length mismatch");
    for (slot, &time) in out.iter_mut().zip(times) {
        *slot = evaluate(curve, time);
    }
}

/// Parallel counterpart of [`evaluate_into`].
pub fn par_evaluate_into(curve: CurveView<'_>, times: &[f32], out: &mut [f32], cfg: &Config) {
    debug_assert_eq!(times.len(), out.len(), "times/out length mismatch");
    if out.len() < cfg.parallel_threshold {
        evaluate_into(curve, times, out);
        return;
    }
    log::debug!(
        "parallel curve evaluation: {} queries over {} keys",
        out.len(),
        curve.len()
    );
    out.par_iter_mut()
        .zip(times.par_iter())
        .with_min_len(cfg.min_job_len.max(1))
        .for_each(|(slot, &time)| *slot = evaluate(curve, time));
}

/// Normalized query time for element `index` of a uniform batch of `len`.
#[inline]
fn uniform_time(index: usize, len: usize) -> f32 {
    index as f32 / len as f32
}

/// Sequentially fill `out[i]` with the curve at `i / out.len()`.
pub fn evaluate_uniform(curve: CurveView<'_>, out: &mut [f32]) {
    let len = out.len();
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = evaluate(curve, uniform_time(i, len));
    }
}

/// Parallel counterpart of [`evaluate_uniform`].
pub fn par_evaluate_uniform(curve: CurveView<'_>, out: &mut [f32], cfg: &Config) {
    let len = out.len();
    if len < cfg.parallel_threshold {
        evaluate_uniform(curve, out);
        return;
    }
    log::debug!(
        "parallel uniform evaluation: {} queries over {} keys",
        len,
        curve.len()
    );
    out.par_iter_mut()
        .enumerate()
        .with_min_len(cfg.min_job_len.max(1))
        .for_each(|(i, slot)| *slot = evaluate(curve, uniform_time(i, len)));
}

/// Upper bound on the number of frames a single [`FrameSampling`] produces.
pub const MAX_FRAMES: usize = 1 << 20;

/// Frame-rate based resampling window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FrameSampling {
    /// Target frame rate (Hz).
    pub frame_rate: f32,
    /// Start time; `None` uses the first key time.
    pub start_time: Option<f32>,
    /// End time; `None` uses the last key time.
    pub end_time: Option<f32>,
}

impl Default for FrameSampling {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            start_time: None,
            end_time: None,
        }
    }
}

impl FrameSampling {
    /// Query times for `curve`, inclusive of the end frame.
    ///
    /// At most [`MAX_FRAMES`] times are produced; longer windows are truncated.
    pub fn frame_times(&self, curve: CurveView<'_>) -> Vec<f32> {
        let sr = if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_rate
        } else {
            60.0
        };
        let (first, last) = curve.time_range().unwrap_or((0.0, 0.0));
        let start = self.start_time.filter(|t| t.is_finite()).unwrap_or(first);
        let end = self
            .end_time
            .filter(|t| t.is_finite())
            .unwrap_or(last)
            .max(start);
        let span = f64::from(end) - f64::from(start);
        let frames_f = (span * f64::from(sr)).ceil();
        let frame_count = if frames_f < MAX_FRAMES as f64 {
            frames_f as usize + 1 // inclusive of end
        } else {
            log::warn!(
                "frame sampling window {start}..{end} at {sr} Hz exceeds {MAX_FRAMES} frames; truncating"
            );
            MAX_FRAMES
        };
        (0..frame_count)
            .map(|f| (start + f as f32 / sr).min(end))
            .collect()
    }
}

/// Resample `curve` at a fixed frame rate.
pub fn sample_frames(curve: CurveView<'_>, sampling: &FrameSampling, cfg: &Config) -> Vec<f32> {
    let times = sampling.frame_times(curve);
    let mut out = vec![0.0; times.len()];
    par_evaluate_into(curve, &times, &mut out, cfg);
    out
}
