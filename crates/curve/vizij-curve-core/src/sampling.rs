//! Curve evaluation against a baked keyframe buffer.
//!
//! Model:
//! - Keys are ordered by non-decreasing time; the evaluator never sorts.
//! - Queries outside `[first.time, last.time]` clamp to the nearest end value.
//! - Segment `[i, i+1]` is located by binary search over key times.
//! - Unweighted segments use the cubic Hermite basis with tangents scaled by the
//!   segment duration. Segments with an active weight on either side go through
//!   the weighted Bezier path in `interp::functions`.
//! - Degenerate input never fails: empty curves yield 0, single keys hold their
//!   value, zero-length or reversed segments hold the left key, NaN queries hold
//!   the first key.
//!
//! Nothing here allocates or touches shared mutable state, so evaluation is
//! safe to run from any number of threads against the same [`CurveView`].

use crate::baking::CurveView;
use crate::interp::functions::{
    hermite, hermite_derivative, weighted_segment, weighted_segment_derivative,
};
use crate::keyframe::{Keyframe, DEFAULT_WEIGHT};

/// Where a query lands on the curve.
enum Lookup<'a> {
    /// Constant result (empty curve, single key, clamp, degenerate segment).
    Hold(f32),
    /// Inside segment `[left, right]` at unit parameter `t`, duration `dt > 0`.
    Segment {
        left: &'a Keyframe,
        right: &'a Keyframe,
        t: f32,
        dt: f32,
    },
}

/// Index `i` of the segment `[i, i+1]` containing `time`.
///
/// Callers guarantee `keys.len() >= 2`. The result is always a valid segment
/// index, even for unsorted keys.
#[inline]
pub(crate) fn find_segment(keys: &[Keyframe], time: f32) -> usize {
    let upper = keys.partition_point(|k| k.time <= time);
    upper.saturating_sub(1).min(keys.len() - 2)
}

#[inline]
fn lookup(keys: &[Keyframe], time: f32) -> Lookup<'_> {
    match keys {
        [] => Lookup::Hold(0.0),
        [only] => Lookup::Hold(only.value),
        [first, .., last] => {
            if time.is_nan() || time <= first.time {
                return Lookup::Hold(first.value);
            }
            if time >= last.time {
                return Lookup::Hold(last.value);
            }
            let i = find_segment(keys, time);
            let left = &keys[i];
            let right = &keys[i + 1];
            let dt = right.time - left.time;
            if dt.is_nan() || dt <= 0.0 {
                return Lookup::Hold(left.value);
            }
            let t = ((time - left.time) / dt).clamp(0.0, 1.0);
            Lookup::Segment { left, right, t, dt }
        }
    }
}

/// Arrival/departure weights for a segment, or `None` when neither side is weighted.
#[inline]
fn segment_weights(left: &Keyframe, right: &Keyframe) -> Option<(f32, f32)> {
    let out_weighted = left.weighted_mode.weights_out();
    let in_weighted = right.weighted_mode.weights_in();
    if !out_weighted && !in_weighted {
        return None;
    }
    let w0 = if out_weighted {
        left.out_weight
    } else {
        DEFAULT_WEIGHT
    };
    let w1 = if in_weighted {
        right.in_weight
    } else {
        DEFAULT_WEIGHT
    };
    Some((w0, w1))
}

/// Evaluate the curve at `time`.
#[inline]
pub fn evaluate(curve: CurveView<'_>, time: f32) -> f32 {
    match lookup(curve.keys(), time) {
        Lookup::Hold(v) => v,
        Lookup::Segment { left, right, t, dt } => {
            let m0 = left.out_tangent * dt;
            let m1 = right.in_tangent * dt;
            match segment_weights(left, right) {
                None => hermite(left.value, m0, right.value, m1, t),
                Some((w0, w1)) => weighted_segment(left.value, m0, w0, right.value, m1, w1, t),
            }
        }
    }
}

/// Evaluate the curve and its slope (value per unit time) at `time`.
///
/// The slope is 0 wherever [`evaluate`] holds a constant.
pub fn evaluate_with_derivative(curve: CurveView<'_>, time: f32) -> (f32, f32) {
    match lookup(curve.keys(), time) {
        Lookup::Hold(v) => (v, 0.0),
        Lookup::Segment { left, right, t, dt } => {
            let m0 = left.out_tangent * dt;
            let m1 = right.in_tangent * dt;
            let (value, d_unit) = match segment_weights(left, right) {
                None => (
                    hermite(left.value, m0, right.value, m1, t),
                    hermite_derivative(left.value, m0, right.value, m1, t),
                ),
                Some((w0, w1)) => (
                    weighted_segment(left.value, m0, w0, right.value, m1, w1, t),
                    weighted_segment_derivative(left.value, m0, w0, right.value, m1, w1, t),
                ),
            };
            (value, d_unit / dt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baking::bake;

    fn keys(times: &[f32]) -> Vec<Keyframe> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Keyframe::new(t, i as f32))
            .collect()
    }

    #[test]
    fn find_segment_picks_last_key_at_or_before_query() {
        let k = keys(&[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(find_segment(&k, 0.5), 0);
        assert_eq!(find_segment(&k, 1.0), 1);
        assert_eq!(find_segment(&k, 2.999), 2);
    }

    #[test]
    fn find_segment_skips_past_duplicate_times() {
        let k = keys(&[0.0, 1.0, 1.0, 2.0]);
        assert_eq!(find_segment(&k, 1.0), 2);
    }

    #[test]
    fn find_segment_stays_in_bounds_for_unsorted_keys() {
        let k = keys(&[0.0, 5.0, 1.0, 2.0, 9.0]);
        for q in [-1.0, 0.5, 3.0, 7.0, 100.0] {
            let i = find_segment(&k, q);
            assert!(i + 1 < k.len());
        }
    }

    #[test]
    fn unsorted_keys_stay_finite() {
        let baked = bake(&keys(&[0.0, 2.0, 1.0, 3.0]));
        for i in 0..=30 {
            let v = baked.evaluate(i as f32 * 0.1);
            assert!(v.is_finite());
        }
    }

    #[test]
    fn coincident_keys_clamp_to_ends() {
        let k = vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(0.0, 5.0),
            Keyframe::new(0.0, 9.0),
        ];
        // Every key shares one time, so any query clamps.
        let baked = bake(&k);
        assert_eq!(baked.evaluate(0.0), 1.0);
        assert_eq!(baked.evaluate(1.0), 9.0);
        assert_eq!(lookup_value(&k, 0.0), 1.0);
    }

    fn lookup_value(k: &[Keyframe], time: f32) -> f32 {
        match lookup(k, time) {
            Lookup::Hold(v) => v,
            Lookup::Segment { .. } => f32::NAN,
        }
    }

    #[test]
    fn nan_query_holds_first_value() {
        let baked = bake(&[Keyframe::new(0.0, 4.0), Keyframe::new(1.0, 8.0)]);
        assert_eq!(baked.evaluate(f32::NAN), 4.0);
        assert_eq!(baked.evaluate(f32::INFINITY), 8.0);
        assert_eq!(baked.evaluate(f32::NEG_INFINITY), 4.0);
    }

    #[test]
    fn derivative_of_linear_segment_is_slope() {
        let baked = bake(&[
            Keyframe::with_tangents(0.0, 0.0, 2.0, 2.0),
            Keyframe::with_tangents(2.0, 4.0, 2.0, 2.0),
        ]);
        for q in [0.25, 1.0, 1.75] {
            let (v, d) = baked.evaluate_with_derivative(q);
            assert!((v - 2.0 * q).abs() < 1e-5);
            assert!((d - 2.0).abs() < 1e-4);
        }
        assert_eq!(baked.evaluate_with_derivative(-1.0), (0.0, 0.0));
    }
}
