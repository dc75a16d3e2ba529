//! Mutable authoring curve.
//!
//! [`AnimationCurve`] is the editable side of the data flow: build or load it,
//! edit keys in place, then [`bake`](AnimationCurve::bake) a snapshot for
//! evaluation. Its own [`evaluate`](AnimationCurve::evaluate) is a reference
//! implementation independent of the baked hot path: it runs
//! in f64, scans segments linearly and inverts the Bezier time axis by plain
//! bisection for every segment, weighted or not. Tests use it as the oracle.

use serde::{Deserialize, Serialize};

use crate::baking::{bake, BakedCurve};
use crate::error::CurveError;
use crate::keyframe::Keyframe;

const REFERENCE_BISECTION_STEPS: usize = 64;
const UNWEIGHTED: f64 = 1.0 / 3.0;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Wrap `keys` as given. Order is not checked; see [`validate`](Self::validate).
    pub fn new(keys: impl Into<Vec<Keyframe>>) -> Self {
        Self { keys: keys.into() }
    }

    /// Two keys with flat tangents: smooth start and stop.
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// Two keys whose tangents both equal the connecting slope.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self::new(vec![
            Keyframe::with_tangents(t0, v0, slope, slope),
            Keyframe::with_tangents(t1, v1, slope, slope),
        ])
    }

    pub fn constant(t0: f32, t1: f32, value: f32) -> Self {
        Self::new(vec![Keyframe::new(t0, value), Keyframe::new(t1, value)])
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn key_mut(&mut self, index: usize) -> Option<&mut Keyframe> {
        self.keys.get_mut(index)
    }

    pub fn set_keys(&mut self, keys: impl Into<Vec<Keyframe>>) {
        self.keys = keys.into();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert `key` in time order (after any keys sharing its time). Returns its index.
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        let index = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(index, key);
        index
    }

    /// Replace the key at `index` and re-insert it in time order. Returns the new index.
    pub fn move_key(&mut self, index: usize, key: Keyframe) -> Result<usize, CurveError> {
        self.remove_key(index)?;
        Ok(self.add_key(key))
    }

    pub fn remove_key(&mut self, index: usize) -> Result<Keyframe, CurveError> {
        if index >= self.keys.len() {
            return Err(CurveError::KeyIndexOutOfRange {
                index,
                len: self.keys.len(),
            });
        }
        Ok(self.keys.remove(index))
    }

    pub fn time_range(&self) -> Option<(f32, f32)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }

    /// Check that every field is finite and times are non-decreasing.
    pub fn validate(&self) -> Result<(), CurveError> {
        let mut previous = f32::NEG_INFINITY;
        for (index, key) in self.keys.iter().enumerate() {
            if !key.is_finite() {
                return Err(CurveError::InvalidKeyframe { index });
            }
            if key.time < previous {
                return Err(CurveError::NonMonotonicTime {
                    index,
                    time: key.time,
                    previous,
                });
            }
            previous = key.time;
        }
        Ok(())
    }

    /// Snapshot the current keys into an immutable [`BakedCurve`].
    pub fn bake(&self) -> BakedCurve {
        bake(&self.keys)
    }

    /// Reference evaluation with clamp extrapolation.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if self.keys.len() == 1 || time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        self.keys
            .windows(2)
            .rev()
            .find(|pair| pair[0].time <= time && time < pair[1].time)
            .map(|pair| reference_segment(&pair[0], &pair[1], time))
            .unwrap_or(first.value)
    }
}

impl From<&AnimationCurve> for BakedCurve {
    fn from(curve: &AnimationCurve) -> Self {
        curve.bake()
    }
}

fn bezier64(p0: f64, p1: f64, p2: f64, p3: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    u * u * u * p0 + 3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s * p3
}

/// Segment evaluation in absolute (time, value) space: place both Bezier
/// control points, find the parameter whose x equals `time`, return its y.
fn reference_segment(left: &Keyframe, right: &Keyframe, time: f32) -> f32 {
    let t0 = f64::from(left.time);
    let t1 = f64::from(right.time);
    let dt = t1 - t0;
    if dt <= 0.0 {
        return left.value;
    }
    let weight = |active: bool, w: f32| {
        if active && w.is_finite() {
            f64::from(w).clamp(0.0, 1.0)
        } else {
            UNWEIGHTED
        }
    };
    let w0 = weight(left.weighted_mode.weights_out(), left.out_weight);
    let w1 = weight(right.weighted_mode.weights_in(), right.in_weight);

    let v0 = f64::from(left.value);
    let v1 = f64::from(right.value);
    let x = [t0, t0 + w0 * dt, t1 - w1 * dt, t1];
    let y = [
        v0,
        v0 + w0 * dt * f64::from(left.out_tangent),
        v1 - w1 * dt * f64::from(right.in_tangent),
        v1,
    ];

    let target = f64::from(time);
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    for _ in 0..REFERENCE_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if bezier64(x[0], x[1], x[2], x[3], mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier64(y[0], y[1], y[2], y[3], 0.5 * (lo + hi)) as f32
}
