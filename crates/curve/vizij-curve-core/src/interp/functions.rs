//! Scalar interpolation helpers:
//! - hermite / hermite_derivative (unit-interval cubic Hermite basis)
//! - cubic_bezier / cubic_bezier_derivative
//! - solve_bezier_x (Newton with bisection fallback, bounded iterations)
//! - weighted_segment / weighted_segment_derivative
//!
//! Everything here is pure arithmetic on `f32`: no allocation, no shared state.

use crate::keyframe::DEFAULT_WEIGHT;

/// Upper bound on root-finding steps when inverting the Bezier x polynomial.
const SOLVE_MAX_ITERATIONS: usize = 24;
/// Accepted |x(s) - x| before the solve stops early.
const SOLVE_TOLERANCE: f32 = 2e-7;
/// Below this dx/ds the x polynomial is treated as flat.
const FLAT_SLOPE: f32 = 1e-6;

/// Cubic Hermite interpolation on `t` in [0,1].
///
/// `m0`/`m1` are the endpoint tangents already scaled to the unit interval
/// (slope multiplied by segment duration).
#[inline]
pub fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
}

/// Derivative of [`hermite`] with respect to the unit parameter `t`.
#[inline]
pub fn hermite_derivative(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let d00 = 6.0 * t2 - 6.0 * t;
    let d10 = 3.0 * t2 - 4.0 * t + 1.0;
    let d01 = -6.0 * t2 + 6.0 * t;
    let d11 = 3.0 * t2 - 2.0 * t;
    d00 * p0 + d10 * m0 + d01 * p1 + d11 * m1
}

/// Cubic Bezier basis function
#[inline]
pub fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[inline]
pub fn cubic_bezier_derivative(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * (p1 - p0) + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Find `s` in [0,1] such that `cubic_bezier(0, x1, x2, 1, s) == x`.
///
/// The x polynomial is monotonic for `x1, x2` in [0,1], so the root is bracketed
/// by [0,1] for the whole solve. Newton steps that leave the bracket (or hit a
/// flat spot) fall back to bisection.
#[inline]
pub fn solve_bezier_x(x: f32, x1: f32, x2: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut s = x;
    for _ in 0..SOLVE_MAX_ITERATIONS {
        let err = cubic_bezier(0.0, x1, x2, 1.0, s) - x;
        if err.abs() < SOLVE_TOLERANCE {
            break;
        }
        if err < 0.0 {
            lo = s;
        } else {
            hi = s;
        }
        let slope = cubic_bezier_derivative(0.0, x1, x2, 1.0, s);
        let newton = if slope > FLAT_SLOPE {
            s - err / slope
        } else {
            f32::NAN
        };
        s = if newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
    }
    s
}

#[inline]
fn clamp_weight(w: f32) -> f32 {
    if w.is_finite() {
        w.clamp(0.0, 1.0)
    } else {
        DEFAULT_WEIGHT
    }
}

/// Evaluate a weighted segment at unit time `t`.
///
/// `w0` is the departure weight of the left key and `w1` the arrival weight of
/// the right key, both as fractions of the segment. The control points sit at
/// `(w0, p0 + w0 * m0)` and `(1 - w1, p1 - w1 * m1)`; with both weights at 1/3
/// this reduces exactly to [`hermite`].
#[inline]
pub fn weighted_segment(p0: f32, m0: f32, w0: f32, p1: f32, m1: f32, w1: f32, t: f32) -> f32 {
    let w0 = clamp_weight(w0);
    let w1 = clamp_weight(w1);
    let s = solve_bezier_x(t, w0, 1.0 - w1);
    cubic_bezier(p0, p0 + w0 * m0, p1 - w1 * m1, p1, s)
}

/// Derivative of [`weighted_segment`] with respect to the unit parameter `t`.
///
/// Returns 0 where the x polynomial is flat (vertical tangent in unit space).
#[inline]
pub fn weighted_segment_derivative(
    p0: f32,
    m0: f32,
    w0: f32,
    p1: f32,
    m1: f32,
    w1: f32,
    t: f32,
) -> f32 {
    let w0 = clamp_weight(w0);
    let w1 = clamp_weight(w1);
    let s = solve_bezier_x(t, w0, 1.0 - w1);
    let dx_ds = cubic_bezier_derivative(0.0, w0, 1.0 - w1, 1.0, s);
    let dy_ds = cubic_bezier_derivative(p0, p0 + w0 * m0, p1 - w1 * m1, p1, s);
    if dx_ds.abs() > FLAT_SLOPE {
        dy_ds / dx_ds
    } else {
        0.0
    }
}
