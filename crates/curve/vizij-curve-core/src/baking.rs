//! Baking: snapshot a keyframe list into an immutable, shareable curve.
//!
//! Lifetime model:
//! - [`bake`] copies the source keys into one exact-size allocation.
//! - Readers take a [`CurveView`] (a `Copy` borrow) and may evaluate from any
//!   number of threads without synchronization.
//! - [`BakedCurve::release`] consumes the curve. Because every view borrows the
//!   curve, release cannot compile while a view is still alive; scoped workers
//!   (`rayon::scope`, `std::thread::scope`) must finish first.

use serde::{Deserialize, Serialize};

use crate::keyframe::Keyframe;
use crate::sampling;

/// Immutable keyframe buffer produced by [`bake`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BakedCurve {
    keys: Box<[Keyframe]>,
}

/// Read-only handle handed to evaluators. Cheap to copy into worker closures.
#[derive(Copy, Clone, Debug)]
pub struct CurveView<'a> {
    keys: &'a [Keyframe],
}

/// Copy `source` into a new [`BakedCurve`].
///
/// Does not sort or validate: out-of-order or duplicate times are handled as
/// degenerate segments at evaluation time. Later edits to `source` are never
/// observed by the returned curve.
pub fn bake(source: &[Keyframe]) -> BakedCurve {
    let keys: Box<[Keyframe]> = source.into();
    debug_assert_eq!(keys.len(), source.len());
    log::debug!("baked curve with {} keyframes", keys.len());
    BakedCurve { keys }
}

impl BakedCurve {
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn view(&self) -> CurveView<'_> {
        CurveView { keys: &self.keys }
    }

    /// `(first.time, last.time)`, or `None` for an empty curve.
    pub fn time_range(&self) -> Option<(f32, f32)> {
        self.view().time_range()
    }

    #[inline]
    pub fn evaluate(&self, time: f32) -> f32 {
        sampling::evaluate(self.view(), time)
    }

    #[inline]
    pub fn evaluate_with_derivative(&self, time: f32) -> (f32, f32) {
        sampling::evaluate_with_derivative(self.view(), time)
    }

    /// Explicitly release the backing buffer.
    pub fn release(self) {
        log::debug!("released baked curve with {} keyframes", self.keys.len());
    }
}

impl From<&[Keyframe]> for BakedCurve {
    fn from(keys: &[Keyframe]) -> Self {
        bake(keys)
    }
}

impl<'a> CurveView<'a> {
    #[inline]
    pub fn keys(&self) -> &'a [Keyframe] {
        self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn time_range(&self) -> Option<(f32, f32)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }

    #[inline]
    pub fn evaluate(&self, time: f32) -> f32 {
        sampling::evaluate(*self, time)
    }
}
