//! Normalized cross-correlation and the running normalizer.

use crate::core::types::Sample;

/// Normalizers below this value are replaced by 1.0 before the square root.
pub const NORM_EPSILON: f64 = 1e-9;

/// Dot product of two equally long windows, accumulated in `f64`.
#[inline]
pub fn dot<S: Sample>(window: &[S], compare: &[S]) -> f64 {
    debug_assert_eq!(window.len(), compare.len());
    window
        .iter()
        .zip(compare)
        .map(|(&a, &b)| a.to_f64() * b.to_f64())
        .sum()
}

/// Sum of squares of a window.
#[inline]
pub fn energy<S: Sample>(samples: &[S]) -> f64 {
    samples
        .iter()
        .map(|&s| {
            let v = s.to_f64();
            v * v
        })
        .sum()
}

/// Scales a raw correlation by the square root of its normalizer.
///
/// A normalizer under [`NORM_EPSILON`] (silence, or a running sum that
/// drifted slightly negative) is floored to 1.0, leaving `corr` unscaled.
#[inline]
pub fn normalize(corr: f64, norm: f64) -> f64 {
    let norm = if norm < NORM_EPSILON { 1.0 } else { norm };
    corr / norm.sqrt()
}

/// Normalized correlation of `window` against `compare`, together with the
/// window's normalizer.
#[inline]
pub fn cross_corr<S: Sample>(window: &[S], compare: &[S]) -> (f64, f64) {
    debug_assert_eq!(window.len(), compare.len());
    let mut corr = 0.0f64;
    let mut norm = 0.0f64;
    for (&a, &b) in window.iter().zip(compare) {
        let va = a.to_f64();
        corr += va * b.to_f64();
        norm += va * va;
    }
    (normalize(corr, norm), norm)
}

/// Sum of squares of a window that moves forward one frame at a time.
///
/// Each [`slide`](Self::slide) removes the frame that left the window and
/// adds the frame that entered it, which turns an O(window) recomputation
/// into an O(channels) update. Only valid while the window advances in
/// strictly increasing single-frame steps from the position it was seeded at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningNorm {
    value: f64,
}

impl RunningNorm {
    /// Seeds the normalizer with a freshly computed value.
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Seeds the normalizer from a full window.
    pub fn from_window<S: Sample>(window: &[S]) -> Self {
        Self::new(energy(window))
    }

    /// Current sum of squares.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Applies one single-frame step of the window.
    #[inline]
    pub fn slide<S: Sample>(&mut self, leaving: &[S], entering: &[S]) {
        self.value -= energy(leaving);
        self.value += energy(entering);
    }

    /// Normalizes a raw correlation against the current value.
    #[inline]
    pub fn normalize(&self, corr: f64) -> f64 {
        normalize(corr, self.value)
    }
}
