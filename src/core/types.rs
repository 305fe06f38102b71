//! Sample representations shared by both kernels.
//!
//! The kernels are generic over [`Sample`], which captures the two numeric
//! modes a stretch engine can be built with:
//!
//! | sample | accumulator | output scaling |
//! |--------|-------------|----------------|
//! | `i16`  | `i64`       | arithmetic right shift, saturated to 16 bits |
//! | `f32`  | `f64`       | multiply by the reciprocal of the divider |
//!
//! [`SampleType`] picks one of them at build time through the
//! `integer-samples` cargo feature.

use std::fmt::Debug;
use std::ops::{Add, AddAssign};

/// Build-time sample type: 16-bit fixed point.
#[cfg(feature = "integer-samples")]
pub type SampleType = i16;

/// Build-time sample type: 32-bit float.
#[cfg(not(feature = "integer-samples"))]
pub type SampleType = f32;

/// Accumulator type paired with [`SampleType`].
pub type LongSampleType = <SampleType as Sample>::Accum;

/// A sample format the filter and search kernels can operate on.
pub trait Sample: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Widened type used to sum products without overflow or precision loss.
    type Accum: Copy + Default + PartialEq + Debug + Add<Output = Self::Accum> + AddAssign + Send + Sync;

    /// Precomputed output scaling applied to every accumulated sum.
    type Scale: Copy + Debug + PartialEq + Send + Sync;

    /// Multiplies a sample by a coefficient in the accumulator domain.
    fn product(self, coeff: Self) -> Self::Accum;

    /// Builds the output scale from a divider and a shift factor.
    ///
    /// Returns `None` when the pair cannot scale a sum (zero divider in
    /// floating mode, shift wider than the sample range in fixed mode).
    fn output_scale(divider: Self, shift_factor: u32) -> Option<Self::Scale>;

    /// Scales an accumulated sum back into a sample.
    fn finish(sum: Self::Accum, scale: Self::Scale) -> Self;

    /// Lossless widening used by the correlation arithmetic.
    fn to_f64(self) -> f64;
}

/// Largest shift factor accepted in fixed-point mode.
pub const MAX_SHIFT_FACTOR: u32 = 31;

/// Clamps a widened sum to the signed 16-bit range.
#[inline]
pub fn saturate_i16(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

impl Sample for i16 {
    type Accum = i64;
    type Scale = u32;

    #[inline]
    fn product(self, coeff: Self) -> i64 {
        self as i64 * coeff as i64
    }

    /// Fixed-point mode ignores the divider; the shift factor does the scaling.
    fn output_scale(_divider: Self, shift_factor: u32) -> Option<u32> {
        (shift_factor <= MAX_SHIFT_FACTOR).then_some(shift_factor)
    }

    #[inline]
    fn finish(sum: i64, shift: u32) -> i16 {
        saturate_i16(sum >> shift)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f32 {
    type Accum = f64;
    type Scale = f64;

    #[inline]
    fn product(self, coeff: Self) -> f64 {
        self as f64 * coeff as f64
    }

    /// Floating mode ignores the shift factor and multiplies by `1 / divider`.
    fn output_scale(divider: Self, _shift_factor: u32) -> Option<f64> {
        if divider == 0.0 || !divider.is_finite() {
            return None;
        }
        Some(1.0 / divider as f64)
    }

    #[inline]
    fn finish(sum: f64, scale: f64) -> f32 {
        (sum * scale) as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}
