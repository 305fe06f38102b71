//! Validated FIR coefficient tables.

use crate::core::types::Sample;
use crate::error::KernelError;

/// FIR coefficients together with their output normalization.
///
/// The tap count is a non-zero multiple of 4 so the evaluation loops can
/// consume taps in groups of four without a remainder. The output scale
/// (shift factor in fixed-point mode, reciprocal of the divider in floating
/// mode) is computed once here instead of once per output sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel<S: Sample> {
    coeffs: Vec<S>,
    divider: S,
    shift_factor: u32,
    scale: S::Scale,
}

impl<S: Sample> FilterKernel<S> {
    /// Builds a kernel from its taps and normalization constants.
    ///
    /// # Errors
    /// Returns `KernelError::InvalidFilterLength` if `coeffs` is empty or its
    /// length is not a multiple of 4, and `KernelError::InvalidScaling` if the
    /// divider/shift pair cannot scale an output sum.
    pub fn new(coeffs: Vec<S>, divider: S, shift_factor: u32) -> Result<Self, KernelError> {
        if coeffs.is_empty() || coeffs.len() % 4 != 0 {
            return Err(KernelError::InvalidFilterLength(coeffs.len()));
        }
        let scale = S::output_scale(divider, shift_factor).ok_or_else(|| {
            KernelError::InvalidScaling(format!(
                "divider {:?} with shift factor {}",
                divider, shift_factor
            ))
        })?;
        Ok(Self {
            coeffs,
            divider,
            shift_factor,
            scale,
        })
    }

    /// Number of taps.
    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always false: construction rejects empty tap tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Filter taps.
    #[inline]
    pub fn coeffs(&self) -> &[S] {
        &self.coeffs
    }

    /// Result divider used in floating-point mode.
    #[inline]
    pub fn divider(&self) -> S {
        self.divider
    }

    /// Result right-shift used in fixed-point mode.
    #[inline]
    pub fn shift_factor(&self) -> u32 {
        self.shift_factor
    }

    /// Precomputed output scale.
    #[inline]
    pub fn scale(&self) -> S::Scale {
        self.scale
    }

    /// Scales an accumulated sum into an output sample.
    #[inline]
    pub(crate) fn finish(&self, sum: S::Accum) -> S {
        S::finish(sum, self.scale)
    }
}
