//! Best-overlap search for cross-fade splicing.
//!
//! Scans candidate offsets `0..seek_length` (in frames) of a reference
//! buffer and scores each one by its normalized correlation against a fixed
//! compare window, biased towards the middle of the range:
//!
//! ```text
//! score(0) = (corr(0) + 0.1) * 0.75
//! score(i) = (corr(i) + 0.1) * (1 - 0.25 * t^2),  t = (2i - seek_length) / seek_length
//! ```
//!
//! The highest score wins and ties go to the lower offset. Three strategies
//! are provided: a sequential scan with an incremental normalizer (fastest
//! single-threaded), a sequential scan that recomputes every normalizer,
//! and a rayon map/reduce (feature `parallel`) that also recomputes. The
//! parallel reduction uses [`OverlapCandidate::better`], which returns the
//! same winner for every thread count and reduction order.

use super::correlation::{cross_corr, dot, RunningNorm};
use crate::core::channels::ChannelCount;
use crate::core::sliding_window::SlidingWindow;
use crate::core::types::Sample;
use crate::error::KernelError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Offset added to every correlation before weighting.
const SCORE_BIAS: f64 = 0.1;
/// Fixed weight of the offset-0 baseline.
const BASELINE_WEIGHT: f64 = 0.75;
/// Weight lost at the edges of the search range.
const EDGE_PENALTY: f64 = 0.25;

/// Score of offset 0.
#[inline]
pub fn baseline_score(corr: f64) -> f64 {
    (corr + SCORE_BIAS) * BASELINE_WEIGHT
}

/// Score of offset `offset >= 1`, favouring offsets near the middle of the
/// range.
#[inline]
pub fn weighted_score(corr: f64, offset: usize, seek_length: usize) -> f64 {
    let t = (2.0 * offset as f64 - seek_length as f64) / seek_length as f64;
    (corr + SCORE_BIAS) * (1.0 - EDGE_PENALTY * t * t)
}

/// A scored candidate offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapCandidate {
    /// Offset in frames from the start of the reference buffer.
    pub offset: usize,
    /// Weighted correlation score. Never NaN.
    pub score: f64,
}

impl OverlapCandidate {
    /// Creates a candidate. A NaN score becomes negative infinity so it can
    /// never be selected.
    #[inline]
    pub fn new(offset: usize, score: f64) -> Self {
        let score = if score.is_nan() {
            f64::NEG_INFINITY
        } else {
            score
        };
        Self { offset, score }
    }

    /// The offset-0 candidate for a normalized correlation.
    #[inline]
    pub fn baseline(corr: f64) -> Self {
        Self::new(0, baseline_score(corr))
    }

    /// Candidate for `offset`, scored with the general formula (offset 0 uses
    /// the baseline weight instead).
    #[inline]
    pub fn scored(offset: usize, seek_length: usize, corr: f64) -> Self {
        if offset == 0 {
            return Self::baseline(corr);
        }
        Self::new(offset, weighted_score(corr, offset, seek_length))
    }

    /// Picks the preferred of two candidates: higher score, then lower offset.
    ///
    /// Associative, commutative and idempotent, so a reduction over any
    /// partition of the candidates agrees with an in-order scan that only
    /// replaces its best on strict improvement.
    #[inline]
    pub fn better(self, other: Self) -> Self {
        if other.score > self.score || (other.score == self.score && other.offset < self.offset) {
            other
        } else {
            self
        }
    }
}

/// Checks buffer lengths and returns the compare window and a sliding
/// window over the reference.
fn prepare<'a, S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &'a [S],
    reference: &'a [S],
) -> (&'a [S], SlidingWindow<'a, S>) {
    let ch = channels.get();
    let window_len = ch * overlap_length;
    assert!(
        compare.len() >= window_len,
        "compare buffer holds {} samples, {} required",
        compare.len(),
        window_len
    );
    let required = ch * seek_length.saturating_sub(1) + window_len;
    assert!(
        reference.len() >= required,
        "reference buffer holds {} samples, {} required",
        reference.len(),
        required
    );
    let Some(window) = SlidingWindow::new(&reference[..required], ch, overlap_length) else {
        unreachable!("reference length checked above");
    };
    (&compare[..window_len], window)
}

/// Sequential scan using the incremental normalizer.
fn scan_incremental<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> OverlapCandidate {
    let (compare, mut window) = prepare(channels, overlap_length, seek_length, compare, reference);

    let (corr, norm) = cross_corr(window.current(), compare);
    let mut norm = RunningNorm::new(norm);
    let mut best = OverlapCandidate::baseline(corr);

    for offset in 1..seek_length {
        let advanced = window.advance();
        debug_assert!(advanced);
        if let Some(leaving) = window.leaving() {
            norm.slide(leaving, window.entering());
        }
        let corr = norm.normalize(dot(window.current(), compare));
        let candidate = OverlapCandidate::scored(offset, seek_length, corr);
        if candidate.score > best.score {
            best = candidate;
        }
    }
    best
}

/// Sequential scan recomputing each normalizer from scratch.
fn scan_fresh<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> OverlapCandidate {
    let (compare, mut window) = prepare(channels, overlap_length, seek_length, compare, reference);

    let mut best = OverlapCandidate::baseline(cross_corr(window.current(), compare).0);
    for offset in 1..seek_length {
        let advanced = window.advance();
        debug_assert!(advanced);
        let (corr, _) = cross_corr(window.current(), compare);
        let candidate = OverlapCandidate::scored(offset, seek_length, corr);
        if candidate.score > best.score {
            best = candidate;
        }
    }
    best
}

/// Parallel map over offsets reduced with [`OverlapCandidate::better`].
#[cfg(feature = "parallel")]
fn scan_parallel<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> OverlapCandidate {
    let (compare, window) = prepare(channels, overlap_length, seek_length, compare, reference);
    let ch = channels.get();
    let window_len = window.len();

    let baseline = OverlapCandidate::baseline(cross_corr(window.current(), compare).0);
    (1..seek_length)
        .into_par_iter()
        .map(|offset| {
            let start = offset * ch;
            let (corr, _) = cross_corr(&reference[start..start + window_len], compare);
            OverlapCandidate::scored(offset, seek_length, corr)
        })
        .reduce(|| baseline, OverlapCandidate::better)
}

/// Finds the best overlap offset with a sequential scan.
///
/// `compare` must hold at least `channels * overlap_length` samples and
/// `reference` at least `channels * (seek_length - 1 + overlap_length)`.
/// A `seek_length` of 0 or 1 evaluates only offset 0.
///
/// # Panics
/// Panics if either buffer is too short.
pub fn seek_best_overlap<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> usize {
    scan_incremental(channels, overlap_length, seek_length, compare, reference).offset
}

/// Like [`seek_best_overlap`] but recomputes every normalizer instead of
/// updating it incrementally.
pub fn seek_best_overlap_fresh<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> usize {
    scan_fresh(channels, overlap_length, seek_length, compare, reference).offset
}

/// Finds the best overlap offset with a parallel map/reduce.
///
/// Scores match [`seek_best_overlap_fresh`] exactly, so both return the same
/// offset regardless of the rayon thread count.
#[cfg(feature = "parallel")]
pub fn par_seek_best_overlap<S: Sample>(
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
    compare: &[S],
    reference: &[S],
) -> usize {
    scan_parallel(channels, overlap_length, seek_length, compare, reference).offset
}

/// Validated search geometry: channel count, overlap length and seek length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapSearch {
    channels: ChannelCount,
    overlap_length: usize,
    seek_length: usize,
}

impl OverlapSearch {
    /// Creates a search over `seek_length` offsets with an
    /// `overlap_length`-frame correlation window.
    ///
    /// # Errors
    /// Returns `KernelError::InvalidOverlapLength` or
    /// `KernelError::InvalidSeekLength` for zero lengths.
    pub fn new(
        channels: ChannelCount,
        overlap_length: usize,
        seek_length: usize,
    ) -> Result<Self, KernelError> {
        if overlap_length == 0 {
            return Err(KernelError::InvalidOverlapLength(overlap_length));
        }
        if seek_length == 0 {
            return Err(KernelError::InvalidSeekLength(seek_length));
        }
        Ok(Self {
            channels,
            overlap_length,
            seek_length,
        })
    }

    /// Interleaved channel count.
    #[inline]
    pub fn channels(&self) -> ChannelCount {
        self.channels
    }

    /// Correlation window length in frames.
    #[inline]
    pub fn overlap_length(&self) -> usize {
        self.overlap_length
    }

    /// Number of candidate offsets.
    #[inline]
    pub fn seek_length(&self) -> usize {
        self.seek_length
    }

    /// Samples needed in the compare buffer.
    #[inline]
    pub fn compare_len(&self) -> usize {
        self.channels.get() * self.overlap_length
    }

    /// Samples needed in the reference buffer.
    #[inline]
    pub fn reference_len(&self) -> usize {
        self.channels.get() * (self.seek_length - 1) + self.compare_len()
    }

    /// Sequential search with the incremental normalizer.
    pub fn seek<S: Sample>(&self, compare: &[S], reference: &[S]) -> OverlapCandidate {
        let best = scan_incremental(
            self.channels,
            self.overlap_length,
            self.seek_length,
            compare,
            reference,
        );
        log::trace!(
            "overlap search: offset {} of {} (score {:.6})",
            best.offset,
            self.seek_length,
            best.score
        );
        best
    }

    /// Sequential search recomputing every normalizer.
    pub fn seek_fresh<S: Sample>(&self, compare: &[S], reference: &[S]) -> OverlapCandidate {
        scan_fresh(
            self.channels,
            self.overlap_length,
            self.seek_length,
            compare,
            reference,
        )
    }

    /// Parallel search.
    #[cfg(feature = "parallel")]
    pub fn par_seek<S: Sample>(&self, compare: &[S], reference: &[S]) -> OverlapCandidate {
        let best = scan_parallel(
            self.channels,
            self.overlap_length,
            self.seek_length,
            compare,
            reference,
        );
        log::trace!(
            "overlap search (parallel): offset {} of {} (score {:.6})",
            best.offset,
            self.seek_length,
            best.score
        );
        best
    }
}
