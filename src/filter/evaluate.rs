//! FIR evaluation over interleaved sample buffers.
//!
//! Every output frame `j` is the dot product of the `length` input frames
//! starting at frame `j` with the kernel taps, computed per channel. Taps are
//! consumed four at a time and every variant sums them in the same order,
//! so the generic N-channel path is bit-identical to the mono and stereo
//! paths for one and two channels.
//!
//! Output frames are independent of each other. The `par_*` variants
//! (feature `parallel`) hand disjoint output chunks to rayon and produce
//! exactly the same samples as their sequential counterparts.

use super::kernel::FilterKernel;
use crate::core::channels::{ChannelCount, ChannelSums};
use crate::core::types::Sample;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of output frames for `num_samples` input frames.
#[inline]
fn output_frames(num_samples: usize, length: usize) -> usize {
    num_samples.saturating_sub(length)
}

/// Returns the part of `dest` that receives `frames` output frames.
#[inline]
fn output_region<S>(dest: &mut [S], frames: usize, channels: usize) -> &mut [S] {
    let needed = frames * channels;
    assert!(
        dest.len() >= needed,
        "destination holds {} samples, {} required",
        dest.len(),
        needed
    );
    &mut dest[..needed]
}

/// Filters one mono frame; `window` holds `length` samples.
#[inline]
fn mono_frame<S: Sample>(kernel: &FilterKernel<S>, window: &[S]) -> S {
    let mut sum: S::Accum = Default::default();
    for (x, c) in window.chunks_exact(4).zip(kernel.coeffs().chunks_exact(4)) {
        sum += x[0].product(c[0]) + x[1].product(c[1]) + x[2].product(c[2]) + x[3].product(c[3]);
    }
    kernel.finish(sum)
}

/// Filters one stereo frame; `window` holds `2 * length` samples.
#[inline]
fn stereo_frame<S: Sample>(kernel: &FilterKernel<S>, window: &[S], out: &mut [S]) {
    let mut suml: S::Accum = Default::default();
    let mut sumr: S::Accum = Default::default();
    for (x, c) in window.chunks_exact(8).zip(kernel.coeffs().chunks_exact(4)) {
        suml += x[0].product(c[0]) + x[2].product(c[1]) + x[4].product(c[2]) + x[6].product(c[3]);
        sumr += x[1].product(c[0]) + x[3].product(c[1]) + x[5].product(c[2]) + x[7].product(c[3]);
    }
    out[0] = kernel.finish(suml);
    out[1] = kernel.finish(sumr);
}

/// Filters one frame of any channel count; `window` holds
/// `channels * length` samples.
#[inline]
fn multi_frame<S: Sample>(
    kernel: &FilterKernel<S>,
    channels: ChannelCount,
    window: &[S],
    out: &mut [S],
) {
    let ch = channels.get();
    let mut sums = ChannelSums::<S::Accum>::new(channels);
    for (x, c) in window.chunks_exact(4 * ch).zip(kernel.coeffs().chunks_exact(4)) {
        for k in 0..ch {
            sums[k] += x[k].product(c[0])
                + x[ch + k].product(c[1])
                + x[2 * ch + k].product(c[2])
                + x[3 * ch + k].product(c[3]);
        }
    }
    for (o, &sum) in out.iter_mut().zip(sums.iter()) {
        *o = kernel.finish(sum);
    }
}

/// Filters a mono buffer.
///
/// Writes `src.len() - kernel.len()` samples to `dest` and returns that
/// count. Returns 0 without touching `dest` when `src` is not longer than
/// the kernel.
///
/// # Panics
/// Panics if `dest` is shorter than the number of output samples.
pub fn evaluate_mono<S: Sample>(kernel: &FilterKernel<S>, dest: &mut [S], src: &[S]) -> usize {
    let len = kernel.len();
    let end = output_frames(src.len(), len);
    if end == 0 {
        return 0;
    }
    for (j, out) in output_region(dest, end, 1).iter_mut().enumerate() {
        *out = mono_frame(kernel, &src[j..j + len]);
    }
    end
}

/// Filters an interleaved stereo buffer.
///
/// `src` holds `src.len() / 2` frames. Returns the number of output frames
/// written, `frames - kernel.len()`, or 0 without touching `dest`.
///
/// # Panics
/// Panics if `dest` cannot hold the output frames.
pub fn evaluate_stereo<S: Sample>(kernel: &FilterKernel<S>, dest: &mut [S], src: &[S]) -> usize {
    let len = kernel.len();
    let end = output_frames(src.len() / 2, len);
    if end == 0 {
        return 0;
    }
    for (j, out) in output_region(dest, end, 2).chunks_exact_mut(2).enumerate() {
        stereo_frame(kernel, &src[2 * j..2 * (j + len)], out);
    }
    end
}

/// Filters an interleaved buffer with any supported channel count.
///
/// `src` holds `src.len() / channels` frames. Returns the number of output
/// frames written, `frames - kernel.len()`, or 0 without touching `dest`.
///
/// # Panics
/// Panics if `dest` cannot hold the output frames.
pub fn evaluate_multi<S: Sample>(
    kernel: &FilterKernel<S>,
    channels: ChannelCount,
    dest: &mut [S],
    src: &[S],
) -> usize {
    let ch = channels.get();
    let len = kernel.len();
    let end = output_frames(src.len() / ch, len);
    if end == 0 {
        return 0;
    }
    for (j, out) in output_region(dest, end, ch).chunks_exact_mut(ch).enumerate() {
        multi_frame(kernel, channels, &src[ch * j..ch * (j + len)], out);
    }
    end
}

/// Filters an interleaved buffer, picking the mono or stereo fast path when
/// the channel count allows it.
pub fn evaluate<S: Sample>(
    kernel: &FilterKernel<S>,
    channels: ChannelCount,
    dest: &mut [S],
    src: &[S],
) -> usize {
    log::trace!(
        "fir: {} samples, {} channels, {} taps",
        src.len(),
        channels.get(),
        kernel.len()
    );
    match channels.get() {
        1 => evaluate_mono(kernel, dest, src),
        2 => evaluate_stereo(kernel, dest, src),
        _ => evaluate_multi(kernel, channels, dest, src),
    }
}

/// Parallel [`evaluate_mono`].
#[cfg(feature = "parallel")]
pub fn par_evaluate_mono<S: Sample>(kernel: &FilterKernel<S>, dest: &mut [S], src: &[S]) -> usize {
    let len = kernel.len();
    let end = output_frames(src.len(), len);
    if end == 0 {
        return 0;
    }
    output_region(dest, end, 1)
        .par_iter_mut()
        .enumerate()
        .for_each(|(j, out)| *out = mono_frame(kernel, &src[j..j + len]));
    end
}

/// Parallel [`evaluate_stereo`].
#[cfg(feature = "parallel")]
pub fn par_evaluate_stereo<S: Sample>(
    kernel: &FilterKernel<S>,
    dest: &mut [S],
    src: &[S],
) -> usize {
    let len = kernel.len();
    let end = output_frames(src.len() / 2, len);
    if end == 0 {
        return 0;
    }
    output_region(dest, end, 2)
        .par_chunks_exact_mut(2)
        .enumerate()
        .for_each(|(j, out)| stereo_frame(kernel, &src[2 * j..2 * (j + len)], out));
    end
}

/// Parallel [`evaluate_multi`].
#[cfg(feature = "parallel")]
pub fn par_evaluate_multi<S: Sample>(
    kernel: &FilterKernel<S>,
    channels: ChannelCount,
    dest: &mut [S],
    src: &[S],
) -> usize {
    let ch = channels.get();
    let len = kernel.len();
    let end = output_frames(src.len() / ch, len);
    if end == 0 {
        return 0;
    }
    output_region(dest, end, ch)
        .par_chunks_exact_mut(ch)
        .enumerate()
        .for_each(|(j, out)| multi_frame(kernel, channels, &src[ch * j..ch * (j + len)], out));
    end
}

/// Parallel [`evaluate`].
#[cfg(feature = "parallel")]
pub fn par_evaluate<S: Sample>(
    kernel: &FilterKernel<S>,
    channels: ChannelCount,
    dest: &mut [S],
    src: &[S],
) -> usize {
    log::trace!(
        "fir (parallel): {} samples, {} channels, {} taps",
        src.len(),
        channels.get(),
        kernel.len()
    );
    match channels.get() {
        1 => par_evaluate_mono(kernel, dest, src),
        2 => par_evaluate_stereo(kernel, dest, src),
        _ => par_evaluate_multi(kernel, channels, dest, src),
    }
}
