#![allow(dead_code)]

use std::f32::consts::PI;

/// Deterministic white noise in `[-amp, amp)` from a 32-bit LCG.
pub fn gen_noise(n: usize, seed: u32, amp: f32) -> Vec<f32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let unit = (state >> 8) as f32 / (1u32 << 24) as f32;
            amp * (2.0 * unit - 1.0)
        })
        .collect()
}

/// Deterministic 16-bit noise covering `[-amp, amp]`.
pub fn gen_noise_i16(n: usize, seed: u32, amp: i16) -> Vec<i16> {
    gen_noise(n, seed, 1.0)
        .into_iter()
        .map(|s| (s * amp as f32).round() as i16)
        .collect()
}

pub fn gen_sine(freq_hz: f32, sr: u32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amp * (2.0 * PI * freq_hz * i as f32 / sr as f32).sin())
        .collect()
}

/// Interleaves per-channel vectors of equal length.
pub fn interleave<T: Copy>(channels: &[Vec<T>]) -> Vec<T> {
    let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..frames)
        .flat_map(|i| channels.iter().map(move |ch| ch[i]))
        .collect()
}

/// Extracts one channel from an interleaved buffer.
pub fn channel<T: Copy>(data: &[T], num_channels: usize, ch: usize) -> Vec<T> {
    data.iter().skip(ch).step_by(num_channels).copied().collect()
}

/// Pads coefficients with zeros up to the next multiple of 4.
pub fn pad_taps<T: Copy + Default>(taps: &[T]) -> Vec<T> {
    let mut out = taps.to_vec();
    while out.is_empty() || out.len() % 4 != 0 {
        out.push(T::default());
    }
    out
}
