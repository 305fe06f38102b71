#![forbid(unsafe_code)]
//! Numeric kernels for time-domain audio time stretching.
//!
//! `timestretch_kernels` holds the two hot loops of an overlap-add
//! stretcher:
//!
//! - **FIR evaluation** ([`filter`]): convolves interleaved mono, stereo or
//!   N-channel (up to 15) buffers with a coefficient kernel, in 16-bit fixed
//!   point with saturation or in `f32` with `f64` accumulation.
//! - **Overlap search** ([`overlap`]): finds the offset inside a seek range
//!   where a reference buffer best matches a compare window, using a
//!   normalized cross-correlation weighted towards the middle of the range.
//!
//! Both are pure functions over caller-owned slices. With the default
//! `parallel` feature each has a rayon-backed variant that returns exactly
//! what the sequential version returns.
//!
//! # Filtering
//!
//! ```
//! use timestretch_kernels::{evaluate, ChannelCount, FilterKernel};
//!
//! // 4-tap moving average on a stereo buffer.
//! let kernel = FilterKernel::new(vec![1.0f32; 4], 4.0, 0).unwrap();
//! let src: Vec<f32> = (0..32).map(|i| (i as f32 * 0.1).sin()).collect();
//! let mut dest = vec![0.0f32; src.len()];
//!
//! let frames = evaluate(&kernel, ChannelCount::STEREO, &mut dest, &src);
//! assert_eq!(frames, 16 - 4);
//! ```
//!
//! # Overlap search
//!
//! ```
//! use timestretch_kernels::{ChannelCount, OverlapSearch};
//!
//! let search = OverlapSearch::new(ChannelCount::MONO, 32, 64).unwrap();
//! let reference: Vec<f32> = (0..search.reference_len())
//!     .map(|i| (i as f32 * 0.05).sin())
//!     .collect();
//! let compare = reference[20..52].to_vec();
//!
//! let best = search.seek(&compare, &reference);
//! assert!(best.offset < search.seek_length());
//! ```

pub mod core;
pub mod error;
pub mod filter;
pub mod overlap;

pub use crate::core::channels::{ChannelCount, ChannelSums, MAX_CHANNELS};
pub use crate::core::params::{
    read_config_json, write_config_json, FilterParams, KernelConfig, OverlapParams,
};
pub use crate::core::sliding_window::SlidingWindow;
pub use crate::core::types::{LongSampleType, Sample, SampleType};
pub use error::KernelError;
pub use filter::{evaluate, evaluate_mono, evaluate_multi, evaluate_stereo, FilterKernel};
#[cfg(feature = "parallel")]
pub use filter::{par_evaluate, par_evaluate_mono, par_evaluate_multi, par_evaluate_stereo};
#[cfg(feature = "parallel")]
pub use overlap::par_seek_best_overlap;
pub use overlap::{
    seek_best_overlap, seek_best_overlap_fresh, OverlapCandidate, OverlapSearch, RunningNorm,
};
