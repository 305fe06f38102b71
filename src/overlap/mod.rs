//! Overlap correlation search engine.

pub mod correlation;
pub mod search;

pub use correlation::{cross_corr, dot, energy, normalize, RunningNorm, NORM_EPSILON};
#[cfg(feature = "parallel")]
pub use search::par_seek_best_overlap;
pub use search::{
    baseline_score, seek_best_overlap, seek_best_overlap_fresh, weighted_score, OverlapCandidate,
    OverlapSearch,
};
