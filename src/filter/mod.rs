//! FIR filter evaluation engine.

pub mod evaluate;
pub mod kernel;

pub use evaluate::{evaluate, evaluate_mono, evaluate_multi, evaluate_stereo};
#[cfg(feature = "parallel")]
pub use evaluate::{par_evaluate, par_evaluate_mono, par_evaluate_multi, par_evaluate_stereo};
pub use kernel::FilterKernel;
