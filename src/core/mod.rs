//! Sample types, channel bookkeeping, sliding windows and configuration.

pub mod channels;
pub mod params;
pub mod sliding_window;
pub mod types;

pub use channels::{ChannelCount, ChannelSums, MAX_CHANNELS};
pub use params::{read_config_json, write_config_json, FilterParams, KernelConfig, OverlapParams};
pub use sliding_window::SlidingWindow;
pub use types::*;
