//! Serializable kernel configuration.
//!
//! The stretch controller that drives the kernels usually derives filter
//! taps and search geometry from its own settings; these types let it hand
//! them over (or persist them) as plain data, then validate them into
//! [`FilterKernel`] and [`OverlapSearch`] values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::channels::ChannelCount;
use crate::core::types::{Sample, SampleType};
use crate::error::KernelError;
use crate::filter::kernel::FilterKernel;
use crate::overlap::search::OverlapSearch;

/// FIR taps and output normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams<S = SampleType> {
    /// Filter taps; the count must be a non-zero multiple of 4.
    pub coefficients: Vec<S>,
    /// Result divider (floating-point mode).
    pub divider: S,
    /// Result right-shift (fixed-point mode).
    #[serde(default)]
    pub shift_factor: u32,
}

impl<S: Sample> FilterParams<S> {
    /// Parameters with the given taps and divider and no shift.
    pub fn new(coefficients: Vec<S>, divider: S) -> Self {
        Self {
            coefficients,
            divider,
            shift_factor: 0,
        }
    }

    /// Set the fixed-point shift factor.
    pub fn with_shift_factor(mut self, shift_factor: u32) -> Self {
        self.shift_factor = shift_factor;
        self
    }

    /// Validates the parameters into a filter kernel.
    pub fn kernel(&self) -> Result<FilterKernel<S>, KernelError> {
        match FilterKernel::new(self.coefficients.clone(), self.divider, self.shift_factor) {
            Ok(kernel) => {
                log::debug!(
                    "filter kernel: {} taps, divider {:?}, shift {}",
                    kernel.len(),
                    self.divider,
                    self.shift_factor
                );
                Ok(kernel)
            }
            Err(e) => {
                log::warn!("rejected filter parameters: {}", e);
                Err(e)
            }
        }
    }
}

/// Overlap search geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapParams {
    /// Number of interleaved channels (1 to 15, default: 2).
    pub channels: u16,
    /// Correlation window length in frames (default: 256).
    pub overlap_length: usize,
    /// Number of candidate offsets (default: 512).
    pub seek_length: usize,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            channels: 2,
            overlap_length: 256,
            seek_length: 512,
        }
    }
}

impl OverlapParams {
    /// Default geometry for the given channel count.
    pub fn new(channels: u16) -> Self {
        Self {
            channels,
            ..Self::default()
        }
    }

    /// Set the correlation window length in frames.
    pub fn with_overlap_length(mut self, overlap_length: usize) -> Self {
        self.overlap_length = overlap_length;
        self
    }

    /// Set the number of candidate offsets.
    pub fn with_seek_length(mut self, seek_length: usize) -> Self {
        self.seek_length = seek_length;
        self
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), KernelError> {
        self.search().map(|_| ())
    }

    /// Validates the parameters into a search.
    pub fn search(&self) -> Result<OverlapSearch, KernelError> {
        let result = ChannelCount::new(self.channels)
            .and_then(|channels| OverlapSearch::new(channels, self.overlap_length, self.seek_length));
        match &result {
            Ok(_) => log::debug!(
                "overlap search: {} channels, overlap {} frames, seek {} frames",
                self.channels,
                self.overlap_length,
                self.seek_length
            ),
            Err(e) => log::warn!("rejected overlap parameters: {}", e),
        }
        result
    }
}

/// Complete configuration for both kernels. Either section may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig<S = SampleType> {
    /// FIR section; `None` when the file has no `filter` entry.
    pub filter: Option<FilterParams<S>>,
    /// Overlap search section.
    pub overlap: Option<OverlapParams>,
}

impl<S> Default for KernelConfig<S> {
    fn default() -> Self {
        Self {
            filter: None,
            overlap: None,
        }
    }
}

/// Writes a kernel configuration as JSON.
pub fn write_config_json<S>(path: &Path, config: &KernelConfig<S>) -> Result<(), KernelError>
where
    S: Serialize,
{
    let json = serde_json::to_string_pretty(config).map_err(|e| {
        KernelError::InvalidFormat(format!("failed to serialize kernel config: {}", e))
    })?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Reads a kernel configuration from JSON.
pub fn read_config_json<S>(path: &Path) -> Result<KernelConfig<S>, KernelError>
where
    S: for<'de> Deserialize<'de>,
{
    let data = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&data).map_err(|e| {
        KernelError::InvalidFormat(format!(
            "failed to parse kernel config from {}: {}",
            path.display(),
            e
        ))
    })?;
    log::debug!("loaded kernel config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_params_defaults() {
        let params = OverlapParams::default();
        assert_eq!(params.channels, 2);
        assert_eq!(params.overlap_length, 256);
        assert_eq!(params.seek_length, 512);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_overlap_params_builder() {
        let search = OverlapParams::new(6)
            .with_overlap_length(64)
            .with_seek_length(100)
            .search()
            .unwrap();
        assert_eq!(search.channels().get(), 6);
        assert_eq!(search.overlap_length(), 64);
        assert_eq!(search.seek_length(), 100);
    }

    #[test]
    fn test_overlap_params_rejects_invalid() {
        assert_eq!(
            OverlapParams::new(16).validate(),
            Err(KernelError::InvalidChannels(16))
        );
        assert_eq!(
            OverlapParams::new(1).with_seek_length(0).validate(),
            Err(KernelError::InvalidSeekLength(0))
        );
    }

    #[test]
    fn test_filter_params_kernel() {
        let params = FilterParams::<i16>::new(vec![1, 2, 3, 4], 0).with_shift_factor(2);
        let kernel = params.kernel().unwrap();
        assert_eq!(kernel.coeffs(), &[1i16, 2, 3, 4]);
        assert_eq!(kernel.shift_factor(), 2);

        let bad = FilterParams::<f32>::new(vec![1.0; 3], 1.0);
        assert_eq!(bad.kernel(), Err(KernelError::InvalidFilterLength(3)));
    }

    #[test]
    fn test_shift_factor_defaults_when_missing() {
        let json = r#"{ "filter": { "coefficients": [0.5, 0.5, 0.5, 0.5], "divider": 2.0 } }"#;
        let config: KernelConfig<f32> = serde_json::from_str(json).unwrap();
        let filter = config.filter.unwrap();
        assert_eq!(filter.shift_factor, 0);
        assert!(config.overlap.is_none());
    }
}
