//! Error types for the kernel crate.

use std::fmt;

/// Errors raised while building kernels or loading their configuration.
///
/// The kernels themselves never fail: every value that reaches them has
/// already been validated by one of the constructors that return this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Filter length must be non-zero and a multiple of 4.
    InvalidFilterLength(usize),
    /// Channel count must be between 1 and 15.
    InvalidChannels(u16),
    /// Divider or shift factor cannot produce an output scale.
    InvalidScaling(String),
    /// Overlap length must be at least one frame.
    InvalidOverlapLength(usize),
    /// Seek length must cover at least one candidate offset.
    InvalidSeekLength(usize),
    /// Malformed configuration data.
    InvalidFormat(String),
    /// I/O error.
    IoError(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidFilterLength(len) => {
                write!(
                    f,
                    "invalid filter length: {len}. Must be a non-zero multiple of 4."
                )
            }
            KernelError::InvalidChannels(c) => {
                write!(f, "invalid channel count: {c}. Must be between 1 and 15.")
            }
            KernelError::InvalidScaling(msg) => write!(f, "invalid output scaling: {msg}"),
            KernelError::InvalidOverlapLength(len) => {
                write!(f, "invalid overlap length: {len}. Must be at least 1.")
            }
            KernelError::InvalidSeekLength(len) => {
                write!(f, "invalid seek length: {len}. Must be at least 1.")
            }
            KernelError::InvalidFormat(msg) => write!(f, "invalid format: {msg}"),
            KernelError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for KernelError {}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        KernelError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            KernelError::InvalidFilterLength(6).to_string(),
            "invalid filter length: 6. Must be a non-zero multiple of 4."
        );
        assert_eq!(
            KernelError::InvalidChannels(16).to_string(),
            "invalid channel count: 16. Must be between 1 and 15."
        );
    }

    #[test]
    fn test_from_io_error() {
        let err: KernelError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, KernelError::IoError(ref msg) if msg.contains("missing")));
    }
}
