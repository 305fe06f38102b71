//! Checked channel counts and fixed-capacity per-channel accumulators.

use std::ops::{Index, IndexMut};

use crate::error::KernelError;

/// Capacity of a [`ChannelSums`] container; channel counts stay below it.
pub const MAX_CHANNELS: usize = 16;

/// Number of interleaved channels, guaranteed to be in `1..MAX_CHANNELS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelCount(u16);

impl ChannelCount {
    /// Single channel.
    pub const MONO: ChannelCount = ChannelCount(1);
    /// Two interleaved channels.
    pub const STEREO: ChannelCount = ChannelCount(2);

    /// Validates a channel count.
    ///
    /// # Errors
    /// Returns `KernelError::InvalidChannels` if `channels` is 0 or 16 and above.
    pub fn new(channels: u16) -> Result<Self, KernelError> {
        if channels == 0 || channels as usize >= MAX_CHANNELS {
            return Err(KernelError::InvalidChannels(channels));
        }
        Ok(Self(channels))
    }

    /// Channel count as a `usize`, convenient for slice arithmetic.
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u16> for ChannelCount {
    type Error = KernelError;

    fn try_from(channels: u16) -> Result<Self, Self::Error> {
        Self::new(channels)
    }
}

/// Fixed-capacity accumulator array indexed by channel.
///
/// Never allocates. Only the first `channels` slots are addressable, so an
/// out-of-range channel index panics like a slice index would.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSums<A>
where
    A: Copy + Default,
{
    sums: [A; MAX_CHANNELS],
    len: usize,
}

impl<A> ChannelSums<A>
where
    A: Copy + Default,
{
    /// Creates zeroed accumulators, one per channel.
    pub fn new(channels: ChannelCount) -> Self {
        Self {
            sums: [A::default(); MAX_CHANNELS],
            len: channels.get(),
        }
    }

    /// Number of active channels.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a `ChannelCount` has at least one channel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resets every active accumulator to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.sums[..self.len].fill(A::default());
    }

    /// Active accumulators in channel order.
    #[inline]
    pub fn as_slice(&self) -> &[A] {
        &self.sums[..self.len]
    }

    /// Mutable view of the active accumulators.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [A] {
        &mut self.sums[..self.len]
    }

    /// Iterates over active accumulators in channel order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.as_slice().iter()
    }
}

impl<A> Index<usize> for ChannelSums<A>
where
    A: Copy + Default,
{
    type Output = A;

    #[inline]
    fn index(&self, channel: usize) -> &A {
        &self.as_slice()[channel]
    }
}

impl<A> IndexMut<usize> for ChannelSums<A>
where
    A: Copy + Default,
{
    #[inline]
    fn index_mut(&mut self, channel: usize) -> &mut A {
        &mut self.as_mut_slice()[channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_bounds() {
        assert!(ChannelCount::new(0).is_err());
        assert_eq!(ChannelCount::new(1).unwrap(), ChannelCount::MONO);
        assert_eq!(ChannelCount::new(15).unwrap().get(), 15);
        assert_eq!(
            ChannelCount::new(16),
            Err(KernelError::InvalidChannels(16))
        );
        assert!(ChannelCount::try_from(2u16).is_ok());
    }

    #[test]
    fn test_channel_sums_accumulate_and_clear() {
        let mut sums = ChannelSums::<i64>::new(ChannelCount::new(3).unwrap());
        assert_eq!(sums.len(), 3);
        sums[0] += 5;
        sums[2] -= 7;
        assert_eq!(sums.as_slice(), &[5i64, 0, -7]);
        sums.clear();
        assert!(sums.iter().all(|&s| s == 0));
    }

    #[test]
    #[should_panic]
    fn test_channel_sums_index_past_channel_count_panics() {
        let sums = ChannelSums::<f64>::new(ChannelCount::STEREO);
        let _ = sums[2];
    }
}
