//! Frame-stepped view over an interleaved reference buffer.

/// A window of `frames` interleaved frames that slides one frame at a time
/// over a borrowed buffer.
///
/// The window never leaves the buffer. After each [`advance`](Self::advance)
/// the frame that dropped off the trailing edge is available through
/// [`leaving`](Self::leaving) and the frame that joined at the leading edge
/// through [`entering`](Self::entering), which is what an incremental
/// normalizer needs to update a running sum of squares.
#[derive(Debug, Clone)]
pub struct SlidingWindow<'a, T> {
    buffer: &'a [T],
    channels: usize,
    len: usize,
    start: usize,
}

impl<'a, T> SlidingWindow<'a, T> {
    /// Places a window of `frames` frames at the start of `buffer`.
    ///
    /// Returns `None` if `channels` is zero or the buffer is shorter than
    /// one window.
    pub fn new(buffer: &'a [T], channels: usize, frames: usize) -> Option<Self> {
        let len = channels.checked_mul(frames)?;
        if channels == 0 || len > buffer.len() {
            return None;
        }
        Some(Self {
            buffer,
            channels,
            len,
            start: 0,
        })
    }

    /// Offset of the window in frames.
    #[inline]
    pub fn position(&self) -> usize {
        self.start / self.channels
    }

    /// Window length in samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a zero-frame window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of further single-frame steps that stay inside the buffer.
    #[inline]
    pub fn remaining_steps(&self) -> usize {
        (self.buffer.len() - self.start - self.len) / self.channels
    }

    /// Samples currently covered by the window.
    #[inline]
    pub fn current(&self) -> &'a [T] {
        let buffer: &'a [T] = self.buffer;
        &buffer[self.start..self.start + self.len]
    }

    /// The frame that left the window on the last step.
    ///
    /// `None` before the first step.
    #[inline]
    pub fn leaving(&self) -> Option<&'a [T]> {
        let buffer: &'a [T] = self.buffer;
        (self.start >= self.channels).then(|| &buffer[self.start - self.channels..self.start])
    }

    /// The frame at the leading edge of the window, i.e. the one that joined
    /// it on the last step.
    ///
    /// Empty for a zero-frame window.
    #[inline]
    pub fn entering(&self) -> &'a [T] {
        let buffer: &'a [T] = self.buffer;
        let end = self.start + self.len;
        &buffer[end - self.channels.min(self.len)..end]
    }

    /// Moves the window forward by one frame.
    ///
    /// Returns `false` and leaves the window in place if the step would
    /// run past the end of the buffer.
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.remaining_steps() == 0 {
            return false;
        }
        self.start += self.channels;
        true
    }
}
