//! Frame sampling arithmetic.
//!
//! A [`SamplingPlan`] spreads `frame_count` samples over an animation of
//! `total_frames` frames using a fixed integer stride:
//! `offset(i) = floor(total_frames / frame_count) * i`.
//!
//! The stride is truncated, so the tail of the animation is not sampled when
//! the division is uneven, and a `frame_count` larger than `total_frames`
//! collapses every offset to frame 0.
//!
//! # Example
//!
//! ```
//! use keyframes::SamplingPlan;
//!
//! let plan = SamplingPlan::new(12, 4)?;
//! assert_eq!(plan.stride(), 3);
//! assert_eq!(plan.offsets().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
//! # Ok::<(), keyframes::KeyframesError>(())
//! ```

use crate::error::KeyframesError;

/// Compute the sampling stride, `total_frames / frame_count` rounded down.
///
/// # Errors
///
/// Returns [`KeyframesError::ZeroFrameCount`] if `frame_count` is zero.
pub fn stride(total_frames: u64, frame_count: u64) -> Result<u64, KeyframesError> {
    total_frames
        .checked_div(frame_count)
        .ok_or(KeyframesError::ZeroFrameCount)
}

/// Parse a frame count argument.
///
/// Zero parses successfully; it is rejected later by [`SamplingPlan::new`]
/// as [`KeyframesError::ZeroFrameCount`].
///
/// # Errors
///
/// Returns [`KeyframesError::InvalidFrameCount`] if `value` is not a
/// non-negative integer.
pub fn parse_frame_count(value: &str) -> Result<u64, KeyframesError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|error| KeyframesError::InvalidFrameCount {
            value: value.to_string(),
            reason: error.to_string(),
        })
}

/// The set of frame offsets to sample from one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SamplingPlan {
    total_frames: u64,
    frame_count: u64,
    stride: u64,
}

impl SamplingPlan {
    /// Build a plan sampling `frame_count` frames out of `total_frames`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyframesError::ZeroFrameCount`] if `frame_count` is zero.
    pub fn new(total_frames: u64, frame_count: u64) -> Result<Self, KeyframesError> {
        let stride = stride(total_frames, frame_count)?;
        log::debug!(
            "Sampling {frame_count} of {total_frames} frames with stride {stride}"
        );
        Ok(Self {
            total_frames,
            frame_count,
            stride,
        })
    }

    /// Number of frames in the source animation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Number of samples (and output files) this plan produces.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Distance in frames between consecutive samples.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Returns `true` when the stride truncated to zero, meaning every
    /// sample is frame 0.
    pub fn is_degenerate(&self) -> bool {
        self.stride == 0
    }

    /// Frame offset sampled at position `index`.
    pub fn offset(&self, index: u64) -> u64 {
        self.stride * index
    }

    /// Frame offsets for every index in `0..frame_count`, in order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.frame_count).map(|index| self.offset(index))
    }
}
