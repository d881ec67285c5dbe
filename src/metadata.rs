//! Animation metadata types.
//!
//! [`AnimationMetadata`] is computed once when an
//! [`AnimatedImage`](crate::AnimatedImage) is opened and cached for the
//! lifetime of the handle.

use std::time::Duration;

/// Metadata for an opened animation.
///
/// # Example
///
/// ```no_run
/// use keyframes::{AnimatedImage, KeyframesError};
///
/// let animation = AnimatedImage::open("input.gif")?;
/// let metadata = animation.metadata();
/// println!("{}x{}, {} frames", metadata.width, metadata.height, metadata.frame_count);
/// # Ok::<(), KeyframesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AnimationMetadata {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Number of frames in the animation.
    pub frame_count: u64,
    /// Total play time of one loop, the sum of every frame delay.
    pub duration: Duration,
    /// Container format name (`"gif"`, `"png"` or `"webp"`).
    pub format: String,
}
