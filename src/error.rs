//! Error types for the `keyframes` crate.
//!
//! This module defines [`KeyframesError`], the unified error type returned by
//! all fallible operations in the crate. Each failure kind (bad arguments,
//! I/O, malformed or non-animated sources, encoding) has its own variant so
//! callers and tests can match on it precisely.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `keyframes` operations.
///
/// Every public method that can fail returns `Result<T, KeyframesError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyframesError {
    /// The frame count argument could not be parsed.
    #[error("Invalid frame count {value:?}: {reason}")]
    InvalidFrameCount {
        /// The raw argument as supplied.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A frame count of zero was requested; the sampling stride is undefined.
    #[error("Frame count must be greater than zero (division by zero computing stride)")]
    ZeroFrameCount,

    /// The source file could not be opened or its container not recognised.
    #[error("Failed to open animated image at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::AnimatedImage::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The source decodes as an image, but not as a frame sequence.
    #[error("{path} is not an animated image (format: {format})")]
    NotAnimated {
        /// Path of the rejected source.
        path: PathBuf,
        /// Detected container format.
        format: String,
    },

    /// The animation decoded to zero frames.
    #[error("No frames found in {0}")]
    NoFrames(PathBuf),

    /// A frame could not be decoded.
    #[error("Failed to decode frame: {0}")]
    FrameDecodeError(String),

    /// A seek targeted a frame past the end of the animation.
    #[error("Frame {frame_number} is out of range (animation has {total_frames} frames)")]
    FrameOutOfRange {
        /// The frame number that was requested.
        frame_number: u64,
        /// The total number of frames in the animation.
        total_frames: u64,
    },

    /// The directory frames are written into does not exist.
    #[error("Output directory does not exist: {0}")]
    OutputDirectoryMissing(PathBuf),

    /// The requested output extension does not map to an encodable format.
    #[error("Unsupported output format: {0}")]
    UnsupportedOutputFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,
}
