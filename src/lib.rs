//! # keyframes
//!
//! Sample evenly spaced still frames out of animated images.
//!
//! `keyframes` opens an animated image (GIF, APNG or animated WebP), picks
//! `frame_count` frames at a fixed stride of `total_frames / frame_count`,
//! and writes each one as a standalone image to `{name}/{name}_{i}.png`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use keyframes::KeyframesError;
//!
//! // Writes walk/walk_0.png .. walk/walk_7.png; ./walk must exist.
//! let written = keyframes::extract_keyframes("walk.gif", 8, "walk")?;
//! for path in &written {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), KeyframesError>(())
//! ```
//!
//! ### Working with the animation directly
//!
//! ```no_run
//! use image::ImageFormat;
//! use keyframes::{AnimatedImage, KeyframesError};
//!
//! let mut animation = AnimatedImage::open("walk.gif")?;
//! println!("{:?}", animation.metadata());
//! animation.seek(animation.frame_count() - 1)?;
//! animation.save_current("last.png", ImageFormat::Png)?;
//! # Ok::<(), KeyframesError>(())
//! ```
//!
//! ## Sampling
//!
//! The stride is integer division, so the tail of the animation is skipped
//! when the division is uneven (10 frames, 3 samples: offsets 0, 3, 6), and
//! requesting more samples than there are frames writes frame 0 repeatedly.
//! See [`SamplingPlan`].

pub mod animation;
pub mod configuration;
pub mod error;
pub mod extraction;
pub mod metadata;
pub mod progress;
pub mod sampling;

pub use animation::AnimatedImage;
pub use configuration::{ExtractOptions, output_format_from_extension};
pub use error::KeyframesError;
pub use extraction::{extract_keyframes, extract_keyframes_with_options};
pub use metadata::AnimationMetadata;
pub use progress::{CancellationToken, ProgressCallback, ProgressInfo};
pub use sampling::{SamplingPlan, parse_frame_count, stride};
