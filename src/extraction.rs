//! Sampled frame extraction.
//!
//! [`extract_keyframes`] opens an animation, spreads `frame_count` samples
//! over it with a [`SamplingPlan`], and writes each sample to
//! `{name}/{name}_{i}.png`. It returns the written paths in index order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    animation::AnimatedImage,
    configuration::ExtractOptions,
    error::KeyframesError,
    progress::ProgressTracker,
    sampling::SamplingPlan,
};

/// Extract `frame_count` evenly spaced frames from `source` into
/// `./{name}/{name}_{i}.png`.
///
/// The output directory must already exist. Existing files are overwritten.
///
/// # Errors
///
/// Returns [`KeyframesError::ZeroFrameCount`] for a zero `frame_count`,
/// [`KeyframesError::OutputDirectoryMissing`] when `./{name}` is absent, and
/// any error from [`AnimatedImage::open`] or frame encoding. No file is
/// written when the error is raised before the first frame.
///
/// # Example
///
/// ```no_run
/// use keyframes::KeyframesError;
///
/// // 12-frame source: writes x/x_0.png .. x/x_3.png from frames 0, 3, 6, 9.
/// let written = keyframes::extract_keyframes("input.gif", 4, "x")?;
/// assert_eq!(written.len(), 4);
/// # Ok::<(), KeyframesError>(())
/// ```
pub fn extract_keyframes<P: AsRef<Path>>(
    source: P,
    frame_count: u64,
    name: &str,
) -> Result<Vec<PathBuf>, KeyframesError> {
    extract_keyframes_with_options(source, frame_count, name, &ExtractOptions::default())
}

/// [`extract_keyframes`] with explicit [`ExtractOptions`].
///
/// # Errors
///
/// As [`extract_keyframes`], plus [`KeyframesError::Cancelled`] when the
/// configured token is cancelled before a frame is written.
pub fn extract_keyframes_with_options<P: AsRef<Path>>(
    source: P,
    frame_count: u64,
    name: &str,
    options: &ExtractOptions,
) -> Result<Vec<PathBuf>, KeyframesError> {
    let mut animation = AnimatedImage::open(source)?;
    let plan = SamplingPlan::new(animation.frame_count(), frame_count)?;
    if plan.is_degenerate() {
        log::warn!(
            "Requested {} frames from a {}-frame animation; every sample is frame 0",
            plan.frame_count(),
            plan.total_frames(),
        );
    }

    prepare_output_directory(&options.output_directory(name), options.create_directory)?;

    let mut tracker =
        ProgressTracker::new(options.progress.clone(), plan.frame_count(), options.batch_size);
    let mut written = Vec::new();

    for (index, offset) in plan.offsets().enumerate() {
        if options.is_cancelled() {
            return Err(KeyframesError::Cancelled);
        }

        animation.seek(offset)?;
        let output_path = options.output_path(name, index as u64);
        animation.save_current(&output_path, options.format)?;
        log::debug!("Wrote frame {offset} to {}", output_path.display());

        tracker.advance(offset, animation.current_timestamp());
        written.push(output_path);
    }

    tracker.finish();
    Ok(written)
}

fn prepare_output_directory(directory: &Path, create: bool) -> Result<(), KeyframesError> {
    if directory.is_dir() {
        return Ok(());
    }
    if create {
        log::debug!("Creating output directory {}", directory.display());
        fs::create_dir_all(directory)?;
        return Ok(());
    }
    Err(KeyframesError::OutputDirectoryMissing(directory.to_path_buf()))
}
