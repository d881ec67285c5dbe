//! Extraction configuration.
//!
//! [`ExtractOptions`] is a builder that threads the output location, output
//! image format, progress callbacks and cancellation tokens through
//! [`extract_keyframes_with_options`](crate::extract_keyframes_with_options)
//! without polluting its signature.
//!
//! # Example
//!
//! ```no_run
//! use image::ImageFormat;
//! use keyframes::{CancellationToken, ExtractOptions};
//!
//! let token = CancellationToken::new();
//! let options = ExtractOptions::new()
//!     .with_output_root("/tmp/out")
//!     .with_format(ImageFormat::Jpeg)
//!     .with_cancellation(token.clone());
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use image::ImageFormat;

use crate::{
    error::KeyframesError,
    progress::{CancellationToken, NoOpProgress, ProgressCallback},
};

/// Configuration for an extraction run.
///
/// A default-constructed value writes PNG files under `./{name}/`, requires
/// that directory to exist, reports no progress and is never cancelled.
#[derive(Clone)]
pub struct ExtractOptions {
    /// Directory the `{name}` output directory lives in.
    pub(crate) output_root: PathBuf,
    /// Encoding for written frames.
    pub(crate) format: ImageFormat,
    /// Create `{root}/{name}` when it is missing instead of failing.
    pub(crate) create_directory: bool,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("output_root", &self.output_root)
            .field("format", &self.format)
            .field("create_directory", &self.create_directory)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            output_root: PathBuf::from("."),
            format: ImageFormat::Png,
            create_directory: false,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }

    /// Set the directory that contains the `{name}` output directory.
    /// Defaults to the current directory.
    #[must_use]
    pub fn with_output_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.output_root = root.as_ref().to_path_buf();
        self
    }

    /// Set the image format frames are encoded as. Defaults to PNG.
    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Create the output directory when it does not exist.
    #[must_use]
    pub fn with_create_directory(mut self, create: bool) -> Self {
        self.create_directory = create;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, extraction stops before the next frame
    /// and returns [`KeyframesError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Directory frames for `name` are written into.
    pub fn output_directory(&self, name: &str) -> PathBuf {
        self.output_root.join(name)
    }

    /// Path of the file written for sample `index` of `name`.
    pub fn output_path(&self, name: &str, index: u64) -> PathBuf {
        self.output_directory(name)
            .join(format!("{name}_{index}.{}", self.extension()))
    }

    /// File extension matching the configured format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Map a file extension (`png`, `.JPG`, `tiff`, ...) to an output format.
///
/// # Errors
///
/// Returns [`KeyframesError::UnsupportedOutputFormat`] for extensions that
/// are unknown or name a format this crate does not write.
pub fn output_format_from_extension(extension: &str) -> Result<ImageFormat, KeyframesError> {
    let cleaned = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    match cleaned.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        "gif" => Ok(ImageFormat::Gif),
        "webp" => Ok(ImageFormat::WebP),
        _ => Err(KeyframesError::UnsupportedOutputFormat(extension.to_string())),
    }
}
