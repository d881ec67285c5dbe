//! The [`AnimatedImage`] handle.
//!
//! `AnimatedImage` opens an animated image container, counts its frames,
//! caches metadata, and exposes a seekable cursor over the frames. Frames are
//! decoded as a stream and only the one under the cursor is kept, so memory
//! does not grow with the frame count. The handle owns the encoded source
//! and the decoder exclusively; dropping it releases both on every exit
//! path, including early returns through `?`.
//!
//! Supported containers are the ones the `image` crate decodes as
//! animations: GIF, APNG and animated WebP.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use image::{
    AnimationDecoder, DynamicImage, Frame, Frames, ImageFormat,
    codecs::{gif::GifDecoder, png::PngDecoder, webp::WebPDecoder},
};

use crate::{error::KeyframesError, metadata::AnimationMetadata};

/// An opened animation with a frame cursor.
///
/// Created via [`AnimatedImage::open`]. The cursor starts at frame 0 and is
/// moved with [`seek`](AnimatedImage::seek). Only the frame under the cursor
/// is held decoded; seeking forward decodes up to the target, seeking
/// backward restarts decoding from the first frame.
///
/// # Example
///
/// ```no_run
/// use image::ImageFormat;
/// use keyframes::{AnimatedImage, KeyframesError};
///
/// let mut animation = AnimatedImage::open("input.gif")?;
/// animation.seek(animation.frame_count() / 2)?;
/// animation.save_current("middle.png", ImageFormat::Png)?;
/// # Ok::<(), KeyframesError>(())
/// ```
pub struct AnimatedImage {
    /// Encoded file contents. Frame streams restart from here.
    source: Arc<[u8]>,
    format: ImageFormat,
    stream: Frames<'static>,
    /// Index of the frame `stream` yields next.
    next_index: u64,
    current: Frame,
    position: u64,
    /// Presentation time of each frame, relative to the first.
    timestamps: Vec<Duration>,
    metadata: AnimationMetadata,
    path: PathBuf,
}

impl Debug for AnimatedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnimatedImage")
            .field("metadata", &self.metadata)
            .field("position", &self.position)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl AnimatedImage {
    /// Open an animated image.
    ///
    /// The container format is sniffed from the file contents, not the
    /// extension. Opening makes one decoding pass to count frames and
    /// collect their delays, then keeps only frame 0 decoded.
    ///
    /// Only genuine frame sequences are accepted: a source with a single
    /// frame is rejected whatever its container, so a one-frame GIF, a
    /// still PNG and a still WebP all yield
    /// [`NotAnimated`](KeyframesError::NotAnimated).
    ///
    /// # Errors
    ///
    /// - [`KeyframesError::FileOpen`] if the file cannot be read or its
    ///   format is not recognised.
    /// - [`KeyframesError::NotAnimated`] if the format cannot carry an
    ///   animation or the source holds a single frame.
    /// - [`KeyframesError::FrameDecodeError`] if a frame fails to decode.
    /// - [`KeyframesError::NoFrames`] if the sequence is empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KeyframesError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening animated image: {}", path.display());

        let bytes = fs::read(&path).map_err(|error| KeyframesError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        let format = image::guess_format(&bytes).map_err(|error| KeyframesError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        let source: Arc<[u8]> = Arc::from(bytes);

        let mut timestamps = Vec::new();
        let mut elapsed = Duration::ZERO;
        let mut dimensions = None;
        for frame in frame_stream(&path, format, &source)? {
            let frame = frame.map_err(|error| KeyframesError::FrameDecodeError(error.to_string()))?;
            dimensions.get_or_insert(frame.buffer().dimensions());
            timestamps.push(elapsed);
            elapsed += delay_to_duration(&frame);
        }

        let Some((width, height)) = dimensions else {
            return Err(KeyframesError::NoFrames(path));
        };
        if timestamps.len() == 1 {
            return Err(KeyframesError::NotAnimated {
                path,
                format: format_name(format),
            });
        }

        let metadata = AnimationMetadata {
            width,
            height,
            frame_count: timestamps.len() as u64,
            duration: elapsed,
            format: format_name(format),
        };

        log::debug!(
            "Counted {} frames ({}x{}, {}, {:?}) in {}",
            metadata.frame_count,
            metadata.width,
            metadata.height,
            metadata.format,
            metadata.duration,
            path.display(),
        );

        let mut stream = frame_stream(&path, format, &source)?;
        let current = next_frame(&mut stream)?;

        Ok(Self {
            source,
            format,
            stream,
            next_index: 1,
            current,
            position: 0,
            timestamps,
            metadata,
            path,
        })
    }

    /// Metadata computed at open time.
    pub fn metadata(&self) -> &AnimationMetadata {
        &self.metadata
    }

    /// Path the animation was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of frames in the animation.
    pub fn frame_count(&self) -> u64 {
        self.metadata.frame_count
    }

    /// Move the cursor to `frame_number`, decoding that frame.
    ///
    /// # Errors
    ///
    /// Returns [`KeyframesError::FrameOutOfRange`] if `frame_number` is not
    /// below [`frame_count`](AnimatedImage::frame_count), or
    /// [`KeyframesError::FrameDecodeError`] if decoding fails on the way.
    /// On error the cursor is left where it was.
    pub fn seek(&mut self, frame_number: u64) -> Result<(), KeyframesError> {
        if frame_number >= self.frame_count() {
            return Err(KeyframesError::FrameOutOfRange {
                frame_number,
                total_frames: self.frame_count(),
            });
        }
        if frame_number == self.position {
            return Ok(());
        }

        if frame_number < self.next_index {
            log::debug!("Rewinding {} to frame 0", self.path.display());
            self.stream = frame_stream(&self.path, self.format, &self.source)?;
            self.next_index = 0;
        }
        while self.next_index < frame_number {
            next_frame(&mut self.stream)?;
            self.next_index += 1;
        }
        self.current = next_frame(&mut self.stream)?;
        self.next_index += 1;
        self.position = frame_number;
        Ok(())
    }

    /// Current cursor position.
    pub fn tell(&self) -> u64 {
        self.position
    }

    /// The frame under the cursor, fully composited onto the canvas.
    pub fn current_frame(&self) -> &Frame {
        &self.current
    }

    /// Presentation time of the frame under the cursor.
    pub fn current_timestamp(&self) -> Duration {
        self.timestamps[self.position as usize]
    }

    /// The frame under the cursor as an owned RGBA image.
    pub fn current_image(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.current.buffer().clone())
    }

    /// Encode the frame under the cursor as a still image at `path`.
    ///
    /// An existing file at `path` is overwritten. Formats without an alpha
    /// channel receive the frame flattened to RGB.
    ///
    /// # Errors
    ///
    /// Returns [`KeyframesError::ImageError`] if encoding or writing fails.
    pub fn save_current<P: AsRef<Path>>(
        &self,
        path: P,
        format: ImageFormat,
    ) -> Result<(), KeyframesError> {
        let image = self.current_image();
        let image = if supports_alpha(format) {
            image
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };
        image.save_with_format(path, format)?;
        Ok(())
    }

    /// Release the handle explicitly.
    ///
    /// Equivalent to dropping it.
    pub fn close(self) {}
}

impl Drop for AnimatedImage {
    fn drop(&mut self) {
        log::debug!("Closing animated image: {}", self.path.display());
    }
}

/// Start a fresh frame stream over `source`.
fn frame_stream(
    path: &Path,
    format: ImageFormat,
    source: &Arc<[u8]>,
) -> Result<Frames<'static>, KeyframesError> {
    let reader = Cursor::new(Arc::clone(source));
    let open_error = |error: image::ImageError| KeyframesError::FileOpen {
        path: path.to_path_buf(),
        reason: error.to_string(),
    };
    let not_animated = || KeyframesError::NotAnimated {
        path: path.to_path_buf(),
        format: format_name(format),
    };

    match format {
        ImageFormat::Gif => Ok(GifDecoder::new(reader).map_err(open_error)?.into_frames()),
        ImageFormat::Png => {
            let decoder = PngDecoder::new(reader).map_err(open_error)?;
            if !decoder.is_apng().map_err(open_error)? {
                return Err(not_animated());
            }
            Ok(decoder.apng().map_err(open_error)?.into_frames())
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(reader).map_err(open_error)?;
            if !decoder.has_animation() {
                return Err(not_animated());
            }
            Ok(decoder.into_frames())
        }
        _ => Err(not_animated()),
    }
}

fn next_frame(stream: &mut Frames<'static>) -> Result<Frame, KeyframesError> {
    match stream.next() {
        Some(frame) => frame.map_err(|error| KeyframesError::FrameDecodeError(error.to_string())),
        None => Err(KeyframesError::FrameDecodeError(
            "frame stream ended before the counted frame count".to_string(),
        )),
    }
}

fn delay_to_duration(frame: &Frame) -> Duration {
    let (numerator, denominator) = frame.delay().numer_denom_ms();
    if denominator == 0 {
        return Duration::ZERO;
    }
    Duration::from_micros(u64::from(numerator) * 1000 / u64::from(denominator))
}

fn format_name(format: ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map_or_else(|| format!("{format:?}").to_ascii_lowercase(), |ext| (*ext).to_string())
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Farbfeld | ImageFormat::Hdr
    )
}
