//! Fixture helpers shared by the integration tests.
//!
//! Animations are generated on the fly so the suite carries no binary
//! fixtures. Frame `i` is a solid colour whose red channel is `i * 10`,
//! which lets tests tell which source frame an output file came from.

#![allow(dead_code)]

use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use image::{
    Delay, Frame, ImageFormat, Rgba, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};
use webp_animation::{Encoder as WebpEncoder, EncoderOptions, EncodingConfig, EncodingType};

pub const WIDTH: u32 = 4;
pub const HEIGHT: u32 = 3;
pub const FRAME_DELAY_MS: u32 = 100;

/// Colour of frame `index` in generated animations.
pub fn frame_colour(index: u64) -> Rgba<u8> {
    let value = (index * 10) as u8;
    Rgba([value, 0, 255 - value, 255])
}

/// Write a looping GIF with `frame_count` solid-colour frames.
pub fn write_gif(path: &Path, frame_count: u64) {
    let file = File::create(path).expect("Failed to create GIF fixture");
    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .expect("Failed to set repeat");
    for index in 0..frame_count {
        let buffer = RgbaImage::from_pixel(WIDTH, HEIGHT, frame_colour(index));
        let frame = Frame::from_parts(
            buffer,
            0,
            0,
            Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1),
        );
        encoder.encode_frame(frame).expect("Failed to encode frame");
    }
}

/// Red channel of the top-left pixel of the image at `path`.
pub fn red_channel(path: &Path) -> u8 {
    let image = image::open(path).expect("Failed to open output image");
    image.to_rgba8().get_pixel(0, 0)[0]
}

/// Recover the source frame index an output file was encoded from.
pub fn source_frame(path: &Path) -> u64 {
    (u64::from(red_channel(path)) + 5) / 10
}

/// Raw RGBA bytes of frame `index`.
fn frame_pixels(index: u64) -> Vec<u8> {
    RgbaImage::from_pixel(WIDTH, HEIGHT, frame_colour(index)).into_raw()
}

/// Write an APNG with `frame_count` solid-colour frames.
pub fn write_apng(path: &Path, frame_count: u64) {
    let file = File::create(path).expect("Failed to create APNG fixture");
    let mut encoder = png::Encoder::new(BufWriter::new(file), WIDTH, HEIGHT);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .set_animated(frame_count as u32, 0)
        .expect("Failed to mark APNG as animated");
    encoder
        .set_frame_delay(FRAME_DELAY_MS as u16, 1000)
        .expect("Failed to set frame delay");
    let mut writer = encoder.write_header().expect("Failed to write APNG header");
    for index in 0..frame_count {
        writer
            .write_image_data(&frame_pixels(index))
            .expect("Failed to write APNG frame");
    }
    writer.finish().expect("Failed to finish APNG");
}

/// Write a lossless animated WebP with `frame_count` solid-colour frames.
pub fn write_animated_webp(path: &Path, frame_count: u64) {
    let options = EncoderOptions {
        encoding_config: Some(EncodingConfig {
            encoding_type: EncodingType::Lossless,
            quality: 100.0,
            method: 4,
        }),
        ..Default::default()
    };
    let mut encoder = WebpEncoder::new_with_options((WIDTH, HEIGHT), options)
        .expect("Failed to create WebP encoder");
    for index in 0..frame_count {
        let timestamp = (index * u64::from(FRAME_DELAY_MS)) as i32;
        encoder
            .add_frame(&frame_pixels(index), timestamp)
            .expect("Failed to add WebP frame");
    }
    let end = (frame_count * u64::from(FRAME_DELAY_MS)) as i32;
    let data = encoder.finalize(end).expect("Failed to finalize WebP");
    fs::write(path, &*data).expect("Failed to write WebP fixture");
}

/// Write a single-image PNG or WebP.
pub fn write_still(path: &Path, format: ImageFormat) {
    RgbaImage::from_pixel(WIDTH, HEIGHT, frame_colour(1))
        .save_with_format(path, format)
        .expect("Failed to write still image");
}
