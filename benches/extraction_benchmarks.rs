//! Benchmarks for decoding and sampled extraction.
//!
//! Run with: cargo bench

use std::{fs, fs::File, path::Path};

use criterion::Criterion;
use image::{
    Delay, Frame, Rgba, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};
use keyframes::{AnimatedImage, ExtractOptions, extract_keyframes_with_options};

const FRAME_COUNT: u32 = 60;

fn write_fixture(path: &Path) {
    let mut encoder = GifEncoder::new(File::create(path).unwrap());
    encoder.set_repeat(Repeat::Infinite).unwrap();
    for index in 0..FRAME_COUNT {
        let buffer = RgbaImage::from_fn(128, 96, |x, y| {
            Rgba([(x + index) as u8, (y * 2) as u8, (index * 4) as u8, 255])
        });
        encoder
            .encode_frame(Frame::from_parts(
                buffer,
                0,
                0,
                Delay::from_numer_denom_ms(40, 1),
            ))
            .unwrap();
    }
}

fn benchmark_open(criterion: &mut Criterion) {
    let directory = tempfile::tempdir().unwrap();
    let source = directory.path().join("bench.gif");
    write_fixture(&source);

    criterion.bench_function("open and decode 60-frame gif", |bencher| {
        bencher.iter(|| {
            let animation = AnimatedImage::open(&source).unwrap();
            assert_eq!(animation.frame_count(), u64::from(FRAME_COUNT));
        });
    });
}

fn benchmark_extraction(criterion: &mut Criterion) {
    let directory = tempfile::tempdir().unwrap();
    let source = directory.path().join("bench.gif");
    write_fixture(&source);
    fs::create_dir(directory.path().join("bench")).unwrap();
    let options = ExtractOptions::new().with_output_root(directory.path());

    criterion.bench_function("extract 10 of 60 frames to png", |bencher| {
        bencher.iter(|| {
            extract_keyframes_with_options(&source, 10, "bench", &options).unwrap();
        });
    });
}

criterion::criterion_group!(benches, benchmark_open, benchmark_extraction);
criterion::criterion_main!(benches);
