//! Benchmarks for yuvx conversions and geometry.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use yuvx_color::{convert, to_canonical, ChromaUpsampling, Converter, SensorFrame};
use yuvx_core::{FrameBuffer, PixelFormat, Rect, Rotation};
use yuvx_ops::{crop, mirror, rotate, scale, FilterMode};

/// Common camera preview sizes.
const SIZES: [(u32, u32); 3] = [(320, 240), (640, 480), (1280, 720)];

fn frame(format: PixelFormat, width: u32, height: u32) -> FrameBuffer {
    let size = format.desc().frame_size(width, height);
    let bytes: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
    FrameBuffer::from_bytes(format, width, height, &bytes).unwrap()
}

/// Benchmark format conversion through I420.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for (w, h) in SIZES {
        let label = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w * h) as u64));

        let nv21 = frame(PixelFormat::Nv21, w, h);
        group.bench_with_input(BenchmarkId::new("nv21_to_i420", &label), &nv21, |b, f| {
            b.iter(|| convert(black_box(f), PixelFormat::I420).unwrap())
        });

        let i420 = frame(PixelFormat::I420, w, h);
        group.bench_with_input(BenchmarkId::new("i420_to_abgr", &label), &i420, |b, f| {
            b.iter(|| convert(black_box(f), PixelFormat::Abgr).unwrap())
        });

        let bilinear = Converter::new().with_upsampling(ChromaUpsampling::Bilinear);
        group.bench_with_input(BenchmarkId::new("i420_to_abgr_bilinear", &label), &i420, |b, f| {
            b.iter(|| bilinear.from_canonical(black_box(f), PixelFormat::Abgr).unwrap())
        });

        let abgr = frame(PixelFormat::Abgr, w, h);
        group.bench_with_input(BenchmarkId::new("abgr_to_i420", &label), &abgr, |b, f| {
            b.iter(|| convert(black_box(f), PixelFormat::I420).unwrap())
        });
    }

    group.finish();
}

/// Benchmark camera ingest: sensor planes and fused rotation.
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    let (w, h) = (1280u32, 720u32);
    let nv21 = frame(PixelFormat::Nv21, w, h);
    let bytes = nv21.to_bytes();
    let luma = (w * h) as usize;
    let sensor = SensorFrame {
        width: w,
        height: h,
        y: &bytes[..luma],
        y_stride: w as usize,
        u: &bytes[luma + 1..],
        u_stride: w as usize,
        v: &bytes[luma..],
        v_stride: w as usize,
        uv_pixel_stride: 2,
    };
    group.throughput(Throughput::Elements(luma as u64));

    for rotation in [Rotation::Rotate0, Rotation::Rotate90] {
        group.bench_with_input(BenchmarkId::new("nv21_to_canonical", rotation), &rotation, |b, &r| {
            b.iter(|| to_canonical(black_box(&nv21), r).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("sensor_to_canonical", rotation), &rotation, |b, &r| {
            b.iter(|| yuvx_color::sensor_to_canonical(black_box(&sensor), r).unwrap())
        });
    }

    group.finish();
}

/// Benchmark rotate, mirror and crop.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    let (w, h) = (1280u32, 720u32);
    group.throughput(Throughput::Elements((w * h) as u64));

    for format in [PixelFormat::I420, PixelFormat::Nv21, PixelFormat::Abgr] {
        let src = frame(format, w, h);

        group.bench_with_input(BenchmarkId::new("rotate90", format), &src, |b, f| {
            b.iter(|| rotate(black_box(f), Rotation::Rotate90).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("mirror", format), &src, |b, f| {
            b.iter(|| mirror(black_box(f)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("crop", format), &src, |b, f| {
            b.iter(|| crop(black_box(f), Rect::new(280, 0, 720, 720)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark scaling filters.
fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");

    let src = frame(PixelFormat::I420, 1280, 720);
    group.throughput(Throughput::Elements(1280 * 720));

    for filter in [FilterMode::None, FilterMode::Linear, FilterMode::Bilinear, FilterMode::Box] {
        let name = format!("{filter:?}").to_lowercase();

        group.bench_with_input(BenchmarkId::new(&name, "half"), &src, |b, f| {
            b.iter(|| scale(black_box(f), 640, 360, filter).unwrap())
        });

        group.bench_with_input(BenchmarkId::new(&name, "double"), &src, |b, f| {
            b.iter(|| scale(black_box(f), 2560, 1440, filter).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_ingest, bench_transform, bench_scale);
criterion_main!(benches);
