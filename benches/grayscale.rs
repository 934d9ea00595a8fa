use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shotgroup::utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};

fn bench_grayscale_small(c: &mut Criterion) {
    let image = vec![128u8; 320 * 240 * 3];
    c.bench_function("rgb_to_grayscale_320x240", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(320), black_box(240)))
    });
}

fn bench_grayscale_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_grayscale_parallel_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_parallel_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale_parallel(black_box(&image), black_box(1920), black_box(1080)))
    });
}

criterion_group!(
    benches,
    bench_grayscale_small,
    bench_grayscale_large,
    bench_grayscale_parallel_large
);
criterion_main!(benches);
