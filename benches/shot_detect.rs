use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shotgroup::detector::{Preprocessed, detect_candidates};
use shotgroup::models::GrayImage;
use shotgroup::tools::synthetic_target;
use shotgroup::utils::grayscale::rgb_to_grayscale;

const WIDTH: usize = 640;
const HEIGHT: usize = 480;
const HOLES: [(i32, i32, i32); 5] = [
    (160, 120, 11),
    (470, 130, 12),
    (320, 240, 10),
    (150, 360, 12),
    (480, 370, 11),
];

fn bench_full_pipeline(c: &mut Criterion) {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    c.bench_function("detect_shots_640x480_5holes", |b| {
        b.iter(|| shotgroup::detect_shots(black_box(&rgb), WIDTH, HEIGHT).unwrap())
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    let gray = rgb_to_grayscale(&rgb, WIDTH, HEIGHT);
    c.bench_function("preprocess_640x480", |b| {
        b.iter(|| {
            let img = GrayImage::from_raw(black_box(gray.clone()), WIDTH, HEIGHT).unwrap();
            Preprocessed::from_gray(img)
        })
    });
}

fn bench_candidates(c: &mut Criterion) {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    let gray = rgb_to_grayscale(&rgb, WIDTH, HEIGHT);
    let pre = Preprocessed::from_gray(GrayImage::from_raw(gray, WIDTH, HEIGHT).unwrap());
    c.bench_function("detect_candidates_640x480", |b| {
        b.iter(|| detect_candidates(black_box(&pre)))
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_preprocess,
    bench_candidates
);
criterion_main!(benches);
