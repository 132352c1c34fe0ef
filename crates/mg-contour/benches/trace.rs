use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mg_contour::{NeutralLineFeatures, box_mean_smooth, zero_contours};
use mg_core::Image;
use mg_grad::gradient_magnitude;

fn synthetic_bipole(w: usize, h: usize) -> Image<f64> {
    let mut data = vec![0.0f64; w * h];
    for r in 0..h {
        for c in 0..w {
            let dx = c as f64 - w as f64 / 2.0;
            let dy = r as f64 - h as f64 / 2.0;
            data[r * w + c] = dx * (-(dx * dx + dy * dy) / 800.0).exp() * 1500.0;
        }
    }
    Image::from_vec(w, h, data).expect("valid image")
}

fn bench_neutral_line(c: &mut Criterion) {
    let img = synthetic_bipole(256, 256);
    let smoothed = box_mean_smooth(&img, 10);
    let grad = gradient_magnitude(&img);

    c.bench_function("zero_contours_256", |b| {
        b.iter(|| zero_contours(black_box(&smoothed)))
    });

    c.bench_function("neutral_line_features_256", |b| {
        b.iter(|| NeutralLineFeatures::compute(black_box(&img), black_box(&grad)))
    });
}

criterion_group!(benches, bench_neutral_line);
criterion_main!(benches);
