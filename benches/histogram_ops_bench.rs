use criterion::{Criterion, criterion_group, criterion_main};
use jetplot::core::{Axis, Histogram};
use jetplot::tools;
use std::hint::black_box;

fn filled_1d(name: &str, n_bins: usize, slope: f64) -> Histogram {
    let mut hist = Histogram::new_1d(name, "", n_bins, 0.0, 1.0).expect("valid axis");
    for bin in 1..=n_bins {
        let value = 1.0 + slope * bin as f64;
        hist.set_bin_content(bin, value);
        hist.set_bin_error(bin, value.sqrt());
    }
    hist
}

fn bench_divide_1d_4k(c: &mut Criterion) {
    let numer = filled_1d("numer", 4_000, 0.5);
    let denom = filled_1d("denom", 4_000, 0.25);

    c.bench_function("divide_1d_4k", |b| {
        b.iter(|| {
            let _ = tools::divide_1d(black_box(&numer), black_box(&denom), 1.0, 1.0)
                .expect("divide should succeed");
        })
    });
}

fn bench_divide_nearest_fallback_1k(c: &mut Criterion) {
    let numer = filled_1d("numer", 1_000, 0.5);
    let denom = filled_1d("denom", 750, 0.25);

    c.bench_function("divide_nearest_fallback_1k", |b| {
        b.iter(|| {
            let _ = tools::divide(black_box(&numer), black_box(&denom), 1.0, 1.0)
                .expect("fallback divide should succeed");
        })
    });
}

fn bench_rebin_2d_200x200(c: &mut Criterion) {
    let mut hist =
        Histogram::new_2d("h2", "", 200, 0.0, 1.0, 200, 0.0, 1.0).expect("valid axes");
    for i in 0..40_000 {
        let x = (i % 200) as f64 / 200.0 + 0.001;
        let y = (i / 200) as f64 / 200.0 + 0.001;
        hist.fill_2d(x, y, 1.0);
    }

    c.bench_function("rebin_2d_200x200_by_4", |b| {
        b.iter(|| {
            let _ = black_box(&hist).rebin(Axis::X, 4).expect("rebin");
        })
    });
}

fn bench_normalize_10k(c: &mut Criterion) {
    let template = filled_1d("spectrum", 10_000, 0.1);

    c.bench_function("normalize_10k", |b| {
        b.iter(|| {
            let mut hist = template.clone();
            let _ = tools::try_normalize(&mut hist, 1.0, 0.0, 1.0).expect("normalize");
            black_box(hist);
        })
    });
}

criterion_group!(
    benches,
    bench_divide_1d_4k,
    bench_divide_nearest_fallback_1k,
    bench_rebin_2d_200x200,
    bench_normalize_10k
);
criterion_main!(benches);
