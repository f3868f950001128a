use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use transflow_confidence::{
    AsymptoticCI, ConfidenceLevel, Goodman, QuesenberryHurst, SimultaneousIntervalEstimator,
    SisonGlaz,
};

/// Generate a cell vector with `k` cells and roughly `n` observations
fn generate_cells(k: usize, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells = vec![0.0; k];
    for _ in 0..n {
        cells[rng.gen_range(0..k)] += 1.0;
    }
    cells
}

fn bench_closed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("ClosedForm");
    let level = ConfidenceLevel::NINETY_FIVE;
    let goodman = Goodman::new(level);
    let qh = QuesenberryHurst::new(level);
    let wilson = AsymptoticCI::wilson(level);

    for &k in &[4usize, 16, 64] {
        let cells = generate_cells(k, 50 * k, 42);

        group.bench_with_input(BenchmarkId::new("goodman", k), &cells, |b, cells| {
            b.iter(|| goodman.simultaneous_intervals(black_box(cells)))
        });
        group.bench_with_input(BenchmarkId::new("qh", k), &cells, |b, cells| {
            b.iter(|| qh.simultaneous_intervals(black_box(cells)))
        });
        group.bench_with_input(BenchmarkId::new("wilson", k), &cells, |b, cells| {
            b.iter(|| wilson.simultaneous_intervals(black_box(cells)))
        });
    }

    group.finish();
}

fn bench_sison_glaz(c: &mut Criterion) {
    let mut group = c.benchmark_group("SisonGlaz");
    let sg = SisonGlaz::new(ConfidenceLevel::NINETY_FIVE);

    // The search is linear in the half-width, which grows with sqrt(n).
    for &n in &[100usize, 1000, 10000] {
        let cells = generate_cells(7, n, 7);
        group.bench_with_input(BenchmarkId::new("n", n), &cells, |b, cells| {
            b.iter(|| sg.simultaneous_intervals(black_box(cells)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_closed_form, bench_sison_glaz);
criterion_main!(benches);
