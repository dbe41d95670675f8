//! Criterion benchmarks for the affine transform engine.
//! Covers composition across state pairs and batch point application.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use planar::affine::{Affine2, MatrixState};
use planar::sample::{draw_affine, AffineCfg, ReplayToken};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn transform_of_state(state: MatrixState, index: u64) -> Affine2 {
    let cfg = AffineCfg {
        state: Some(state),
        ..AffineCfg::default()
    };
    draw_affine(cfg, ReplayToken { seed: 77, index })
}

fn bench_concatenate(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine_concatenate");
    for state in [
        MatrixState::Identity,
        MatrixState::Translate,
        MatrixState::Scale,
        MatrixState::ShearScale,
        MatrixState::General,
    ] {
        group.bench_with_input(
            BenchmarkId::new("concat_general_by", format!("{state:?}")),
            &state,
            |b, &state| {
                let arg = transform_of_state(state, 1);
                b.iter_batched(
                    || transform_of_state(MatrixState::General, 2),
                    |mut acc| {
                        acc.concatenate(&arg);
                        acc
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_transform_coords(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine_transform_coords");
    for &n in &[16usize, 256, 4096] {
        let mut rng = StdRng::seed_from_u64(11);
        let coords: Vec<f64> = (0..n * 2).map(|_| rng.gen_range(-100.0..100.0)).collect();
        for state in [
            MatrixState::Translate,
            MatrixState::Scale,
            MatrixState::General,
        ] {
            let at = transform_of_state(state, 3);
            group.bench_with_input(
                BenchmarkId::new(format!("{state:?}"), n),
                &n,
                |b, &n| {
                    b.iter_batched(
                        || coords.clone(),
                        |mut buf| {
                            at.transform_coords_within(&mut buf, 0, 0, n);
                            buf
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    c.bench_function("affine_inverse_general", |b| {
        let at = transform_of_state(MatrixState::General, 4);
        b.iter(|| at.inverse().unwrap())
    });
}

criterion_group!(benches, bench_concatenate, bench_transform_coords, bench_inverse);
criterion_main!(benches);
