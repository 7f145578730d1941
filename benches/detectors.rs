//! Broad-phase comparison on a sparse box.
//!
//! Run with: `cargo bench --bench detectors`

use bouncebox::collision::{BruteForce, KdTreeDetector, SweepDetector};
use bouncebox::{CollisionDetector, Colour, Container, Particle};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Small particles scattered over a large box, so most pairs are far apart.
fn scene(count: usize) -> Container {
    let mut rng = StdRng::seed_from_u64(count as u64);
    let mut c = Container::new(4000, 4000, [0.0, 0.0]).expect("bench container");
    for _ in 0..count {
        let r = rng.random_range(5.0..20.0);
        let center = [rng.random_range(r..4000.0 - r), rng.random_range(r..4000.0 - r)];
        let v = [rng.random_range(-8.0..8.0), rng.random_range(-8.0..8.0)];
        let p = Particle::new(r, rng.random_range(1.0..10.0), center, v, Colour::random(&mut rng))
            .expect("bench particle");
        c.add_particle(p);
    }
    c
}

fn bench_candidate_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_pairs");
    for count in [50usize, 200, 800] {
        let container = scene(count);
        let mut detectors: Vec<Box<dyn CollisionDetector>> = vec![
            Box::new(BruteForce),
            Box::new(SweepDetector::new(16).expect("sections")),
            Box::new(KdTreeDetector::new()),
        ];
        for det in &mut detectors {
            group.bench_with_input(BenchmarkId::new(det.name(), count), &container, |b, cont| {
                b.iter(|| det.candidate_pairs(black_box(cont)).map(|p| p.len()))
            });
        }
    }
    group.finish();
}

fn bench_full_tick(c: &mut Criterion) {
    let base = scene(400);
    c.bench_function("tick_sweep_400", |b| {
        let mut sweep = SweepDetector::new(16).expect("sections");
        b.iter(|| {
            let mut cont = base.clone();
            cont.update(60).expect("tick");
            black_box(sweep.update(&mut cont, 60).expect("collisions"))
        })
    });
}

criterion_group!(benches, bench_candidate_pairs, bench_full_tick);
criterion_main!(benches);
