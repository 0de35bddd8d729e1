//! Connectivity resolution over randomly scattered parts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digisim::circuit::GateKind;
use digisim::common::Vec2;
use digisim::config::{CyclePolicy, SimulationConfig};
use digisim::layout::footprint::{gate, input, line, output};
use digisim::{Component, Resolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scattered(parts: usize, rng: &mut StdRng) -> Vec<Component> {
    (0..parts)
        .map(|_| {
            let at = Vec2(rng.gen_range(0..2000) as f64, rng.gen_range(0..2000) as f64);
            match rng.gen_range(0..5) {
                0 => input(at),
                1 => output(at),
                2 => gate(GateKind::And, at),
                3 => gate(GateKind::Nand, at),
                _ => line(at, at + Vec2(rng.gen_range(20..200) as f64, 0.)),
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("resolve");
    let config = SimulationConfig {
        cycle_policy: CyclePolicy::Ignore,
        ..Default::default()
    };

    for parts in [100, 200, 400] {
        let components = scattered(parts, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(parts), &components, |b, components| {
            // random layouts may fail to resolve
            b.iter(|| black_box(Resolver::new(components).with_config(config).resolve().is_ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
