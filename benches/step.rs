//! One propagation step over circuits of independent gates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digisim::circuit::GateKind;
use digisim::common::Vec2;
use digisim::layout::footprint::{gate, input};
use digisim::{Component, DependencyMap, Simulator};

// `gates` gates, each fed by its own pair of inputs, alternating AND and NAND
fn independent_gates(gates: usize) -> (Vec<Component>, DependencyMap) {
    let mut components = Vec::with_capacity(gates * 3);
    let mut sources = Vec::with_capacity(gates * 3);

    for index in 0..gates {
        let base = components.len();
        let kind = if index % 2 == 0 { GateKind::And } else { GateKind::Nand };

        components.push(input(Vec2::ZERO).with_state(index % 3 == 0));
        components.push(input(Vec2::ZERO).with_state(index % 5 == 0));
        components.push(gate(kind, Vec2::ZERO));

        sources.push(vec![]);
        sources.push(vec![]);
        sources.push(vec![base, base + 1]);
    }

    (components, DependencyMap::from_sources(sources))
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for gates in [1000, 2000, 3000, 4000] {
        let (components, map) = independent_gates(gates);
        let mut sim = Simulator::compile(&components, &map).expect("independent gates compile");

        group.bench_with_input(BenchmarkId::from_parameter(gates), &gates, |b, _| {
            b.iter(|| black_box(sim.step()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
