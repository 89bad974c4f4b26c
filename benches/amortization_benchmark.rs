use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loan_simulator::amortization::engine::AmortizationEngine;
use loan_simulator::core::product::{LoanProduct, SimulationRequest};
use loan_simulator::registry::catalogue::ProductRegistry;
use rust_decimal_macros::dec;

fn bench_simulate_12_months(c: &mut Criterion) {
    let product = LoanProduct::new("bench", "Bench", dec!(0.24), 12);

    c.bench_function("simulate_12_months", |b| {
        b.iter(|| AmortizationEngine::simulate(black_box(&product), dec!(10000), 12))
    });
}

fn bench_simulate_360_months(c: &mut Criterion) {
    let product = LoanProduct::new("bench", "Bench", dec!(0.12), 360);

    c.bench_function("simulate_360_months", |b| {
        b.iter(|| AmortizationEngine::simulate(black_box(&product), dec!(350000), 360))
    });
}

fn bench_registry_simulate(c: &mut Criterion) {
    let registry = ProductRegistry::default();
    let request = SimulationRequest::new("cx-2", dec!(60000), 48);

    c.bench_function("registry_simulate_48_months", |b| {
        b.iter(|| registry.simulate(black_box(&request)))
    });
}

criterion_group!(
    benches,
    bench_simulate_12_months,
    bench_simulate_360_months,
    bench_registry_simulate
);
criterion_main!(benches);
