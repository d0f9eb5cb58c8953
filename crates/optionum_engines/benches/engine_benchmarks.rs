use criterion::{black_box, criterion_group, criterion_main, Criterion};
use optionum_core::types::{AveragingMethod, MarketParams, OptionType};
use optionum_engines::lattice::{AsianLattice, CrrLattice};
use optionum_engines::mc::{MonteCarlo, SimRng};
use optionum_engines::pde::{FiniteDifference, GridSpec, Scheme};

fn market(steps: usize) -> MarketParams {
    MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, steps).unwrap()
}

fn bench_lattice(c: &mut Criterion) {
    let tree = CrrLattice::new(market(200));
    c.bench_function("lattice_american_put_200", |b| {
        b.iter(|| black_box(tree.price(black_box(OptionType::AmericanPut))))
    });

    let asian = AsianLattice::new(market(12));
    c.bench_function("asian_lattice_american_put_12", |b| {
        b.iter(|| {
            black_box(asian.price(
                black_box(OptionType::AmericanPut),
                AveragingMethod::Arithmetic,
            ))
        })
    });
}

fn bench_pde(c: &mut Criterion) {
    let engine = FiniteDifference::new(market(200), GridSpec::new(100.0, 100).unwrap());
    c.bench_function("pde_implicit_american_put_100x200", |b| {
        b.iter(|| {
            black_box(
                engine
                    .price(black_box(OptionType::AmericanPut), Scheme::Implicit)
                    .unwrap(),
            )
        })
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let engine = MonteCarlo::new(market(5));
    c.bench_function("mc_american_put_10k", |b| {
        b.iter(|| {
            let mut rng = SimRng::from_seed(42);
            black_box(
                engine
                    .price(black_box(OptionType::AmericanPut), 10_000, &mut rng)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_lattice, bench_pde, bench_monte_carlo);
criterion_main!(benches);
