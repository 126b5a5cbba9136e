use criterion::{BatchSize, Criterion};
use neatrain::{Genome, InnovationLedger, NeatConfig, WyRng};

fn bench_mutate(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0xBEEF);
    let mut genome = Genome::new(0, 8, 4, &mut rng);
    let mut ledger = InnovationLedger::from_genome(&genome);
    for _ in 0..100 {
        genome.add_neuron(0.2, 5, &mut ledger, &mut rng).unwrap();
        genome.add_link(0.6, 0.05, 5, 5, &mut ledger, &mut rng);
    }
    genome.sort_genes();

    bench.bench_function("genome-mutate-connection", |b| {
        b.iter_batched_ref(
            || genome.clone(),
            |g| g.add_link(1., 0.05, 5, 5, &mut ledger, &mut rng),
            BatchSize::SmallInput,
        )
    });

    bench.bench_function("genome-mutate-bisection", |b| {
        b.iter_batched_ref(
            || genome.clone(),
            |g| g.add_neuron(1., 5, &mut ledger, &mut rng),
            BatchSize::SmallInput,
        )
    });

    bench.bench_function("genome-mutate-weights", |b| {
        b.iter_batched_ref(
            || genome.clone(),
            |g| g.mutate_weights(0.2, 0.1, 0.5, &mut rng),
            BatchSize::SmallInput,
        )
    });

    let config = NeatConfig::default();
    bench.bench_function("genome-mutate", |b| {
        b.iter_batched_ref(
            || genome.clone(),
            |g| g.mutate(&config, &mut ledger, &mut rng),
            BatchSize::SmallInput,
        )
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_mutate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
