use criterion::{BatchSize, Criterion};
use neatrain::{NeatConfig, Population, WyRng};
use rand::Rng;

fn scored(rng: &mut WyRng) -> Population {
    let mut population = Population::new(8, 4, 500, NeatConfig::default(), rng).unwrap();
    // a few generations in, so genomes have diverged
    for _ in 0..5 {
        for g in population.genomes_mut() {
            g.score = rng.random_range(0.0..100.);
        }
        population.evolve(rng).unwrap();
    }
    for g in population.genomes_mut() {
        g.score = rng.random_range(0.0..100.);
    }
    population
}

fn bench_speciate(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0x5EED);
    let population = scored(&mut rng);

    bench.bench_function("speciate", |b| {
        b.iter_batched_ref(
            || {
                let mut p = population.clone();
                p.sort_and_record();
                p.reset_and_kill();
                p
            },
            |p| p.speciate(),
            BatchSize::LargeInput,
        )
    });

    bench.bench_function("reproduce", |b| {
        b.iter_batched_ref(
            || {
                let mut p = population.clone();
                p.sort_and_record();
                p.reset_and_kill();
                p.speciate();
                p.calculate_spawn_levels();
                p
            },
            |p| p.reproduce(&mut rng),
            BatchSize::LargeInput,
        )
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(100)
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
    bench_speciate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
