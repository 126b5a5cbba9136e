use criterion::Criterion;
use neatrain::{
    crossover::{compatibility, crossover, disjoint_excess_count, Coefficients},
    Comparator, Genome, InnovationLedger, WyRng,
};

fn grown(count: usize, rng: &mut WyRng) -> (Vec<Genome>, InnovationLedger) {
    let mut genomes = (0..count)
        .map(|id| Genome::new(id, 8, 4, rng))
        .collect::<Vec<_>>();
    let mut ledger = InnovationLedger::from_genome(&genomes[0]);
    for genome in genomes.iter_mut() {
        for _ in 0..200 {
            genome.add_neuron(0.2, 5, &mut ledger, rng).unwrap();
            genome.add_link(0.6, 0.05, 5, 5, &mut ledger, rng);
        }
        genome.sort_genes();
    }
    (genomes, ledger)
}

fn bench_crossover(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0xC0FFEE);
    let (mut genomes, ledger) = grown(2, &mut rng);
    genomes[0].score = 2.;
    genomes[1].score = 1.;
    let (l, r) = (&genomes[0], &genomes[1]);

    bench.bench_function("crossover-ne", |b| {
        b.iter(|| crossover(l, r, Comparator::default(), &ledger, 2, &mut rng))
    });

    let (mut l_eq, mut r_eq) = (l.clone(), r.clone());
    l_eq.score = 1.;
    r_eq.score = 1.;
    bench.bench_function("crossover-eq", |b| {
        b.iter(|| crossover(&l_eq, &r_eq, Comparator::default(), &ledger, 2, &mut rng))
    });

    bench.bench_function("disjoint-excess-count", |b| {
        b.iter(|| disjoint_excess_count(l.links(), r.links()))
    });

    let coefficients = Coefficients::default();
    bench.bench_function("compatibility", |b| {
        b.iter(|| compatibility(l, r, &coefficients))
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
    bench_crossover(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
