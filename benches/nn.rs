use criterion::Criterion;
use neatrain::{Decoder, Genome, InnovationLedger, WyRng};
use rand_distr::{Distribution, Uniform};

fn bench_nn(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0xD00D);
    let mut genome = Genome::new(0, 16, 4, &mut rng);
    let mut ledger = InnovationLedger::from_genome(&genome);
    for _ in 0..300 {
        genome.add_neuron(0.3, 5, &mut ledger, &mut rng).unwrap();
        genome.add_link(0.8, 0.1, 5, 5, &mut ledger, &mut rng);
    }
    genome.sort_genes();

    let dist = Uniform::new(-1., 1.).unwrap();
    let input = (0..16).map(|_| dist.sample(&mut rng)).collect::<Vec<f64>>();

    let decoder = Decoder::default();
    bench.bench_function("decode", |b| b.iter(|| decoder.decode(&genome)));

    let network = decoder.decode(&genome).unwrap();
    bench.bench_function("compute", |b| b.iter(|| network.compute(&input)));

    let mut state = network.state();
    bench.bench_function("compute-with", |b| {
        b.iter(|| network.compute_with(&mut state, &input))
    });

    let snapshot = Decoder {
        snapshot: true,
        ..Decoder::default()
    }
    .decode(&genome)
    .unwrap();
    bench.bench_function("compute-snapshot", |b| b.iter(|| snapshot.compute(&input)));
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
    bench_nn(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
