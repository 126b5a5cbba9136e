#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

use approx::relative_eq;
use core::{f64, ops::ControlFlow};
use neatrain::{
    default_rng, Activation, EvolutionHooks, EvolutionTarget, NeatConfig, Network, Persist,
    Population, Stats, Trainer,
};
use tracing::info;

const POPULATION: usize = 150;
const TARGET: f64 = 400.;

macro_rules! eval_pair {
    ($pair:expr, $want:expr, ($network:ident $state:ident $fit:ident)) => {{
        let v = $network.compute_with(&mut $state, &$pair)[0];
        if relative_eq!(v, $want, epsilon = 0.05) {
            $fit += 100.;
        } else if (-1. ..=2.).contains(&v) {
            $fit -= ($want - v).abs();
        } else {
            $fit -= v.abs() * v.abs();
        }
        $state.flush();
    }};
}

fn xor(network: &Network) -> f64 {
    let mut state = network.state();
    let mut fit = 0.;

    eval_pair!([0., 0.], 0., (network state fit));
    eval_pair!([1., 1.], 0., (network state fit));
    eval_pair!([1., 0.], 1., (network state fit));
    eval_pair!([0., 1.], 1., (network state fit));

    fit
}

fn hook(stats: &mut Stats<'_>) -> ControlFlow<()> {
    if stats.generation % 25 == 1 {
        if let Some(fittest) = stats.fittest() {
            info!(
                generation = stats.generation,
                score = fittest.score,
                species = stats.species().len(),
                "fittest"
            );
        }
    }

    if stats.any_fitter_than(TARGET - f64::EPSILON) {
        if let Some(fittest) = stats.fittest() {
            info!(generation = stats.generation, score = fittest.score, "target met");
            let path = std::env::temp_dir().join(format!("xor-{}.json", stats.generation));
            if let Err(e) = fittest.to_file(&path) {
                tracing::error!(error = %e, "could not save the fittest genome");
            }
        }
        return ControlFlow::Break(());
    }

    ControlFlow::Continue(())
}

fn main() -> neatrain::Result<()> {
    tracing_subscriber::fmt::init();

    let config = NeatConfig {
        activation: Activation::SteepSigmoid,
        output_activation: Activation::Linear,
        snapshot: true,
        ..NeatConfig::default()
    };
    let mut rng = default_rng();
    let population = Population::new(2, 1, POPULATION, config, &mut rng)?;
    let mut trainer = Trainer::new(population, xor, rng)?;

    let stopped = trainer.run(
        EvolutionTarget::Generation(1000),
        &mut EvolutionHooks::new(vec![Box::new(hook)]),
    )?;
    info!(
        generation = stopped,
        best = trainer.best_score(),
        "finished"
    );
    if let Some(network) = trainer.best_network()? {
        for pair in [[0., 0.], [0., 1.], [1., 0.], [1., 1.]] {
            info!(?pair, output = network.compute(&pair)[0]);
        }
    }
    Ok(())
}
