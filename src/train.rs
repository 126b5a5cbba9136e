//! The generational loop: score every genome, then breed the next generation,
//! until a target is met or a hook calls it off.

use crate::{
    error::{NeatError, Result},
    genome::Genome,
    network::{Decoder, Network},
    population::Population,
    random::WyRng,
    score::{Comparator, Score},
    specie::Species,
};
use core::ops::ControlFlow;
use rand::Rng;
use tracing::info;

pub enum EvolutionTarget {
    /// any genome of a generation scores at least this well
    Fitness(f64),
    /// this many generations have been bred
    Generation(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, stats: &Stats<'_>) -> bool {
        match self {
            Self::Fitness(t) => stats.fittest().is_some_and(|g| {
                !stats
                    .population
                    .comparator()
                    .is_better_than(*t, g.score)
            }),
            Self::Generation(t) => *t <= stats.generation,
        }
    }
}

/// A scored generation, handed to every hook
pub struct Stats<'a> {
    pub generation: usize,
    pub population: &'a Population,
}

impl Stats<'_> {
    /// Genomes of this generation are sorted best first by the time stats are
    /// taken
    pub fn fittest(&self) -> Option<&Genome> {
        self.population.genomes().first()
    }

    pub fn best_ever(&self) -> Option<&Genome> {
        self.population.best_ever()
    }

    /// Species carried over from the last breeding. Their member lists are
    /// empty until the next generation is speciated.
    pub fn species(&self) -> &[Species] {
        self.population.species()
    }

    pub fn any_fitter_than(&self, score: f64) -> bool {
        let cmp = self.population.comparator();
        self.population
            .genomes()
            .iter()
            .any(|g| cmp.is_better_than(g.score, score))
    }

    pub fn mean_score(&self) -> f64 {
        let genomes = self.population.genomes();
        genomes.iter().map(|g| g.score).sum::<f64>() / genomes.len().max(1) as f64
    }
}

pub type Hook = Box<dyn FnMut(&mut Stats<'_>) -> ControlFlow<()>>;

#[derive(Default)]
pub struct EvolutionHooks {
    hooks: Vec<Hook>,
}

impl EvolutionHooks {
    pub fn new(hooks: Vec<Hook>) -> Self {
        Self { hooks }
    }

    pub fn push(&mut self, hook: impl FnMut(&mut Stats<'_>) -> ControlFlow<()> + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Call every hook in order, stopping at the first to break
    pub fn fire(&mut self, stats: &mut Stats<'_>) -> ControlFlow<()> {
        for hook in self.hooks.iter_mut() {
            hook(stats)?;
        }
        ControlFlow::Continue(())
    }
}

/// Drives a [Population] with a [Score] function. One rng drives the whole run,
/// so a seeded rng reproduces it exactly.
pub struct Trainer<S, R = WyRng> {
    population: Population,
    score: S,
    decoder: Decoder,
    rng: R,
    generation: usize,
}

impl<S: Score, R: Rng> Trainer<S, R> {
    pub fn new(mut population: Population, score: S, rng: R) -> Result<Self> {
        if population.genomes().is_empty() {
            return Err(NeatError::EmptyPopulation);
        }
        population.set_comparator(Comparator::for_score(&score));
        let decoder = Decoder::from_config(population.config());
        Ok(Self {
            population,
            score,
            decoder,
            rng,
            generation: 0,
        })
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn into_population(self) -> Population {
        self.population
    }

    #[inline]
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Generations bred so far
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn best_genome(&self) -> Option<&Genome> {
        self.population.best_ever()
    }

    pub fn best_score(&self) -> f64 {
        self.population.best_ever_score()
    }

    /// Decode the best genome ever scored
    pub fn best_network(&self) -> Result<Option<Network>> {
        self.population
            .best_ever()
            .map(|g| self.decoder.decode(g))
            .transpose()
    }

    /// Score the current generation, sorting it best first. Every genome is
    /// decoded into its own network, in parallel with the `parallel` feature.
    pub fn evaluate(&mut self) -> Result<()> {
        let (decoder, score) = (&self.decoder, &self.score);
        let eval = |genome: &mut Genome| -> Result<()> {
            genome.score = score.calculate(&decoder.decode(genome)?);
            Ok(())
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.population
                .genomes_mut()
                .par_iter_mut()
                .try_for_each(eval)?;
        }
        #[cfg(not(feature = "parallel"))]
        self.population
            .genomes_mut()
            .iter_mut()
            .try_for_each(eval)?;

        if self.population.sort_and_record() {
            info!(
                generation = self.generation,
                score = self.population.best_ever_score(),
                "new best genome"
            );
        }
        Ok(())
    }

    /// Breed the next generation from the scored current one
    pub fn breed(&mut self) -> Result<()> {
        self.population.evolve(&mut self.rng)?;
        self.generation += 1;
        Ok(())
    }

    /// One full generation
    pub fn iteration(&mut self) -> Result<()> {
        self.evaluate()?;
        self.breed()
    }

    /// Iterate until `target` is met by a scored generation or a hook breaks,
    /// returning the generation the run stopped at. That generation is left
    /// scored and unbred.
    pub fn run(&mut self, target: EvolutionTarget, hooks: &mut EvolutionHooks) -> Result<usize> {
        loop {
            self.evaluate()?;
            let mut stats = Stats {
                generation: self.generation,
                population: &self.population,
            };
            if target.satisfied(&stats) || hooks.fire(&mut stats).is_break() {
                return Ok(self.generation);
            }
            self.breed()?;
        }
    }
}
