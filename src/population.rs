//! A population of genomes and everything shared between them over a run: the
//! innovation ledger, id generators and species.

use crate::{
    constants::*,
    crossover::{compatibility, crossover, Coefficients},
    error::{NeatError, Result},
    genome::Genome,
    innovation::{IdGen, InnovationLedger},
    network::Activation,
    random::Happens,
    score::Comparator,
    serde_traits::Persist,
    specie::Species,
};
use core::cmp::{max, Ordering};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Every tunable of a run. Missing fields take their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeatConfig {
    pub mutation_rate: f64,
    pub probability_weight_replaced: f64,
    pub max_weight_perturbation: f64,
    pub activation_mutation_rate: f64,
    pub max_activation_perturbation: f64,

    pub chance_add_link: f64,
    pub chance_add_recurrent_link: f64,
    pub num_tries_to_find_looped_link: usize,
    pub num_add_link_attempts: usize,
    pub chance_add_node: f64,
    pub num_tries_to_find_old_link: usize,
    pub max_permitted_neurons: usize,

    pub crossover_rate: f64,
    pub survival_rate: f64,

    pub compatibility_threshold: f64,
    /// species count the compatibility threshold adapts toward, 0 to keep it fixed
    pub max_number_of_species: usize,
    pub excess_coefficient: f64,
    pub disjoint_coefficient: f64,
    pub matched_coefficient: f64,

    pub num_gens_allowed_no_improvement: usize,
    pub young_bonus_age_threshold: usize,
    pub young_score_bonus: f64,
    pub old_age_threshold: usize,
    pub old_age_penalty: f64,

    pub activation: Activation,
    pub output_activation: Activation,
    pub snapshot: bool,
}

impl Default for NeatConfig {
    fn default() -> Self {
        Self {
            mutation_rate: NEAT_MUTATION_RATE,
            probability_weight_replaced: NEAT_PROBABILITY_WEIGHT_REPLACED,
            max_weight_perturbation: NEAT_MAX_WEIGHT_PERTURBATION,
            activation_mutation_rate: NEAT_ACTIVATION_MUTATION_RATE,
            max_activation_perturbation: NEAT_MAX_ACTIVATION_PERTURBATION,
            chance_add_link: NEAT_CHANCE_ADD_LINK,
            chance_add_recurrent_link: NEAT_CHANCE_ADD_RECURRENT_LINK,
            num_tries_to_find_looped_link: NEAT_NUM_TRIES_TO_FIND_LOOPED_LINK,
            num_add_link_attempts: NEAT_NUM_ADD_LINK_ATTEMPTS,
            chance_add_node: NEAT_CHANCE_ADD_NODE,
            num_tries_to_find_old_link: NEAT_NUM_TRIES_TO_FIND_OLD_LINK,
            max_permitted_neurons: NEAT_MAX_PERMITTED_NEURONS,
            crossover_rate: NEAT_CROSSOVER_RATE,
            survival_rate: NEAT_SURVIVAL_RATE,
            compatibility_threshold: NEAT_COMPATIBILITY_THRESHOLD,
            max_number_of_species: NEAT_MAX_NUMBER_OF_SPECIES,
            excess_coefficient: NEAT_EXCESS_COEFFICIENT,
            disjoint_coefficient: NEAT_DISJOINT_COEFFICIENT,
            matched_coefficient: NEAT_MATCHED_COEFFICIENT,
            num_gens_allowed_no_improvement: NEAT_NUM_GENS_ALLOWED_NO_IMPROVEMENT,
            young_bonus_age_threshold: NEAT_YOUNG_BONUS_AGE_THRESHOLD,
            young_score_bonus: NEAT_YOUNG_SCORE_BONUS,
            old_age_threshold: NEAT_OLD_AGE_THRESHOLD,
            old_age_penalty: NEAT_OLD_AGE_PENALTY,
            activation: Activation::SteepSigmoid,
            output_activation: Activation::Linear,
            snapshot: false,
        }
    }
}

impl NeatConfig {
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            excess: self.excess_coefficient,
            disjoint: self.disjoint_coefficient,
            matched: self.matched_coefficient,
        }
    }
}

impl Persist for NeatConfig {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    config: NeatConfig,
    comparator: Comparator,
    inputs: usize,
    outputs: usize,
    size: usize,
    /// current compatibility threshold, which may drift from the configured one
    threshold: f64,
    genomes: Vec<Genome>,
    species: Vec<Species>,
    ledger: InnovationLedger,
    genome_ids: IdGen,
    species_ids: IdGen,
    best_ever: Option<Genome>,
}

impl Population {
    /// `size` minimal genomes sharing one topology, each with its own random
    /// weights
    pub fn new(
        inputs: usize,
        outputs: usize,
        size: usize,
        config: NeatConfig,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if size == 0 {
            return Err(NeatError::EmptyPopulation);
        }

        let mut genome_ids = IdGen::default();
        let genomes = (0..size)
            .map(|_| Genome::new(genome_ids.next(), inputs, outputs, rng))
            .collect::<Vec<_>>();
        let ledger = InnovationLedger::from_genome(&genomes[0]);

        Ok(Self {
            threshold: config.compatibility_threshold,
            config,
            comparator: Comparator::default(),
            inputs,
            outputs,
            size,
            genomes,
            species: vec![],
            ledger,
            genome_ids,
            species_ids: IdGen::default(),
            best_ever: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &NeatConfig {
        &self.config
    }

    #[inline]
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn set_comparator(&mut self, comparator: Comparator) {
        self.comparator = comparator;
    }

    #[inline]
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn compatibility_threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Genomes are scored through here between generations
    #[inline]
    pub fn genomes_mut(&mut self) -> &mut [Genome] {
        &mut self.genomes
    }

    #[inline]
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    #[inline]
    pub fn ledger(&self) -> &InnovationLedger {
        &self.ledger
    }

    /// Best genome of any generation so far, as it was when scored
    #[inline]
    pub fn best_ever(&self) -> Option<&Genome> {
        self.best_ever.as_ref()
    }

    pub fn best_ever_score(&self) -> f64 {
        self.best_ever
            .as_ref()
            .map_or(self.comparator.worst_score(), |g| g.score)
    }

    /// Replace this generation of scored genomes with the next, unscored one
    pub fn evolve(&mut self, rng: &mut impl Rng) -> Result<()> {
        self.sort_and_record();
        self.reset_and_kill();
        self.speciate();
        self.calculate_spawn_levels();
        let offspring = self.reproduce(rng)?;

        debug!(
            species = self.species.len(),
            threshold = self.threshold,
            innovations = self.ledger.len(),
            best = self.best_ever_score(),
            "generation evolved"
        );
        self.genomes = offspring;
        for s in self.species.iter_mut() {
            s.clear_members();
        }
        Ok(())
    }

    /// Sort genomes best first, recording the best ever. Returns whether the
    /// best ever improved.
    pub fn sort_and_record(&mut self) -> bool {
        let cmp = self.comparator;
        self.genomes.sort_by(|l, r| cmp.compare(r.score, l.score));

        let Some(first) = self.genomes.first() else {
            return false;
        };
        let improved = self
            .best_ever
            .as_ref()
            .is_none_or(|best| cmp.is_better_than(first.score, best.score));
        if improved {
            self.best_ever = Some(first.clone());
        }
        improved
    }

    /// Purge every species' members and cull those who have stagnated
    pub fn reset_and_kill(&mut self) {
        let (threshold, best, cmp) = (
            self.config.num_gens_allowed_no_improvement,
            self.best_ever_score(),
            self.comparator,
        );
        for s in self.species.iter_mut() {
            s.purge();
        }

        let before = self.species.len();
        self.species.retain(|s| !s.is_stagnant(threshold, best, cmp));
        if self.species.len() < before {
            debug!(culled = before - self.species.len(), "culled stagnant species");
        }
    }

    /// Place each genome in the first species whose leader it is compatible
    /// with, founding new species for the rest. Genomes must be sorted best
    /// first. The threshold adapts to the surviving species before any genome is
    /// placed, and species left without members are dropped.
    pub fn speciate(&mut self) {
        self.adapt_threshold();
        let (cmp, coefficients) = (self.comparator, self.config.coefficients());
        for (idx, genome) in self.genomes.iter_mut().enumerate() {
            let found = self
                .species
                .iter_mut()
                .find(|s| compatibility(&*genome, &s.leader, &coefficients) <= self.threshold);
            match found {
                Some(s) => {
                    s.add_member(idx, genome, cmp);
                    genome.species_id = Some(s.id());
                }
                None => {
                    let id = self.species_ids.next();
                    self.species.push(Species::new(id, idx, genome));
                    genome.species_id = Some(id);
                }
            }
        }
        self.species.retain(|s| !s.is_empty());
    }

    /// Nudge the compatibility threshold toward `max_number_of_species`, going by
    /// the species that survived culling. A target of 0 keeps it fixed.
    fn adapt_threshold(&mut self) {
        let target = self.config.max_number_of_species;
        if target == 0 {
            return;
        }
        match self.species.len().cmp(&target) {
            Ordering::Greater => self.threshold += NEAT_COMPATIBILITY_THRESHOLD_STEP,
            Ordering::Less => {
                self.threshold = (self.threshold - NEAT_COMPATIBILITY_THRESHOLD_STEP)
                    .max(NEAT_COMPATIBILITY_THRESHOLD_STEP)
            }
            Ordering::Equal => (),
        }
    }

    /// Share each genome's strength among its species, and apportion the next
    /// generation's genomes in proportion to the shares
    pub fn calculate_spawn_levels(&mut self) {
        let cmp = self.comparator;
        let strengths = self
            .genomes
            .iter()
            .map(|g| cmp.strength(g.score))
            .collect::<Vec<_>>();
        let shift = -strengths.iter().copied().fold(0., f64::min);

        for s in self.species.iter() {
            for &idx in s.members() {
                self.genomes[idx].adjusted_score = s.adjusted(strengths[idx] + shift, &self.config);
            }
        }

        let average =
            self.genomes.iter().map(|g| g.adjusted_score).sum::<f64>() / self.genomes.len() as f64;
        for g in self.genomes.iter_mut() {
            g.amount_to_spawn = if average > 0. {
                g.adjusted_score / average
            } else {
                1.
            };
        }
        for s in self.species.iter_mut() {
            s.spawns_required = s
                .members()
                .iter()
                .map(|&idx| self.genomes[idx].amount_to_spawn)
                .sum();
        }
    }

    /// Breed the next generation. Each species in turn, best first, passes on its
    /// leader untouched then fills its remaining spawns by mutated clones or
    /// crossover. Any shortfall left by rounding is topped up by tournament.
    pub fn reproduce(&mut self, rng: &mut impl Rng) -> Result<Vec<Genome>> {
        let cmp = self.comparator;
        self.species
            .sort_by(|l, r| cmp.compare(r.best_score, l.best_score));

        let mut offspring: Vec<Genome> = Vec::with_capacity(self.size);
        'species: for s in self.species.iter() {
            for n in 0..s.num_to_spawn() {
                if offspring.len() >= self.size {
                    break 'species;
                }

                let id = self.genome_ids.next();
                if n == 0 {
                    let mut elite = s.leader.clone();
                    elite.set_id(id);
                    elite.reset_fitness();
                    offspring.push(elite);
                    continue;
                }

                let Some(mom) = s.choose_member(self.config.survival_rate, rng) else {
                    break;
                };
                let mut child = if s.len() > 1 && rng.happens(self.config.crossover_rate) {
                    let dad = (0..NEAT_CROSSOVER_PARENT_ATTEMPTS)
                        .filter_map(|_| s.choose_member(self.config.survival_rate, rng))
                        .find(|&dad| dad != mom);
                    match dad {
                        Some(dad) => crossover(
                            &self.genomes[mom],
                            &self.genomes[dad],
                            cmp,
                            &self.ledger,
                            id,
                            rng,
                        )?,
                        None => {
                            trace!(species = s.id(), "no distinct second parent, cloning");
                            self.genomes[mom].clone()
                        }
                    }
                } else {
                    self.genomes[mom].clone()
                };

                child.mutate(&self.config, &mut self.ledger, rng)?;
                child.set_id(id);
                child.sort_genes();
                child.reset_fitness();
                offspring.push(child);
            }
        }

        if offspring.len() < self.size {
            warn!(
                shortfall = self.size - offspring.len(),
                "spawn rounding left the generation short, topping up by tournament"
            );
            let k = max(1, self.genomes.len() / NEAT_TOURNAMENT_DIVISOR);
            while offspring.len() < self.size {
                let mut child = self.genomes[self.tournament(k, rng)].clone();
                child.set_id(self.genome_ids.next());
                child.reset_fitness();
                offspring.push(child);
            }
        }

        Ok(offspring)
    }

    /// Index of the best of `k` genomes drawn at random
    fn tournament(&self, k: usize, rng: &mut impl Rng) -> usize {
        let mut best = rng.random_range(0..self.genomes.len());
        for _ in 1..k {
            let other = rng.random_range(0..self.genomes.len());
            if self
                .comparator
                .is_better_than(self.genomes[other].score, self.genomes[best].score)
            {
                best = other;
            }
        }
        best
    }
}

impl Persist for Population {}
