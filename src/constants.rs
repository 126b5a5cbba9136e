//! Centralized defaults for NEAT evolution parameters.
//!
//! All tunables are defined here with the `NEAT_` prefix and feed
//! [NeatConfig::default](crate::population::NeatConfig).

// ============================================================================
// Weight & Activation Mutation
// ============================================================================

/// Probability of mutating each individual link weight
pub const NEAT_MUTATION_RATE: f64 = 0.2;

/// Probability that a mutated weight is replaced rather than perturbed
pub const NEAT_PROBABILITY_WEIGHT_REPLACED: f64 = 0.1;

/// Largest perturbation applied to a weight in a single mutation
pub const NEAT_MAX_WEIGHT_PERTURBATION: f64 = 0.5;

/// Probability of mutating each individual neuron's activation response
pub const NEAT_ACTIVATION_MUTATION_RATE: f64 = 0.1;

/// Largest perturbation applied to an activation response in a single mutation
pub const NEAT_MAX_ACTIVATION_PERTURBATION: f64 = 0.1;

// ============================================================================
// Structural Mutation
// ============================================================================

/// Probability of attempting to add a link to a child genome
pub const NEAT_CHANCE_ADD_LINK: f64 = 0.07;

/// Given a link is being added, probability that it is a self loop
pub const NEAT_CHANCE_ADD_RECURRENT_LINK: f64 = 0.05;

/// Attempts made to find a neuron eligible for a self loop
pub const NEAT_NUM_TRIES_TO_FIND_LOOPED_LINK: usize = 5;

/// Attempts made to find an unconnected neuron pair
pub const NEAT_NUM_ADD_LINK_ATTEMPTS: usize = 5;

/// Probability of attempting to split a link with a new neuron
pub const NEAT_CHANCE_ADD_NODE: f64 = 0.04;

/// Attempts made to find a splittable link
pub const NEAT_NUM_TRIES_TO_FIND_OLD_LINK: usize = 5;

/// Genomes at or above this many neurons no longer grow new ones
pub const NEAT_MAX_PERMITTED_NEURONS: usize = 100;

/// Links beyond `inputs + outputs` under which splitting favours older links
pub const NEAT_OLD_LINK_SIZE_MARGIN: usize = 10;

// ============================================================================
// Reproduction
// ============================================================================

/// Probability that a multi-member specie produces offspring through crossover
pub const NEAT_CROSSOVER_RATE: f64 = 0.7;

/// Top fraction of a specie eligible to parent offspring
pub const NEAT_SURVIVAL_RATE: f64 = 0.2;

/// Attempts made to find a second, distinct parent before falling back to cloning
pub const NEAT_CROSSOVER_PARENT_ATTEMPTS: usize = 5;

/// Tournament size is the population size divided by this
pub const NEAT_TOURNAMENT_DIVISOR: usize = 5;

// ============================================================================
// Speciation
// ============================================================================

/// Initial compatibility distance under which a genome joins a specie
pub const NEAT_COMPATIBILITY_THRESHOLD: f64 = 0.26;

/// Step by which the compatibility threshold adapts to the specie count
pub const NEAT_COMPATIBILITY_THRESHOLD_STEP: f64 = 0.01;

/// Specie count the threshold adapts toward, 0 disables adaptation
pub const NEAT_MAX_NUMBER_OF_SPECIES: usize = 0;

/// Coefficient for excess genes in compatibility distance calculation
pub const NEAT_EXCESS_COEFFICIENT: f64 = 1.0;

/// Coefficient for disjoint genes in compatibility distance calculation
pub const NEAT_DISJOINT_COEFFICIENT: f64 = 1.0;

/// Coefficient for average matched weight difference in compatibility distance calculation
pub const NEAT_MATCHED_COEFFICIENT: f64 = 0.4;

// ============================================================================
// Specie Ageing
// ============================================================================

/// Generations without improvement before a specie may be culled
pub const NEAT_NUM_GENS_ALLOWED_NO_IMPROVEMENT: usize = 15;

/// Species younger than this receive a score bonus
pub const NEAT_YOUNG_BONUS_AGE_THRESHOLD: usize = 10;

/// Fractional bonus for young species
pub const NEAT_YOUNG_SCORE_BONUS: f64 = 0.3;

/// Species older than this receive a score penalty
pub const NEAT_OLD_AGE_THRESHOLD: usize = 50;

/// Fractional penalty for old species
pub const NEAT_OLD_AGE_PENALTY: f64 = 0.3;

// ============================================================================
// Genome Defaults
// ============================================================================

/// Activation response of a freshly created neuron
pub const NEAT_DEFAULT_ACTIVATION_RESPONSE: f64 = 1.0;

/// Steepness used by the steepened sigmoid
pub const NEAT_SIGMOID_STEEPNESS: f64 = 4.9;
