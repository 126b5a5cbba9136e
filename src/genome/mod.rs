//! Genomes: a variable length pair of neuron and link genes describing one
//! candidate network topology.

pub mod link;
mod mutate;
pub mod neuron;

pub use link::LinkGene;
pub use neuron::{NeuronGene, NeuronKind};

use crate::{random::Happens, serde_traits::Persist};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Neurons are held bias first, then inputs, then outputs, then hidden neurons,
/// which falls out of ordering them by id. Links are held in innovation order
/// whenever the genome is at rest between mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    id: usize,
    neurons: Vec<NeuronGene>,
    links: Vec<LinkGene>,
    inputs: usize,
    outputs: usize,
    pub score: f64,
    pub adjusted_score: f64,
    pub amount_to_spawn: f64,
    pub species_id: Option<usize>,
}

impl Genome {
    /// A new genome of this type, with every sensor (the bias and each input)
    /// linked to every output at a random weight in `[-1, 1]`.
    ///
    /// Neuron ids are `0` for the bias, `1..=inputs` for the inputs and the
    /// following `outputs` ids for the outputs. Link innovation ids continue on
    /// from there, so every genome built with the same io shares them.
    pub fn new(id: usize, inputs: usize, outputs: usize, rng: &mut impl Rng) -> Self {
        let sensors = inputs + 1;
        let mut neurons = Vec::with_capacity(sensors + outputs);
        for i in 0..sensors {
            let kind = if i == 0 {
                NeuronKind::Bias
            } else {
                NeuronKind::Input
            };
            neurons.push(NeuronGene::new(
                i,
                kind,
                (i + 1) as f64 / (sensors + 1) as f64,
                0.,
            ));
        }
        for o in 0..outputs {
            neurons.push(NeuronGene::new(
                sensors + o,
                NeuronKind::Output,
                (o + 1) as f64 / (outputs + 1) as f64,
                1.,
            ));
        }

        let mut links = Vec::with_capacity(sensors * outputs);
        let mut inno = neurons.len();
        for o in sensors..sensors + outputs {
            for s in 0..sensors {
                links.push(LinkGene::new(inno, s, o, rng.clamped(), false));
                inno += 1;
            }
        }

        Self::from_parts(id, neurons, links, inputs, outputs)
    }

    /// Assemble a genome from existing genes
    pub fn from_parts(
        id: usize,
        neurons: Vec<NeuronGene>,
        links: Vec<LinkGene>,
        inputs: usize,
        outputs: usize,
    ) -> Self {
        Self {
            id,
            neurons,
            links,
            inputs,
            outputs,
            score: 0.,
            adjusted_score: 0.,
            amount_to_spawn: 0.,
            species_id: None,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn set_id(&mut self, id: usize) {
        self.id = id;
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
    pub fn neurons(&self) -> &[NeuronGene] {
        &self.neurons
    }

    #[inline]
    pub fn neurons_mut(&mut self) -> &mut [NeuronGene] {
        &mut self.neurons
    }

    #[inline]
    pub fn links(&self) -> &[LinkGene] {
        &self.links
    }

    #[inline]
    pub fn links_mut(&mut self) -> &mut [LinkGene] {
        &mut self.links
    }

    /// Number of link genes, the measure of genome size used throughout
    #[inline]
    pub fn num_genes(&self) -> usize {
        self.links.len()
    }

    pub fn neuron(&self, id: usize) -> Option<&NeuronGene> {
        self.neurons.iter().find(|n| n.id() == id)
    }

    #[inline]
    pub fn has_neuron(&self, id: usize) -> bool {
        self.neuron(id).is_some()
    }

    /// Whether any link, enabled or not, already joins `from -> to`
    pub fn is_duplicate_link(&self, from: usize, to: usize) -> bool {
        self.links.iter().any(|l| l.path() == (from, to))
    }

    /// Restore the at-rest ordering: links by innovation id, neurons by id
    pub fn sort_genes(&mut self) {
        self.links.sort_by_key(LinkGene::inno);
        self.neurons.sort_by_key(NeuronGene::id);
    }

    /// Overwrite every gene and score of ours with a deep copy of `other`'s
    pub fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Clear everything a previous generation's evaluation left behind
    pub fn reset_fitness(&mut self) {
        self.score = 0.;
        self.adjusted_score = 0.;
        self.amount_to_spawn = 0.;
        self.species_id = None;
    }
}

impl Persist for Genome {}
