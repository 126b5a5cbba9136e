use super::{Genome, LinkGene, NeuronGene, NeuronKind};
use crate::{
    constants::NEAT_OLD_LINK_SIZE_MARGIN,
    error::{NeatError, Result},
    innovation::{InnovationKind, InnovationLedger},
    population::NeatConfig,
    random::Happens,
};
use rand::Rng;
use tracing::trace;

impl Genome {
    /// Run every mutation operator at the rates `config` sets. Genomes at the
    /// neuron cap no longer grow new neurons.
    pub fn mutate(
        &mut self,
        config: &NeatConfig,
        ledger: &mut InnovationLedger,
        rng: &mut impl Rng,
    ) -> Result<()> {
        if self.neurons.len() < config.max_permitted_neurons {
            self.add_neuron(
                config.chance_add_node,
                config.num_tries_to_find_old_link,
                ledger,
                rng,
            )?;
        }
        self.add_link(
            config.chance_add_link,
            config.chance_add_recurrent_link,
            config.num_tries_to_find_looped_link,
            config.num_add_link_attempts,
            ledger,
            rng,
        );
        self.mutate_weights(
            config.mutation_rate,
            config.probability_weight_replaced,
            config.max_weight_perturbation,
            rng,
        );
        self.mutate_activation_response(
            config.activation_mutation_rate,
            config.max_activation_perturbation,
            rng,
        );
        Ok(())
    }

    /// With probability `mutation_rate`, add one link. With probability
    /// `loop_chance` that link is a self loop on a hidden or output neuron,
    /// otherwise it joins two distinct neurons who aren't yet linked and whose
    /// target is neither an input nor the bias.
    ///
    /// Returns whether a link was added. Failing to find a candidate within the
    /// try budget is expected, and leaves the genome untouched.
    pub fn add_link(
        &mut self,
        mutation_rate: f64,
        loop_chance: f64,
        max_loop_tries: usize,
        max_link_tries: usize,
        ledger: &mut InnovationLedger,
        rng: &mut impl Rng,
    ) -> bool {
        if !rng.happens(mutation_rate) {
            return false;
        }

        let Some((from, to)) = (if rng.happens(loop_chance) {
            self.open_loop(max_loop_tries, rng)
        } else {
            self.open_path(max_link_tries, rng)
        }) else {
            trace!(genome = self.id, "no open path for a new link");
            return false;
        };

        let (from_id, to_id) = (self.neurons[from].id(), self.neurons[to].id());
        let recurrent = from == to || self.neurons[from].split_y >= self.neurons[to].split_y;
        if from == to {
            self.neurons[from].recurrent = true;
        }

        let inno = ledger.link_or_create(from_id, to_id);
        self.links
            .push(LinkGene::new(inno, from_id, to_id, rng.clamped(), recurrent));
        true
    }

    /// index of a neuron that may receive a self loop
    fn open_loop(&self, tries: usize, rng: &mut impl Rng) -> Option<(usize, usize)> {
        (0..tries).find_map(|_| {
            let idx = rng.random_range(0..self.neurons.len());
            let n = &self.neurons[idx];
            (!n.recurrent && !n.kind().is_sensor() && !self.is_duplicate_link(n.id(), n.id()))
                .then_some((idx, idx))
        })
    }

    /// indices of an unlinked pair of distinct neurons
    fn open_path(&self, tries: usize, rng: &mut impl Rng) -> Option<(usize, usize)> {
        (0..tries).find_map(|_| {
            let from = rng.random_range(0..self.neurons.len());
            let to = rng.random_range(0..self.neurons.len());
            (from != to
                && !self.neurons[to].kind().is_sensor()
                && !self.is_duplicate_link(self.neurons[from].id(), self.neurons[to].id()))
            .then_some((from, to))
        })
    }

    /// With probability `mutation_rate`, split an enabled, non recurrent link who
    /// doesn't leave the bias. The link is disabled and replaced by a new hidden
    /// neuron at its midpoint, fed by a link of weight 1 and feeding forward
    /// through a link carrying the original weight.
    ///
    /// Small genomes favour their older links when choosing which to split.
    /// If the ledger already records a split of this link whose neuron the genome
    /// doesn't carry, its ids are reused, otherwise a fresh neuron is recorded.
    pub fn add_neuron(
        &mut self,
        mutation_rate: f64,
        max_old_link_tries: usize,
        ledger: &mut InnovationLedger,
        rng: &mut impl Rng,
    ) -> Result<bool> {
        if self.links.is_empty() || !rng.happens(mutation_rate) {
            return Ok(false);
        }

        let Some(chosen) = self.old_link(max_old_link_tries, rng) else {
            trace!(genome = self.id, "no link eligible for a split");
            return Ok(false);
        };

        self.links[chosen].disable();
        let (from, to) = self.links[chosen].path();
        let weight = self.links[chosen].weight;
        let (split_x, split_y) = {
            let l = self
                .neuron(from)
                .ok_or(NeatError::UnknownNeuron { neuron: from })?;
            let r = self
                .neuron(to)
                .ok_or(NeatError::UnknownNeuron { neuron: to })?;
            ((l.split_x + r.split_x) / 2., (l.split_y + r.split_y) / 2.)
        };

        let reused = ledger
            .splits(from, to)
            .filter_map(|inno| inno.neuron_id)
            .find(|&id| !self.has_neuron(id));

        let (neuron, inno_in, inno_out) = match reused {
            Some(neuron) => {
                let inno_in = ledger
                    .check_innovation(from, neuron, InnovationKind::NewLink)
                    .ok_or(NeatError::MissingLinkInnovation { from, to: neuron })?
                    .id;
                let inno_out = ledger
                    .check_innovation(neuron, to, InnovationKind::NewLink)
                    .ok_or(NeatError::MissingLinkInnovation { from: neuron, to })?
                    .id;
                (neuron, inno_in, inno_out)
            }
            None => {
                let neuron = ledger.create_neuron(from, to, NeuronKind::Hidden, split_x, split_y);
                (
                    neuron,
                    ledger.create_link(from, neuron),
                    ledger.create_link(neuron, to),
                )
            }
        };

        self.neurons
            .push(NeuronGene::new(neuron, NeuronKind::Hidden, split_x, split_y));
        self.links
            .push(LinkGene::new(inno_in, from, neuron, 1., false));
        self.links
            .push(LinkGene::new(inno_out, neuron, to, weight, false));
        Ok(true)
    }

    /// index of a splittable link
    fn old_link(&self, tries: usize, rng: &mut impl Rng) -> Option<usize> {
        let count = self.links.len();
        let upper = if count < self.inputs + self.outputs + NEAT_OLD_LINK_SIZE_MARGIN {
            (count - 1).saturating_sub((count as f64).sqrt() as usize)
        } else {
            count - 1
        };

        (0..tries).find_map(|_| {
            let idx = rng.random_range(0..=upper);
            let link = &self.links[idx];
            (link.enabled
                && !link.recurrent
                && self
                    .neuron(link.from())
                    .is_some_and(|n| n.kind() != NeuronKind::Bias))
            .then_some(idx)
        })
    }

    /// For each link, with probability `mutate_rate` either replace its weight
    /// outright (with probability `prob_full_replace`) or nudge it by up to
    /// `max_perturbation`
    pub fn mutate_weights(
        &mut self,
        mutate_rate: f64,
        prob_full_replace: f64,
        max_perturbation: f64,
        rng: &mut impl Rng,
    ) {
        for link in self.links.iter_mut() {
            if rng.happens(mutate_rate) {
                if rng.happens(prob_full_replace) {
                    link.weight = rng.clamped();
                } else {
                    link.weight += rng.clamped() * max_perturbation;
                }
            }
        }
    }

    /// For each neuron, with probability `mutate_rate` nudge its activation
    /// response by up to `max_perturbation`
    pub fn mutate_activation_response(
        &mut self,
        mutate_rate: f64,
        max_perturbation: f64,
        rng: &mut impl Rng,
    ) {
        for neuron in self.neurons.iter_mut() {
            if rng.happens(mutate_rate) {
                neuron.activation_response += rng.clamped() * max_perturbation;
            }
        }
    }
}
