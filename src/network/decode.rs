//! Genome to network decoding. Decoding is one way, a network can't be encoded
//! back into a genome.

use super::{Activation, Network, NetworkLink, NetworkNeuron};
use crate::{
    error::{NeatError, Result},
    genome::{Genome, NeuronKind},
    population::NeatConfig,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoder {
    /// applied by every hidden and output neuron
    pub activation: Activation,
    /// applied over the output layer as a whole
    pub output_activation: Activation,
    /// iterate each computation once per network depth, letting signals settle
    /// through recurrent links
    pub snapshot: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            activation: Activation::SteepSigmoid,
            output_activation: Activation::Linear,
            snapshot: false,
        }
    }
}

impl Decoder {
    pub fn from_config(config: &NeatConfig) -> Self {
        Self {
            activation: config.activation,
            output_activation: config.output_activation,
            snapshot: config.snapshot,
        }
    }

    /// Build the network a genome describes. Neurons are ordered by depth with
    /// the bias first, and only enabled links are kept.
    pub fn decode(&self, genome: &Genome) -> Result<Network> {
        let genes = genome.neurons();
        if genes.first().map(|n| n.kind()) != Some(NeuronKind::Bias) {
            return Err(NeatError::BiasNotFirst);
        }

        let mut order = (0..genes.len()).collect::<Vec<_>>();
        order[1..].sort_by(|&l, &r| genes[l].split_y.total_cmp(&genes[r].split_y));

        let index = order
            .iter()
            .enumerate()
            .map(|(idx, &gene)| (genes[gene].id(), idx))
            .collect::<FxHashMap<_, _>>();

        let resolve = |neuron: usize| {
            index
                .get(&neuron)
                .copied()
                .ok_or(NeatError::UnknownNeuron { neuron })
        };
        let mut links = genome
            .links()
            .iter()
            .filter(|l| l.enabled)
            .map(|l| -> Result<NetworkLink> {
                Ok(NetworkLink {
                    from: resolve(l.from())?,
                    to: resolve(l.to())?,
                    weight: l.weight,
                    recurrent: l.recurrent,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        links.sort_by(|l, r| {
            (l.from, l.to)
                .cmp(&(r.from, r.to))
                .then(l.weight.total_cmp(&r.weight))
        });

        let mut neurons = order
            .iter()
            .map(|&gene| NetworkNeuron {
                id: genes[gene].id(),
                kind: genes[gene].kind(),
                activation_response: genes[gene].activation_response,
                split_y: genes[gene].split_y,
                inbound: vec![],
                outbound: vec![],
            })
            .collect::<Vec<_>>();
        for (idx, link) in links.iter().enumerate() {
            neurons[link.to].inbound.push(idx);
            neurons[link.from].outbound.push(idx);
        }

        let activations = neurons
            .iter()
            .map(|n| {
                if n.kind.is_sensor() {
                    Activation::Linear
                } else {
                    self.activation
                }
            })
            .collect();

        let depth = {
            let mut depths = neurons.iter().map(|n| n.split_y).collect::<Vec<_>>();
            depths.sort_by(f64::total_cmp);
            depths.dedup();
            depths.len()
        };

        Ok(Network::new(
            neurons,
            links,
            activations,
            self.output_activation,
            genome.inputs(),
            genome.outputs(),
            depth,
            if self.snapshot { depth } else { 1 },
        ))
    }

    /// Always fails, networks hold no innovation history to rebuild a genome from
    pub fn encode(&self, _network: &Network) -> Result<Genome> {
        Err(NeatError::Unsupported(
            "encoding a network back into a genome",
        ))
    }
}
