//! Executable networks decoded from [Genome](crate::genome::Genome)s.
//!
//! A [Network] is immutable once decoded. Every bit of evaluation state lives in
//! a [NetworkState], so one network may be computed from many threads at once,
//! each with its own state.

pub mod activate;
pub mod decode;

pub use activate::Activation;
pub use decode::Decoder;

use crate::{genome::NeuronKind, serde_traits::Persist};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNeuron {
    pub id: usize,
    pub kind: NeuronKind,
    pub activation_response: f64,
    pub split_y: f64,
    /// indices into [Network::links] of the links feeding this neuron
    pub inbound: Vec<usize>,
    /// indices into [Network::links] of the links this neuron feeds
    pub outbound: Vec<usize>,
}

/// A weighted link between two indices of [Network::neurons]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    pub recurrent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    neurons: Vec<NetworkNeuron>,
    links: Vec<NetworkLink>,
    activations: Vec<Activation>,
    output_activation: Activation,
    inputs: usize,
    outputs: usize,
    depth: usize,
    activation_cycles: usize,
}

/// Per neuron outputs of one evaluation of a [Network], carried between calls
/// so that recurrent links see the previous step
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    outputs: Vec<f64>,
}

impl NetworkState {
    pub fn new(neurons: usize) -> Self {
        Self {
            outputs: vec![0.; neurons],
        }
    }

    /// Forget every neuron's output
    pub fn flush(&mut self) {
        self.outputs.fill(0.);
    }

    #[inline]
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }
}

impl Network {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        neurons: Vec<NetworkNeuron>,
        links: Vec<NetworkLink>,
        activations: Vec<Activation>,
        output_activation: Activation,
        inputs: usize,
        outputs: usize,
        depth: usize,
        activation_cycles: usize,
    ) -> Self {
        Self {
            neurons,
            links,
            activations,
            output_activation,
            inputs,
            outputs,
            depth,
            activation_cycles,
        }
    }

    /// Neurons in evaluation order, the bias first
    #[inline]
    pub fn neurons(&self) -> &[NetworkNeuron] {
        &self.neurons
    }

    #[inline]
    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    #[inline]
    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    #[inline]
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Number of distinct neuron depths
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Passes made per [Network::compute_with]
    #[inline]
    pub fn activation_cycles(&self) -> usize {
        self.activation_cycles
    }

    /// A zeroed state sized for this network
    pub fn state(&self) -> NetworkState {
        NetworkState::new(self.neurons.len())
    }

    /// Evaluate from a fresh state
    pub fn compute(&self, input: &[f64]) -> Vec<f64> {
        self.compute_with(&mut self.state(), input)
    }

    /// Evaluate on top of `state`, leaving each neuron's output in it.
    ///
    /// Inputs are loaded in order, missing inputs read as 0 and extra inputs are
    /// ignored. Each pass visits neurons in order, so links from later neurons
    /// read the output of the previous pass or call. A state sized for another
    /// network is reset first.
    pub fn compute_with(&self, state: &mut NetworkState, input: &[f64]) -> Vec<f64> {
        if state.outputs.len() != self.neurons.len() {
            *state = self.state();
        }
        for _ in 0..self.activation_cycles {
            let mut sensed = input.iter().copied();
            for (idx, neuron) in self.neurons.iter().enumerate() {
                state.outputs[idx] = match neuron.kind {
                    NeuronKind::Bias => 1.,
                    NeuronKind::Input => sensed.next().unwrap_or(0.),
                    _ => {
                        let sum = neuron
                            .inbound
                            .iter()
                            .map(|&l| self.links[l].weight * state.outputs[self.links[l].from])
                            .sum::<f64>();
                        self.activations[idx].eval(sum / neuron.activation_response)
                    }
                };
            }
        }

        let mut out = self
            .neurons
            .iter()
            .zip(state.outputs.iter())
            .filter(|(n, _)| n.kind == NeuronKind::Output)
            .map(|(_, &v)| v)
            .collect::<Vec<_>>();
        self.output_activation.apply(&mut out);
        out
    }
}

impl Persist for Network {}
