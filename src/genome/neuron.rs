use crate::constants::NEAT_DEFAULT_ACTIVATION_RESPONSE;
use serde::{Deserialize, Serialize};

/// The role a neuron plays in a network. `None` marks innovations that describe
/// links rather than neurons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeuronKind {
    Input,
    Output,
    Hidden,
    Bias,
    None,
}

impl NeuronKind {
    /// Input and bias neurons are never the target of a link
    #[inline]
    pub fn is_sensor(&self) -> bool {
        matches!(self, Self::Input | Self::Bias)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronGene {
    id: usize,
    kind: NeuronKind,
    /// depth, 0 for sensors and 1 for outputs
    pub split_y: f64,
    /// width, used to place a neuron among its peers at the same depth
    pub split_x: f64,
    pub activation_response: f64,
    pub recurrent: bool,
}

impl NeuronGene {
    pub fn new(id: usize, kind: NeuronKind, split_x: f64, split_y: f64) -> Self {
        Self {
            id,
            kind,
            split_y,
            split_x,
            activation_response: NEAT_DEFAULT_ACTIVATION_RESPONSE,
            recurrent: false,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    /// Overwrite every mutable field with those of `other`, keeping our identity
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.id, other.id, "copying across neuron identities");
        self.split_y = other.split_y;
        self.split_x = other.split_x;
        self.activation_response = other.activation_response;
        self.recurrent = other.recurrent;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_neuron_defaults() {
        let n = NeuronGene::new(4, NeuronKind::Hidden, 0.5, 0.25);
        assert_eq!(n.id(), 4);
        assert_eq!(n.kind(), NeuronKind::Hidden);
        assert_eq!(n.activation_response, 1.);
        assert!(!n.recurrent);
    }

    #[test]
    fn test_copy_from_keeps_identity() {
        let mut n = NeuronGene::new(2, NeuronKind::Output, 0.5, 1.);
        let mut other = n.clone();
        other.activation_response = 0.3;
        other.recurrent = true;
        n.copy_from(&other);
        assert_eq!(n, other);
        assert_eq!(n.id(), 2);
    }

    #[test]
    fn test_sensor_kinds() {
        assert!(NeuronKind::Input.is_sensor());
        assert!(NeuronKind::Bias.is_sensor());
        assert!(!NeuronKind::Hidden.is_sensor());
        assert!(!NeuronKind::Output.is_sensor());
    }
}
