//! Activation functions, applied per neuron and once more over the output layer.

use crate::constants::NEAT_SIGMOID_STEEPNESS;
use core::f64::consts::E;
use serde::{Deserialize, Serialize};

pub fn steep_sigmoid(x: f64) -> f64 {
    1. / (1. + E.powf(-NEAT_SIGMOID_STEEPNESS * x))
}

pub fn relu(x: f64) -> f64 {
    if x < 0. {
        0.
    } else {
        x
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    Linear,
    /// logistic curve steepened by [NEAT_SIGMOID_STEEPNESS]
    #[default]
    SteepSigmoid,
    Sigmoid,
    Tanh,
    Relu,
    Step,
    Gaussian,
    Sine,
    /// normalizes a whole layer, see [Activation::apply]
    Softmax,
}

impl Activation {
    /// Activate a single value. Softmax over a lone value is always 1.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::SteepSigmoid => steep_sigmoid(x),
            Self::Sigmoid => 1. / (1. + E.powf(-x)),
            Self::Tanh => x.tanh(),
            Self::Relu => relu(x),
            Self::Step => {
                if x > 0. {
                    1.
                } else {
                    0.
                }
            }
            Self::Gaussian => E.powf(-x * x),
            Self::Sine => x.sin(),
            Self::Softmax => 1.,
        }
    }

    /// Activate values in place
    pub fn apply(&self, values: &mut [f64]) {
        match self {
            Self::Linear => (),
            Self::Softmax => {
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let mut sum = 0.;
                for v in values.iter_mut() {
                    *v = (*v - max).exp();
                    sum += *v;
                }
                for v in values.iter_mut() {
                    *v /= sum;
                }
            }
            σ => {
                for v in values.iter_mut() {
                    *v = σ.eval(*v);
                }
            }
        }
    }
}
