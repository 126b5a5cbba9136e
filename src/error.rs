//! Errors surfaced by genome operations, decoding, training and persistence.
//!
//! Mutation operators that fail to find a target are not errors; they report
//! `Ok(false)` and leave the genome untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeatError {
    /// A population was declared with zero genomes, or a trainer was handed none
    #[error("population must contain at least one genome")]
    EmptyPopulation,

    /// Decoding requires the bias neuron at index 0
    #[error("the first neuron must be the bias neuron, this genome is invalid")]
    BiasNotFirst,

    /// Crossover materializes neurons from the ledger, which must know them
    #[error("no neuron innovation recorded for neuron {neuron}")]
    MissingInnovation { neuron: usize },

    /// A reused neuron split must already have its two link innovations
    #[error("no link innovation recorded for {from} -> {to}")]
    MissingLinkInnovation { from: usize, to: usize },

    /// A link names a neuron its genome does not carry
    #[error("link references neuron {neuron}, which is absent from the genome")]
    UnknownNeuron { neuron: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = NeatError> = core::result::Result<T, E>;
