#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

pub mod constants;
pub mod crossover;
pub mod error;
pub mod genome;
pub mod innovation;
mod macros;
pub mod network;
pub mod population;
pub mod random;
pub mod score;
pub mod serde_traits;
pub mod specie;
pub mod train;

pub use error::{NeatError, Result};
pub use genome::{Genome, LinkGene, NeuronGene, NeuronKind};
pub use innovation::InnovationLedger;
pub use network::{activate, Activation, Decoder, Network, NetworkState};
pub use population::{NeatConfig, Population};
pub use random::{default_rng, Happens, WyRng};
pub use score::{Comparator, Minimize, Score};
pub use serde_traits::Persist;
pub use specie::Species;
pub use train::{EvolutionHooks, EvolutionTarget, Hook, Stats, Trainer};
