//! The run-wide historical record of structural change. Every new link and every
//! link split is logged once, so that genomes which evolve the same structure
//! independently carry the same innovation ids and line up during crossover.

use crate::{
    error::{NeatError, Result},
    genome::{Genome, NeuronGene, NeuronKind},
};
use core::cmp::max;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A monotonically increasing id source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGen {
    head: usize,
}

impl IdGen {
    pub fn new(head: usize) -> Self {
        Self { head }
    }

    /// the id that the next call to [IdGen::next] will hand out
    #[inline]
    pub fn peek(&self) -> usize {
        self.head
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> usize {
        let n = self.head;
        self.head += 1;
        n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InnovationKind {
    NewLink,
    NewNeuron,
}

/// One permanent entry in the ledger. Neurons of the initial topology are
/// recorded with no endpoints, neurons created by splitting a link carry that
/// link's endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Innovation {
    pub id: usize,
    pub kind: InnovationKind,
    pub from: Option<usize>,
    pub to: Option<usize>,
    /// set only for [InnovationKind::NewNeuron]
    pub neuron_id: Option<usize>,
    pub neuron_kind: NeuronKind,
    pub split_x: f64,
    pub split_y: f64,
}

/// Append-only log of innovations for one training run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Innovation>", into = "Vec<Innovation>")]
pub struct InnovationLedger {
    records: Vec<Innovation>,
    structural: FxHashMap<(usize, usize, InnovationKind), Vec<usize>>,
    neurons: FxHashMap<usize, usize>,
    innovation_ids: IdGen,
    neuron_ids: IdGen,
}

impl InnovationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger from the topology every genome of a run starts with. The
    /// genome's neuron ids double as the innovation ids of those neurons, so they
    /// must not collide with its link innovation ids, as [Genome::new] guarantees
    pub fn from_genome(genome: &Genome) -> Self {
        let mut records = Vec::with_capacity(genome.neurons().len() + genome.links().len());
        for n in genome.neurons() {
            records.push(Innovation {
                id: n.id(),
                kind: InnovationKind::NewNeuron,
                from: None,
                to: None,
                neuron_id: Some(n.id()),
                neuron_kind: n.kind(),
                split_x: n.split_x,
                split_y: n.split_y,
            });
        }
        for l in genome.links() {
            debug_assert!(
                genome.neurons().iter().all(|n| n.id() != l.inno()),
                "link innovation {} collides with a neuron id",
                l.inno()
            );
            records.push(Innovation {
                id: l.inno(),
                kind: InnovationKind::NewLink,
                from: Some(l.from()),
                to: Some(l.to()),
                neuron_id: None,
                neuron_kind: NeuronKind::None,
                split_x: 0.,
                split_y: 0.,
            });
        }
        records.into()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Innovation> {
        self.records.iter()
    }

    /// The id the next newly created neuron will receive
    #[inline]
    pub fn next_neuron_id(&self) -> usize {
        self.neuron_ids.peek()
    }

    /// The id the next innovation will receive
    #[inline]
    pub fn next_innovation_id(&self) -> usize {
        self.innovation_ids.peek()
    }

    /// The earliest innovation recorded for this structural change, if any
    pub fn check_innovation(
        &self,
        from: usize,
        to: usize,
        kind: InnovationKind,
    ) -> Option<&Innovation> {
        self.structural
            .get(&(from, to, kind))
            .and_then(|idx| idx.first())
            .map(|&idx| &self.records[idx])
    }

    /// Every neuron innovation recorded for a split of `from -> to`, oldest first
    pub fn splits(&self, from: usize, to: usize) -> impl Iterator<Item = &Innovation> {
        self.structural
            .get(&(from, to, InnovationKind::NewNeuron))
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }

    /// Record a new link `from -> to`, returning its innovation id
    pub fn create_link(&mut self, from: usize, to: usize) -> usize {
        let id = self.innovation_ids.next();
        self.push(Innovation {
            id,
            kind: InnovationKind::NewLink,
            from: Some(from),
            to: Some(to),
            neuron_id: None,
            neuron_kind: NeuronKind::None,
            split_x: 0.,
            split_y: 0.,
        });
        id
    }

    /// Record a new neuron splitting `from -> to`, returning the fresh neuron id
    /// assigned to it
    pub fn create_neuron(
        &mut self,
        from: usize,
        to: usize,
        kind: NeuronKind,
        split_x: f64,
        split_y: f64,
    ) -> usize {
        let id = self.innovation_ids.next();
        let neuron_id = self.neuron_ids.next();
        self.push(Innovation {
            id,
            kind: InnovationKind::NewNeuron,
            from: Some(from),
            to: Some(to),
            neuron_id: Some(neuron_id),
            neuron_kind: kind,
            split_x,
            split_y,
        });
        neuron_id
    }

    /// Innovation id of an existing link `from -> to`, or a freshly recorded one
    pub fn link_or_create(&mut self, from: usize, to: usize) -> usize {
        match self.check_innovation(from, to, InnovationKind::NewLink) {
            Some(inno) => inno.id,
            None => self.create_link(from, to),
        }
    }

    /// Materialize the neuron gene a neuron innovation describes
    pub fn create_neuron_from_id(&self, neuron: usize) -> Result<NeuronGene> {
        self.neurons
            .get(&neuron)
            .map(|&idx| {
                let inno = &self.records[idx];
                NeuronGene::new(neuron, inno.neuron_kind, inno.split_x, inno.split_y)
            })
            .ok_or(NeatError::MissingInnovation { neuron })
    }

    fn push(&mut self, inno: Innovation) {
        let idx = self.records.len();
        if let (Some(from), Some(to)) = (inno.from, inno.to) {
            self.structural
                .entry((from, to, inno.kind))
                .or_default()
                .push(idx);
        }
        if let Some(neuron) = inno.neuron_id {
            self.neurons.insert(neuron, idx);
        }
        self.records.push(inno);
    }
}

impl From<Vec<Innovation>> for InnovationLedger {
    fn from(records: Vec<Innovation>) -> Self {
        let mut ledger = Self::new();
        let (mut inno_head, mut neuron_head) = (0, 0);
        for inno in records {
            inno_head = max(inno_head, inno.id + 1);
            if let Some(neuron) = inno.neuron_id {
                neuron_head = max(neuron_head, neuron + 1);
            }
            ledger.push(inno);
        }
        ledger.innovation_ids = IdGen::new(inno_head);
        ledger.neuron_ids = IdGen::new(neuron_head);
        ledger
    }
}

impl From<InnovationLedger> for Vec<Innovation> {
    fn from(ledger: InnovationLedger) -> Self {
        ledger.records
    }
}
