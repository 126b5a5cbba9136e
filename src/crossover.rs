//! Historical-marking crossover and the compatibility distance used for
//! speciation. Both walk two link lists sorted by innovation id side by side.

use crate::{
    constants::{NEAT_DISJOINT_COEFFICIENT, NEAT_EXCESS_COEFFICIENT, NEAT_MATCHED_COEFFICIENT},
    error::Result,
    genome::{Genome, LinkGene, NeuronKind},
    innovation::InnovationLedger,
    score::Comparator,
};
use core::cmp::{max, Ordering};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weights of each term of the compatibility distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub excess: f64,
    pub disjoint: f64,
    pub matched: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            excess: NEAT_EXCESS_COEFFICIENT,
            disjoint: NEAT_DISJOINT_COEFFICIENT,
            matched: NEAT_MATCHED_COEFFICIENT,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Alignment {
    disjoint: usize,
    excess: usize,
    matched: usize,
    weight_diff: f64,
}

fn align(l: &[LinkGene], r: &[LinkGene]) -> Alignment {
    let mut a = Alignment::default();
    let (mut i, mut j) = (0, 0);
    loop {
        match (l.get(i), r.get(j)) {
            (Some(lc), Some(rc)) => match lc.inno().cmp(&rc.inno()) {
                Ordering::Equal => {
                    a.matched += 1;
                    a.weight_diff += (lc.weight - rc.weight).abs();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    a.disjoint += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    a.disjoint += 1;
                    j += 1;
                }
            },
            (Some(_), None) => {
                a.excess += l.len() - i;
                break;
            }
            (None, Some(_)) => {
                a.excess += r.len() - j;
                break;
            }
            (None, None) => break,
        }
    }
    a
}

/// Count of (disjoint, excess) genes between two innovation sorted link lists.
/// Excess genes lie beyond the other list's highest innovation id.
pub fn disjoint_excess_count(l: &[LinkGene], r: &[LinkGene]) -> (usize, usize) {
    let a = align(l, r);
    (a.disjoint, a.excess)
}

/// if genomes share no innovations, their average diff should be 0
pub fn avg_weight_diff(l: &[LinkGene], r: &[LinkGene]) -> f64 {
    let a = align(l, r);
    if a.matched == 0 {
        0.
    } else {
        a.weight_diff / a.matched as f64
    }
}

/// Distance between two genomes, smaller is more compatible. Both genomes must
/// have their links in innovation order.
pub fn compatibility(l: &Genome, r: &Genome, c: &Coefficients) -> f64 {
    let a = align(l.links(), r.links());
    let longest = max(max(l.num_genes(), r.num_genes()), 1) as f64;
    let avg = if a.matched == 0 {
        0.
    } else {
        a.weight_diff / a.matched as f64
    };
    (c.excess * a.excess as f64 + c.disjoint * a.disjoint as f64) / longest + c.matched * avg
}

/// Breed a child from two innovation sorted parents.
///
/// The better parent is chosen by score, then by fewer genes, then by a coin
/// flip. Matching genes come from either parent at random, disjoint and excess
/// genes only from the better parent. The child carries every non hidden neuron
/// of the better parent plus every neuron its links reference, materialized from
/// the ledger and carrying the activation response of the parent gene.
pub fn crossover(
    mom: &Genome,
    dad: &Genome,
    comparator: Comparator,
    ledger: &InnovationLedger,
    id: usize,
    rng: &mut impl Rng,
) -> Result<Genome> {
    let mom_best = match comparator.compare(mom.score, dad.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match mom.num_genes().cmp(&dad.num_genes()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => rng.random_bool(0.5),
        },
    };
    let best = if mom_best { mom } else { dad };

    let (l, r) = (mom.links(), dad.links());
    let (mut i, mut j) = (0, 0);
    let mut links: Vec<LinkGene> = Vec::with_capacity(best.num_genes());
    loop {
        let selected = match (l.get(i), r.get(j)) {
            (Some(lc), Some(rc)) => match lc.inno().cmp(&rc.inno()) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                    Some(if rng.random_bool(0.5) { lc } else { rc })
                }
                Ordering::Less => {
                    i += 1;
                    mom_best.then_some(lc)
                }
                Ordering::Greater => {
                    j += 1;
                    (!mom_best).then_some(rc)
                }
            },
            (Some(lc), None) => {
                i += 1;
                mom_best.then_some(lc)
            }
            (None, Some(rc)) => {
                j += 1;
                (!mom_best).then_some(rc)
            }
            (None, None) => break,
        };

        if let Some(link) = selected {
            if links.last().is_none_or(|last| last.inno() != link.inno()) {
                links.push(link.clone());
            }
        }
    }

    let mut ids = best
        .neurons()
        .iter()
        .filter(|n| n.kind() != NeuronKind::Hidden)
        .map(|n| n.id())
        .collect::<BTreeSet<_>>();
    ids.extend(links.iter().flat_map(|l| [l.from(), l.to()]));

    let other = if mom_best { dad } else { mom };
    let mut neurons = ids
        .into_iter()
        .map(|id| ledger.create_neuron_from_id(id))
        .collect::<Result<Vec<_>>>()?;
    for n in neurons.iter_mut() {
        // evolved state follows the gene, from the best parent when both hold it
        if let Some(gene) = best.neuron(n.id()).or_else(|| other.neuron(n.id())) {
            n.copy_from(gene);
        }
        n.recurrent = links.iter().any(|l| l.path() == (n.id(), n.id()));
    }

    Ok(Genome::from_parts(
        id,
        neurons,
        links,
        best.inputs(),
        best.outputs(),
    ))
}
