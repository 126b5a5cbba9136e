use crate::{genome::Genome, population::NeatConfig, score::Comparator};
use core::cmp::min;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cluster of mutually compatible genomes.
///
/// Members are indices into the population's genomes as sorted best first at
/// the time of speciation, so they are themselves ordered best first. They are
/// cleared when the population replaces its genomes with the next generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    id: usize,
    /// best member ever seen, the representative new genomes are measured against
    pub leader: Genome,
    members: Vec<usize>,
    pub age: usize,
    pub best_score: f64,
    pub gens_no_improvement: usize,
    pub spawns_required: f64,
}

impl Species {
    /// Found a species with its first member
    pub fn new(id: usize, idx: usize, founder: &Genome) -> Self {
        Self {
            id,
            leader: founder.clone(),
            members: vec![idx],
            age: 0,
            best_score: founder.score,
            gens_no_improvement: 0,
            spawns_required: 0.,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whole number of offspring owed next generation
    #[inline]
    pub fn num_to_spawn(&self) -> usize {
        self.spawns_required.round().max(0.) as usize
    }

    pub fn add_member(&mut self, idx: usize, genome: &Genome, comparator: Comparator) {
        if comparator.is_better_than(genome.score, self.best_score) {
            self.best_score = genome.score;
            self.gens_no_improvement = 0;
            self.leader = genome.clone();
        }
        self.members.push(idx);
    }

    /// Drop member indices once the genomes they index are replaced. Leader, age
    /// and score history are kept.
    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    /// Forget this generation's members, ageing the species by one generation
    pub fn purge(&mut self) {
        self.members.clear();
        self.age += 1;
        self.gens_no_improvement += 1;
        self.spawns_required = 0.;
    }

    /// Share of `strength` a member of this species is credited with. Young
    /// species are boosted and old ones penalized before the share is divided
    /// among members.
    pub fn adjusted(&self, strength: f64, config: &NeatConfig) -> f64 {
        let mut adjusted = strength;
        if self.age < config.young_bonus_age_threshold {
            adjusted *= 1. + config.young_score_bonus;
        }
        if self.age > config.old_age_threshold {
            adjusted *= 1. - config.old_age_penalty;
        }
        adjusted / self.members.len().max(1) as f64
    }

    /// A member drawn from the fittest `survival_rate` of the species, never
    /// fewer than one
    pub fn choose_member(&self, survival_rate: f64, rng: &mut impl Rng) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        let pool = min(
            self.members.len(),
            (self.members.len() as f64 * survival_rate).floor() as usize + 1,
        );
        Some(self.members[rng.random_range(0..pool)])
    }

    /// Gone too long without improving, and beaten by the best genome ever seen
    pub fn is_stagnant(&self, threshold: usize, best_ever: f64, comparator: Comparator) -> bool {
        self.gens_no_improvement > threshold && comparator.is_better_than(best_ever, self.best_score)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::WyRng;

    fn scored(id: usize, score: f64) -> Genome {
        let mut g = Genome::new(id, 1, 1, &mut WyRng::seeded(id as u64));
        g.score = score;
        g
    }

    #[test]
    fn test_add_member_tracks_leader() {
        let cmp = Comparator::default();
        let mut s = Species::new(0, 0, &scored(10, 1.));
        s.gens_no_improvement = 4;
        s.add_member(1, &scored(11, 0.5), cmp);
        assert_eq!(s.leader.id(), 10);
        assert_eq!(s.gens_no_improvement, 4);

        s.add_member(2, &scored(12, 3.), cmp);
        assert_eq!(s.leader.id(), 12);
        assert_eq!(s.best_score, 3.);
        assert_eq!(s.gens_no_improvement, 0);
        assert_eq!(s.members(), &[0, 1, 2]);
    }

    #[test]
    fn test_purge() {
        let mut s = Species::new(0, 0, &scored(1, 1.));
        s.spawns_required = 3.;
        s.purge();
        assert!(s.is_empty());
        assert_eq!(s.age, 1);
        assert_eq!(s.gens_no_improvement, 1);
        assert_eq!(s.spawns_required, 0.);
        assert_eq!(s.best_score, 1.);
        assert_eq!(s.leader.id(), 1);
    }

    #[test]
    fn test_adjusted() {
        let config = NeatConfig::default();
        let mut s = Species::new(0, 0, &scored(1, 1.));
        s.add_member(1, &scored(2, 1.), Comparator::default());

        assert!((s.adjusted(2., &config) - 2. * 1.3 / 2.).abs() < 1e-12);
        s.age = config.young_bonus_age_threshold;
        assert_eq!(s.adjusted(2., &config), 1.);
        s.age = config.old_age_threshold + 1;
        assert!((s.adjusted(2., &config) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_choose_member_prefers_fittest() {
        let cmp = Comparator::default();
        let mut s = Species::new(0, 0, &scored(0, 10.));
        for idx in 1..10 {
            s.add_member(idx, &scored(idx, 10. - idx as f64), cmp);
        }
        let mut rng = WyRng::seeded(3);
        for _ in 0..1000 {
            // floor(10 * 0.2) + 1
            assert!(s.choose_member(0.2, &mut rng).unwrap() < 3);
            assert_eq!(s.choose_member(0., &mut rng), Some(0));
        }
        assert!((0..1000).any(|_| s.choose_member(1., &mut rng) == Some(9)));

        s.purge();
        assert_eq!(s.choose_member(0.2, &mut rng), None);
    }

    #[test]
    fn test_stagnation() {
        let cmp = Comparator::default();
        let mut s = Species::new(0, 0, &scored(0, 1.));
        s.gens_no_improvement = 16;
        assert!(s.is_stagnant(15, 2., cmp));
        // holding the best ever score protects the species
        assert!(!s.is_stagnant(15, 1., cmp));
        s.gens_no_improvement = 15;
        assert!(!s.is_stagnant(15, 2., cmp));
        // minimizing, a lower best ever score beats ours
        s.gens_no_improvement = 16;
        assert!(s.is_stagnant(15, 0.5, Comparator::new(true)));
        assert!(!s.is_stagnant(15, 2., Comparator::new(true)));
    }
}
