//! The external score function and the comparator that lets every other module
//! stay agnostic about whether scores are being maximized or minimized.

use crate::network::Network;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Rates a decoded network. Implementations are called from worker threads when
/// the `parallel` feature is enabled, each with its own network.
pub trait Score: Sync {
    fn calculate(&self, network: &Network) -> f64;

    /// Whether lower scores are better
    fn should_minimize(&self) -> bool {
        false
    }
}

impl<F: Fn(&Network) -> f64 + Sync> Score for F {
    fn calculate(&self, network: &Network) -> f64 {
        self(network)
    }
}

/// Wraps a score function whose scores should be minimized, ie an error
#[derive(Debug, Clone, Copy)]
pub struct Minimize<F>(pub F);

impl<F: Fn(&Network) -> f64 + Sync> Score for Minimize<F> {
    fn calculate(&self, network: &Network) -> f64 {
        (self.0)(network)
    }

    fn should_minimize(&self) -> bool {
        true
    }
}

/// Orders scores best first. NaN ranks below every other score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparator {
    minimize: bool,
}

impl Comparator {
    pub fn new(minimize: bool) -> Self {
        Self { minimize }
    }

    pub fn for_score(score: &impl Score) -> Self {
        Self::new(score.should_minimize())
    }

    #[inline]
    pub fn minimize(&self) -> bool {
        self.minimize
    }

    /// [Ordering::Greater] when `l` is the better score
    pub fn compare(&self, l: f64, r: f64) -> Ordering {
        let ord = self.sanitize(l).total_cmp(&self.sanitize(r));
        if self.minimize {
            ord.reverse()
        } else {
            ord
        }
    }

    #[inline]
    pub fn is_better_than(&self, l: f64, r: f64) -> bool {
        self.compare(l, r) == Ordering::Greater
    }

    pub fn best(&self, l: f64, r: f64) -> f64 {
        if self.is_better_than(r, l) {
            r
        } else {
            l
        }
    }

    /// The score nothing can be worse than
    pub fn worst_score(&self) -> f64 {
        if self.minimize {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Map a score onto a "higher is better" scale for spawn allocation.
    /// Minimized scores become `1 / (1 + score)`, non-finite scores become 0.
    pub fn strength(&self, score: f64) -> f64 {
        if !score.is_finite() {
            0.
        } else if self.minimize {
            1. / (1. + score.max(0.))
        } else {
            score
        }
    }

    fn sanitize(&self, score: f64) -> f64 {
        if score.is_nan() {
            self.worst_score()
        } else {
            score
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compare_maximize() {
        let c = Comparator::new(false);
        assert!(c.is_better_than(2., 1.));
        assert!(!c.is_better_than(1., 2.));
        assert!(!c.is_better_than(1., 1.));
        assert_eq!(c.best(-3., 4.), 4.);
        assert_eq!(c.worst_score(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_compare_minimize() {
        let c = Comparator::new(true);
        assert!(c.is_better_than(1., 2.));
        assert_eq!(c.best(-3., 4.), -3.);
        assert_eq!(c.compare(0.5, 0.1), Ordering::Less);
        assert_eq!(c.worst_score(), f64::INFINITY);
    }

    #[test]
    fn test_nan_is_worst() {
        for c in [Comparator::new(false), Comparator::new(true)] {
            assert!(c.is_better_than(0., f64::NAN));
            assert!(!c.is_better_than(f64::NAN, 0.));
            assert_eq!(c.best(f64::NAN, 7.), 7.);
        }
    }

    #[test]
    fn test_sort_best_first() {
        let mut scores = vec![0.3, f64::NAN, 2., -1.];
        let c = Comparator::new(true);
        scores.sort_by(|l, r| c.compare(*r, *l));
        assert_eq!(&scores[..3], &[-1., 0.3, 2.]);
        assert!(scores[3].is_nan());
    }

    #[test]
    fn test_strength() {
        let max = Comparator::new(false);
        assert_eq!(max.strength(3.), 3.);
        assert_eq!(max.strength(f64::NAN), 0.);

        let min = Comparator::new(true);
        assert_eq!(min.strength(0.), 1.);
        assert_eq!(min.strength(1.), 0.5);
        assert!(min.strength(0.1) > min.strength(0.2));
        assert_eq!(min.strength(f64::INFINITY), 0.);
    }

    #[test]
    fn test_closure_score() {
        let s = |_: &Network| 1.;
        assert!(!s.should_minimize());
        assert!(Minimize(s).should_minimize());
        assert!(Comparator::for_score(&Minimize(s)).minimize());
    }
}
