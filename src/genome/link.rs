use serde::{Deserialize, Serialize};

/// A weighted path between two neurons, identified across a run by its innovation id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkGene {
    inno: usize,
    from: usize,
    to: usize,
    pub weight: f64,
    pub enabled: bool,
    pub recurrent: bool,
}

impl LinkGene {
    pub fn new(inno: usize, from: usize, to: usize, weight: f64, recurrent: bool) -> Self {
        Self {
            inno,
            from,
            to,
            weight,
            enabled: true,
            recurrent,
        }
    }

    /// gene innovation id
    #[inline]
    pub fn inno(&self) -> usize {
        self.inno
    }

    #[inline]
    pub fn from(&self) -> usize {
        self.from
    }

    #[inline]
    pub fn to(&self) -> usize {
        self.to
    }

    #[inline]
    pub fn path(&self) -> (usize, usize) {
        (self.from, self.to)
    }

    /// unconditionally disable this link. Links are never removed, so that their
    /// innovation stays addressable for crossover
    #[inline]
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Overwrite every mutable field with those of `other`, keeping our identity
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.inno, other.inno, "copying across link identities");
        self.weight = other.weight;
        self.enabled = other.enabled;
        self.recurrent = other.recurrent;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_link_enabled() {
        let l = LinkGene::new(7, 0, 3, -0.5, false);
        assert_eq!(l.inno(), 7);
        assert_eq!(l.path(), (0, 3));
        assert!(l.enabled);
        assert!(!l.recurrent);
    }

    #[test]
    fn test_disable_keeps_gene() {
        let mut l = LinkGene::new(1, 1, 2, 0.25, false);
        l.disable();
        assert!(!l.enabled);
        assert_eq!(l.weight, 0.25);
        assert_eq!(l.inno(), 1);
    }

    #[test]
    fn test_copy_from() {
        let mut l = LinkGene::new(3, 1, 1, 0.1, true);
        let mut other = l.clone();
        other.weight = 0.9;
        other.enabled = false;
        l.copy_from(&other);
        assert_eq!(l, other);
    }
}
