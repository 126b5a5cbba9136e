//! Randomness helpers. Every stochastic decision in a run is drawn from a single
//! [RngCore], so seeding that generator reproduces the whole run.

use core::cmp::min;
use rand::{Rng, RngCore, SeedableRng};

/// Rolls against a probability in `[0, 1]`
pub trait Happens: Rng + Sized {
    /// true with probability `p`
    fn happens(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }

    /// a uniform draw from `[-1, 1]`
    fn clamped(&mut self) -> f64 {
        self.random_range(-1.0..=1.0)
    }
}

impl<R: Rng> Happens for R {}

/// wyrand. Small, fast, and good enough for mutation rolls
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_ne_bytes()[..lim]);
            idx += lim;
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::seeded(state)
    }
}

/// A [WyRng] seeded from the thread-local OS-backed generator
pub fn default_rng() -> WyRng {
    WyRng::seeded(rand::random())
}
