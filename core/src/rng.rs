//! Deterministic random number generation.
//!
//! RULE: Nothing in the report pipeline may call any platform RNG.
//! All randomness flows through a single ReportRng created per
//! simulation run from an explicit seed.
//!
//! The generator is a plain 64-bit LCG:
//!   state = state * MULTIPLIER + INCREMENT   (mod 2^64)
//! Every operation is exact wrapping arithmetic, so any reimplementation
//! using the same recurrence produces the same sequence bit for bit.
//! The call ORDER is part of the contract: one extra or missing draw
//! shifts every value after it.

use rand::{RngCore, SeedableRng};

/// LCG multiplier (odd, full period modulo 2^64).
pub const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// LCG increment.
pub const INCREMENT: u64 = 1;

/// Seed used by the reference report build.
pub const DEFAULT_SEED: u64 = 0xC0FFEE;

/// Owned, sequentially advanced generator state.
///
/// Never share one instance between two simulations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRng {
    state: u64,
}

impl ReportRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current raw state. Exposed for diagnostics and tests.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance the state once and return the new state.
    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Roll a float in [0.0, 1.0) from the top 53 bits of the next state.
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.next();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [lo, hi).
    pub fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial: returns true with probability p.
    /// Always consumes exactly one draw.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl RngCore for ReportRng {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for ReportRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// The raw seed becomes the state unchanged; the default
    /// implementation would scramble it and break the reference sequence.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_applies_recurrence_with_wraparound() {
        let mut rng = ReportRng::new(u64::MAX);
        let expected = u64::MAX.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        assert_eq!(rng.next(), expected);
        assert_eq!(rng.state(), expected);
    }

    #[test]
    fn unit_draws_stay_in_half_open_interval() {
        let mut rng = ReportRng::new(DEFAULT_SEED);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "draw {v} outside [0, 1)");
        }
    }

    #[test]
    fn seed_from_u64_does_not_scramble() {
        let mut a = ReportRng::seed_from_u64(42);
        let mut b = ReportRng::new(42);
        assert_eq!(a.next_u64(), b.next());
    }

    #[test]
    fn fill_bytes_uses_little_endian_states() {
        let mut a = ReportRng::new(7);
        let mut b = ReportRng::new(7);
        let mut buf = [0u8; 12];
        a.fill_bytes(&mut buf);
        let first = b.next().to_le_bytes();
        let second = b.next().to_le_bytes();
        assert_eq!(&buf[..8], &first);
        assert_eq!(&buf[8..], &second[..4]);
    }
}
