//! Injectable random number generation.
//!
//! RULE: Nothing in tree generation may call any platform RNG.
//! All randomness flows through a RandomSource. Production runs use
//! StreamRng instances derived from a single master seed; tests may
//! substitute any RandomSource to force outcomes.
//!
//! The sampler and the builder each get their own stream, seeded
//! deterministically from (master_seed XOR slot). This means:
//!   - A change in how many draws the sampler makes never shifts the
//!     builder's partnering and childbearing decisions, and vice versa.
//!   - The same master seed always reproduces the same tree.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// The capability every random draw goes through.
pub trait RandomSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll a u64 in [0, n). `n` must be > 0.
    fn next_u64_below(&mut self, n: u64) -> u64;

    /// Bernoulli trial: succeeds when the roll is <= p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() <= p
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range [{lo}, {hi}]");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Uniform float in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        (**self).next_u64_below(n)
    }
}

/// A named, deterministic RNG stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for StreamRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// All streams for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Sampler = 0,
    Builder = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sampler => "sampler",
            Self::Builder => "builder",
        }
    }
}
