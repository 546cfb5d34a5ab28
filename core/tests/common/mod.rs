//! Shared helpers for integration tests.
#![allow(dead_code)]

use family_tree_core::{
    population::Population,
    rng::RandomSource,
    types::PersonId,
};

/// A RandomSource that always rolls the same values.
///
/// `roll` is returned by every `next_f64`. `high` makes every integer
/// draw land on the top of its range instead of the bottom.
pub struct FixedRng {
    pub roll: f64,
    pub high: bool,
}

impl FixedRng {
    /// Every trial succeeds, every integer draw is the minimum.
    pub fn low() -> Self {
        Self { roll: 0.0, high: false }
    }

    pub fn with_roll(roll: f64) -> Self {
        Self { roll, high: false }
    }
}

impl RandomSource for FixedRng {
    fn next_f64(&mut self) -> f64 {
        self.roll
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        if self.high { n - 1 } else { 0 }
    }
}

/// The parents of every individual, by id.
pub fn parents_of(population: &Population) -> Vec<Vec<PersonId>> {
    let mut parents = vec![Vec::new(); population.len()];
    for id in population.ids() {
        for child in population.get(id).children() {
            parents[child.index()].push(id);
        }
    }
    parents
}
