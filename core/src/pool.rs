//! Weighted candidate pools for single draws with replacement.

use crate::rng::RandomSource;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPool<T> {
    items:   Vec<T>,
    weights: Vec<f64>,
    total:   f64,
}

impl<T> Default for WeightedPool<T> {
    fn default() -> Self {
        Self { items: Vec::new(), weights: Vec::new(), total: 0.0 }
    }
}

impl<T> WeightedPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Weights must be finite and non-negative;
    /// callers validate before pushing.
    pub fn push(&mut self, item: T, weight: f64) {
        debug_assert!(weight >= 0.0 && weight.is_finite());
        self.total += weight;
        self.items.push(item);
        self.weights.push(weight);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Draw one candidate with probability proportional to its weight.
    /// Returns None when there is nothing with positive weight.
    pub fn draw(&self, rng: &mut impl RandomSource) -> Option<&T> {
        if self.total <= 0.0 {
            return None;
        }
        let roll = rng.next_f64() * self.total;
        let mut cumulative = 0.0;
        for (item, weight) in self.items.iter().zip(&self.weights) {
            cumulative += weight;
            if roll < cumulative {
                return Some(item);
            }
        }
        // Float rounding can leave roll just past the final sum.
        self.items
            .iter()
            .zip(&self.weights)
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(item, _)| item)
    }
}

impl<T> FromIterator<(T, f64)> for WeightedPool<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (item, weight) in iter {
            pool.push(item, weight);
        }
        pool
    }
}
