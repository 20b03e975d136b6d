//! Adaptive weighted-random card picker for study sessions.
//!
//! Every term starts with weight 1, so the first pick is uniform.
//! - Correct: weight - 1, never below 1
//! - Wrong: weight + 2, no ceiling
//! - Skip: no change
//!
//! Term `k` is picked with probability `weights[k] / sum(weights)`. Because
//! the floor is 1 every term stays reachable for the whole session. Weights
//! live only as long as the scheduler and are never persisted.

use rand::Rng;

pub const INITIAL_WEIGHT: f64 = 1.0;
pub const MIN_WEIGHT: f64 = 1.0;
pub const CORRECT_STEP: f64 = 1.0;
pub const WRONG_STEP: f64 = 2.0;

/// Walks `weights` subtracting each from `r` and returns the first index where
/// the remainder drops to zero or below. Falls back to the last index if
/// rounding leaves `r` positive. `None` only for an empty slice.
pub fn select_index(weights: &[f64], r: f64) -> Option<usize> {
    let mut remainder = r;
    for (k, weight) in weights.iter().enumerate() {
        remainder -= weight;
        if remainder <= 0.0 {
            return Some(k);
        }
    }
    weights.len().checked_sub(1)
}

pub struct AdaptiveScheduler<R> {
    weights: Vec<f64>,
    rng: R,
}

impl<R: Rng> AdaptiveScheduler<R> {
    pub fn new(term_count: usize, rng: R) -> Self {
        Self {
            weights: vec![INITIAL_WEIGHT; term_count],
            rng,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Draws the next term index. `None` when there are no terms.
    pub fn pick(&mut self) -> Option<usize> {
        if self.weights.is_empty() {
            return None;
        }
        let total = self.total();
        let r = self.rng.random_range(0.0..total);
        let index = select_index(&self.weights, r);
        log::debug!("picked {:?} (r = {:.3} of {:.1})", index, r, total);
        index
    }

    pub fn record_correct(&mut self, index: usize) {
        if let Some(weight) = self.weights.get_mut(index) {
            *weight = (*weight - CORRECT_STEP).max(MIN_WEIGHT);
            log::debug!("term {} correct, weight now {}", index, weight);
        }
    }

    pub fn record_wrong(&mut self, index: usize) {
        if let Some(weight) = self.weights.get_mut(index) {
            *weight += WRONG_STEP;
            log::debug!("term {} wrong, weight now {}", index, weight);
        }
    }

    /// Skipping leaves the weights alone.
    pub fn skip(&mut self, index: usize) {
        log::debug!("term {} skipped", index);
    }
}
