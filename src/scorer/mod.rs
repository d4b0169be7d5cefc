pub mod engine;

use crate::board::{DistanceMatrix, Hole};
use crate::optimizer::neighborhood::Move;
use crate::tour::Tour;

/// Cost model shared by every run over the same board.
pub struct Scorer {
    pub holes: Vec<Hole>,
    pub matrix: DistanceMatrix,
}

impl Scorer {
    pub fn new(holes: Vec<Hole>) -> Self {
        let matrix = DistanceMatrix::from_holes(&holes);
        Self { holes, matrix }
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// From-scratch closed tour length.
    pub fn score_full(&self, order: &[usize]) -> f64 {
        engine::score_full(&self.matrix, order)
    }

    /// Length change of reversing `mv` on `tour`, O(1).
    #[inline(always)]
    pub fn delta(&self, tour: &Tour, mv: Move) -> f64 {
        engine::reversal_delta(&self.matrix, tour, mv)
    }

    /// Selection objective: `delta + lambda * frequency`.
    #[inline(always)]
    pub fn penalized(&self, delta: f64, frequency: f64, lambda: f64) -> f64 {
        engine::penalized_delta(delta, frequency, lambda)
    }
}
