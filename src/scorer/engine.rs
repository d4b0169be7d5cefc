use crate::board::DistanceMatrix;
use crate::optimizer::neighborhood::Move;
use crate::tour::{closed_length, Tour};

/// Slow Path: used at initialization and re-synchronization.
pub fn score_full(matrix: &DistanceMatrix, order: &[usize]) -> f64 {
    closed_length(order, matrix)
}

/// Fast Path: used by the neighborhood scan.
///
/// Reversing positions `i..=j` replaces the edges (prev, a) and (b, next)
/// with (prev, b) and (a, next), where a = tour[i], b = tour[j] and the
/// neighbors wrap around the cycle. Every interior edge only flips
/// direction, which leaves a symmetric length unchanged.
#[inline(always)]
pub fn reversal_delta(matrix: &DistanceMatrix, tour: &Tour, mv: Move) -> f64 {
    let n = tour.len();
    let prev = tour.city_at((mv.i + n - 1) % n);
    let a = tour.city_at(mv.i);
    let b = tour.city_at(mv.j);
    let next = tour.city_at((mv.j + 1) % n);

    matrix.get(prev, b) + matrix.get(a, next) - matrix.get(prev, a) - matrix.get(b, next)
}

/// Diversified selection key. The logged tour length never includes it.
#[inline(always)]
pub fn penalized_delta(delta: f64, frequency: f64, lambda: f64) -> f64 {
    delta + lambda * frequency
}
