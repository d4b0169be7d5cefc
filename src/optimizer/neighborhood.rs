use crate::optimizer::memory::MoveSignature;
use crate::tour::Tour;

/// Reverse the tour segment between positions `i` and `j`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub i: usize,
    pub j: usize,
}

impl Move {
    /// Unordered pair of the cities at the segment boundary.
    ///
    /// Positions shift whenever another reversal overlaps them, while the
    /// cities keep their identity, so tabu memory keys on cities.
    pub fn signature(self, tour: &Tour) -> MoveSignature {
        MoveSignature::new(tour.city_at(self.i), tour.city_at(self.j))
    }
}

/// Number of admissible 2-opt moves on `n` positions.
pub fn neighborhood_size(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2 - 1
    }
}

/// Lazy, restartable walk over every `(i, j)` with `0 <= i < j < n`,
/// skipping the full reversal `(0, n - 1)`.
#[derive(Debug, Clone)]
pub struct TwoOptNeighborhood {
    n: usize,
    i: usize,
    j: usize,
    last_row: usize,
}

impl TwoOptNeighborhood {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            i: 0,
            j: 1,
            last_row: n.saturating_sub(2),
        }
    }

    /// Only the moves starting at position `i`.
    pub fn row(n: usize, i: usize) -> Self {
        Self {
            n,
            i,
            j: i + 1,
            last_row: i,
        }
    }
}

impl Iterator for TwoOptNeighborhood {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            if self.n < 2 || self.i > self.last_row {
                return None;
            }
            if self.j >= self.n {
                self.i += 1;
                self.j = self.i + 1;
                continue;
            }

            let mv = Move {
                i: self.i,
                j: self.j,
            };
            self.j += 1;

            if mv.i == 0 && mv.j == self.n - 1 {
                continue;
            }
            return Some(mv);
        }
    }
}

/// Draws `count` uniform moves (with repetition) from the 2-opt neighborhood.
pub struct SampledNeighborhood<'a> {
    rng: &'a mut fastrand::Rng,
    n: usize,
    remaining: usize,
}

impl<'a> SampledNeighborhood<'a> {
    pub fn new(rng: &'a mut fastrand::Rng, n: usize, count: usize) -> Self {
        let remaining = if neighborhood_size(n) == 0 { 0 } else { count };
        Self { rng, n, remaining }
    }
}

impl Iterator for SampledNeighborhood<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        loop {
            let i = self.rng.usize(0..self.n - 1);
            let j = self.rng.usize(i + 1..self.n);
            if i == 0 && j == self.n - 1 {
                continue;
            }
            return Some(Move { i, j });
        }
    }
}
