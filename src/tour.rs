use crate::board::DistanceMatrix;

/// A closed drilling tour: a permutation of hole indices read cyclically.
///
/// `positions` is the inverse of `order` and is kept in sync by every
/// mutation. `length` is computed once at construction and then updated
/// by the deltas passed to [`Tour::apply_reversal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    positions: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Returns `None` unless `order` is a permutation of `0..matrix.len()`.
    pub fn from_order(order: Vec<usize>, matrix: &DistanceMatrix) -> Option<Self> {
        let n = order.len();
        if n != matrix.len() {
            return None;
        }

        let mut positions = vec![usize::MAX; n];
        for (pos, &city) in order.iter().enumerate() {
            if city >= n || positions[city] != usize::MAX {
                return None;
            }
            positions[city] = pos;
        }

        let length = closed_length(&order, matrix);
        Some(Self {
            order,
            positions,
            length,
        })
    }

    /// Greedy walk from hole 0, always to the nearest unvisited hole.
    /// Ties go to the lowest index.
    pub fn nearest_neighbor(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let mut order = Vec::with_capacity(n);
        let mut visited = vec![false; n];

        if n > 0 {
            let mut current = 0;
            visited[0] = true;
            order.push(0);

            for _ in 1..n {
                let mut next = usize::MAX;
                let mut next_dist = f64::INFINITY;
                for (city, &seen) in visited.iter().enumerate() {
                    if seen {
                        continue;
                    }
                    let d = matrix.get(current, city);
                    if d < next_dist {
                        next_dist = d;
                        next = city;
                    }
                }
                visited[next] = true;
                order.push(next);
                current = next;
            }
        }

        Self::from_permutation(order, matrix)
    }

    /// Hole 0 first, every other hole in shuffled order.
    pub fn random(matrix: &DistanceMatrix, rng: &mut fastrand::Rng) -> Self {
        let mut order: Vec<usize> = (0..matrix.len()).collect();
        if order.len() > 2 {
            rng.shuffle(&mut order[1..]);
        }
        Self::from_permutation(order, matrix)
    }

    fn from_permutation(order: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let mut positions = vec![0; order.len()];
        for (pos, &city) in order.iter().enumerate() {
            positions[city] = pos;
        }
        let length = closed_length(&order, matrix);
        Self {
            order,
            positions,
            length,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cities(&self) -> &[usize] {
        &self.order
    }

    #[inline(always)]
    pub fn city_at(&self, pos: usize) -> usize {
        self.order[pos]
    }

    #[inline(always)]
    pub fn position_of(&self, city: usize) -> usize {
        self.positions[city]
    }

    /// Maintained tour length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Reverses `order[i..=j]` in place. Does not touch the maintained length.
    pub fn reverse_segment(&mut self, i: usize, j: usize) {
        debug_assert!(i < j && j < self.order.len());
        self.order[i..=j].reverse();
        for pos in i..=j {
            self.positions[self.order[pos]] = pos;
        }
    }

    /// Reverses the segment and shifts the maintained length by `delta`.
    pub fn apply_reversal(&mut self, i: usize, j: usize, delta: f64) {
        self.reverse_segment(i, j);
        self.length += delta;
    }

    /// Recomputes the length from scratch and returns how far the
    /// maintained value had drifted.
    pub fn resync(&mut self, matrix: &DistanceMatrix) -> f64 {
        let exact = closed_length(&self.order, matrix);
        let drift = (exact - self.length).abs();
        self.length = exact;
        drift
    }
}

/// Sum of all `n` edges of the cyclic sequence, including last -> first.
pub fn closed_length(order: &[usize], matrix: &DistanceMatrix) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for k in 0..order.len() {
        let next = order[(k + 1) % order.len()];
        total += matrix.get(order[k], next);
    }
    total
}
