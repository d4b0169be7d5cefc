pub mod memory;
pub mod neighborhood;
pub mod runner;

use self::memory::TabuMemory;
use self::neighborhood::{neighborhood_size, Move, SampledNeighborhood, TwoOptNeighborhood};
use crate::config::{InitStrategy, TabuParams};
use crate::scorer::Scorer;
use crate::tour::Tour;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

/// A tabu move must beat the incumbent by more than this to aspirate.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;
/// Iterations between from-scratch recomputations of the tour length.
pub const RESYNC_INTERVAL: usize = 100;
/// Largest incremental drift accepted silently at a resync point.
pub const DRIFT_TOLERANCE: f64 = 1e-6;
/// Below this many holes the neighborhood is scanned on one thread.
pub const PARALLEL_SCAN_MIN_HOLES: usize = 64;

/// A scored, admissible move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    /// Raw change in tour length.
    pub delta: f64,
    /// `delta + lambda * frequency`, the selection key.
    pub penalized: f64,
    /// The move was tabu and got through on aspiration.
    pub aspirated: bool,
}

impl Candidate {
    /// Total order used by the scan: lower penalized delta first, then the
    /// lexicographically smaller move. Keeps parallel and sequential scans
    /// in agreement.
    #[inline(always)]
    fn beats(&self, other: &Candidate) -> bool {
        match self.penalized.total_cmp(&other.penalized) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => self.mv < other.mv,
            std::cmp::Ordering::Greater => false,
        }
    }
}

#[inline(always)]
fn pick(a: Candidate, b: Candidate) -> Candidate {
    if b.beats(&a) {
        b
    } else {
        a
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Chosen(Candidate),
    /// The neighborhood has no moves at all (n <= 2).
    Empty,
    /// Moves exist but every one is tabu or over the beta bound.
    Blocked,
}

/// Read-only view of the state used while scoring one neighborhood.
struct ScanContext<'a> {
    scorer: &'a Scorer,
    tour: &'a Tour,
    memory: &'a TabuMemory,
    iteration: usize,
    current: f64,
    best: f64,
    beta: f64,
    lambda: f64,
}

impl ScanContext<'_> {
    #[inline(always)]
    fn evaluate(&self, mv: Move) -> Option<Candidate> {
        let delta = self.scorer.delta(self.tour, mv);
        let sig = mv.signature(self.tour);
        let penalized = self
            .scorer
            .penalized(delta, self.memory.frequency(sig), self.lambda);
        let tabu = self.memory.is_tabu(sig, self.iteration);
        let aspiration = self.current + delta < self.best - IMPROVEMENT_EPSILON;

        if !aspiration {
            if tabu {
                return None;
            }
            if penalized > self.beta * self.current {
                return None;
            }
        }

        Some(Candidate {
            mv,
            delta,
            penalized,
            aspirated: tabu && aspiration,
        })
    }
}

/// Everything one run mutates. Several runs in one process each own their
/// own state; only the [`Scorer`] is shared.
pub struct SearchState {
    pub(crate) scorer: Arc<Scorer>,

    /// Iterations applied so far; 0 is the initial tour.
    pub(crate) iteration: usize,
    pub(crate) tour: Tour,
    pub(crate) initial_tour: Vec<usize>,
    pub(crate) initial_cost: f64,

    pub(crate) best_tour: Vec<usize>,
    pub(crate) best_cost: f64,
    pub(crate) best_iteration: usize,

    pub(crate) memory: TabuMemory,
    pub(crate) beta: f64,
    pub(crate) lambda: f64,
    pub(crate) sample_size: usize,
    pub(crate) aspirations: usize,

    pub(crate) rng: fastrand::Rng,
}

impl SearchState {
    pub fn new(scorer: Arc<Scorer>, params: &TabuParams) -> Self {
        let mut rng = fastrand::Rng::with_seed(params.seed);

        let tour = match params.init {
            InitStrategy::NearestNeighbor => Tour::nearest_neighbor(&scorer.matrix),
            InitStrategy::Random => Tour::random(&scorer.matrix, &mut rng),
        };

        let memory = TabuMemory::new(
            params.tabu_tenure(scorer.hole_count()),
            params.decay_factor,
        );

        let cost = tour.length();
        Self {
            scorer,
            iteration: 0,
            initial_tour: tour.cities().to_vec(),
            initial_cost: cost,
            best_tour: tour.cities().to_vec(),
            best_cost: cost,
            best_iteration: 0,
            tour,
            memory,
            beta: params.beta,
            lambda: params.lambda,
            sample_size: params.sample_size,
            aspirations: 0,
            rng,
        }
    }

    pub fn current_cost(&self) -> f64 {
        self.tour.length()
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Iterations applied so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn best_tour(&self) -> &[usize] {
        &self.best_tour
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Best admissible move for the next iteration.
    pub fn select_move(&mut self) -> Selection {
        let n = self.tour.len();
        if neighborhood_size(n) == 0 {
            return Selection::Empty;
        }

        let ctx = ScanContext {
            scorer: &self.scorer,
            tour: &self.tour,
            memory: &self.memory,
            iteration: self.iteration + 1,
            current: self.tour.length(),
            best: self.best_cost,
            beta: self.beta,
            lambda: self.lambda,
        };

        let chosen = if self.sample_size > 0 {
            SampledNeighborhood::new(&mut self.rng, n, self.sample_size)
                .filter_map(|mv| ctx.evaluate(mv))
                .reduce(pick)
        } else if n >= PARALLEL_SCAN_MIN_HOLES {
            (0..n - 1)
                .into_par_iter()
                .filter_map(|i| {
                    TwoOptNeighborhood::row(n, i)
                        .filter_map(|mv| ctx.evaluate(mv))
                        .reduce(pick)
                })
                .reduce_with(pick)
        } else {
            TwoOptNeighborhood::new(n)
                .filter_map(|mv| ctx.evaluate(mv))
                .reduce(pick)
        };

        match chosen {
            Some(c) => Selection::Chosen(c),
            None => Selection::Blocked,
        }
    }

    /// Applies `candidate` as the next iteration. Returns `true` when the
    /// resulting tour is a new incumbent.
    pub fn apply(&mut self, candidate: Candidate) -> bool {
        self.iteration += 1;

        let sig = candidate.mv.signature(&self.tour);
        self.memory.decay();
        self.memory.record(sig, self.iteration);

        self.tour
            .apply_reversal(candidate.mv.i, candidate.mv.j, candidate.delta);

        if self.iteration % RESYNC_INTERVAL == 0 {
            let drift = self.tour.resync(&self.scorer.matrix);
            if drift > DRIFT_TOLERANCE {
                warn!(
                    "⚠️  Cost drift of {:.3e} at iteration {}. Re-synchronized.",
                    drift, self.iteration
                );
            }
        }

        if candidate.aspirated {
            self.aspirations += 1;
        }

        if self.tour.length() < self.best_cost {
            self.best_cost = self.tour.length();
            self.best_tour.clear();
            self.best_tour.extend_from_slice(self.tour.cities());
            self.best_iteration = self.iteration;
            debug!(
                "New incumbent {:.4} at iteration {}",
                self.best_cost, self.iteration
            );
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Hole;
    use crate::optimizer::memory::MoveSignature;

    fn scorer(holes: &[(i32, i32)]) -> Arc<Scorer> {
        let holes = holes.iter().map(|&(x, y)| Hole { x, y }).collect();
        Arc::new(Scorer::new(holes))
    }

    fn ring(n: usize) -> Arc<Scorer> {
        let pts: Vec<(i32, i32)> = (0..n)
            .map(|k| {
                let a = k as f64 / n as f64 * std::f64::consts::TAU;
                ((a.cos() * 40.0).round() as i32, (a.sin() * 40.0).round() as i32)
            })
            .collect();
        scorer(&pts)
    }

    #[test]
    fn test_two_holes_empty_neighborhood() {
        let mut state = SearchState::new(scorer(&[(0, 0), (3, 4)]), &TabuParams::default());
        assert_eq!(state.select_move(), Selection::Empty);
        assert!((state.current_cost() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_selected_move_is_best_admissible() {
        let s = scorer(&[(0, 0), (5, 0), (0, 5), (5, 5), (2, 3), (4, 1)]);
        let params = TabuParams {
            init: InitStrategy::Random,
            seed: 3,
            ..Default::default()
        };
        let mut state = SearchState::new(s.clone(), &params);
        let Selection::Chosen(c) = state.select_move() else {
            panic!("expected a move");
        };

        let current = state.current_cost();
        for mv in TwoOptNeighborhood::new(state.tour.len()) {
            let delta = s.delta(&state.tour, mv);
            let pen = s.penalized(delta, 0.0, params.lambda);
            if pen <= params.beta * current {
                assert!(c.penalized <= pen + 1e-12);
            }
        }
    }

    #[test]
    fn test_applied_signature_becomes_tabu() {
        let mut state = SearchState::new(ring(12), &TabuParams::default());
        let Selection::Chosen(c) = state.select_move() else {
            panic!("expected a move");
        };
        let sig = c.mv.signature(&state.tour);
        state.apply(c);
        assert!(state.memory.tenure() > 0);
        assert!(state.memory.is_tabu(sig, state.iteration + 1));

        // Undoing the reversal has the same boundary cities.
        let undo = MoveSignature::new(
            state.tour.city_at(c.mv.i),
            state.tour.city_at(c.mv.j),
        );
        assert_eq!(undo, sig);
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let s = ring(80);
        let params = TabuParams {
            init: InitStrategy::Random,
            seed: 11,
            ..Default::default()
        };
        let mut state = SearchState::new(s.clone(), &params);
        let parallel = state.select_move();

        let ctx = ScanContext {
            scorer: &s,
            tour: &state.tour,
            memory: &state.memory,
            iteration: 1,
            current: state.tour.length(),
            best: state.best_cost,
            beta: state.beta,
            lambda: state.lambda,
        };
        let sequential = TwoOptNeighborhood::new(state.tour.len())
            .filter_map(|mv| ctx.evaluate(mv))
            .reduce(pick);

        assert_eq!(parallel, Selection::Chosen(sequential.unwrap()));
    }

    /// Crossed unit square: `[0, 1, 2, 3]` has length 2 + 2√2, and only
    /// the moves (0, 1) and (2, 3) uncross it.
    fn crossed_square(params: &TabuParams) -> SearchState {
        let s = scorer(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let mut state = SearchState::new(s.clone(), params);
        state.tour = Tour::from_order(vec![0, 1, 2, 3], &s.matrix).unwrap();
        state.best_cost = state.tour.length();
        state
    }

    #[test]
    fn test_aspiration_overrides_tabu_and_beta() {
        // Everything is tabu and the frequency penalty pushes the improving
        // moves over the beta bound; only aspiration can admit them.
        let params = TabuParams {
            beta: 0.0,
            lambda: 10.0,
            ..Default::default()
        };
        let mut state = crossed_square(&params);
        let sigs: Vec<_> = TwoOptNeighborhood::new(4)
            .map(|mv| mv.signature(&state.tour))
            .collect();
        for sig in sigs {
            state.memory.record(sig, 0);
        }

        let Selection::Chosen(c) = state.select_move() else {
            panic!("aspiration should admit an improving move");
        };
        assert_eq!(c.mv, Move { i: 0, j: 1 });
        assert!(c.aspirated);
        assert!(c.penalized > 0.0);
        assert!((state.current_cost() + c.delta - 4.0).abs() < 1e-9);

        state.apply(c);
        assert_eq!(state.aspirations, 1);
        assert!((state.best_cost() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tabu_move_without_new_best_is_skipped() {
        let params = TabuParams {
            lambda: 0.0,
            ..Default::default()
        };
        let mut state = crossed_square(&params);
        // A better tour is already known, so uncrossing cannot aspirate.
        state.best_cost = 4.0;
        let sig = Move { i: 0, j: 1 }.signature(&state.tour);
        state.memory.record(sig, 0);

        let Selection::Chosen(c) = state.select_move() else {
            panic!("(2, 3) is still admissible");
        };
        assert_eq!(c.mv, Move { i: 2, j: 3 });
        assert!(!c.aspirated);
    }

    #[test]
    fn test_beta_zero_blocks_worsening_moves() {
        // Optimal square: every move is neutral or worse, and beta = 0
        // only admits non-positive penalized deltas.
        let params = TabuParams {
            beta: 0.0,
            lambda: 0.0,
            ..Default::default()
        };
        let mut state = SearchState::new(scorer(&[(0, 0), (1, 0), (0, 1), (1, 1)]), &params);
        match state.select_move() {
            Selection::Chosen(c) => assert!(c.penalized <= 0.0),
            Selection::Blocked => {}
            Selection::Empty => panic!("square has moves"),
        }
    }
}
