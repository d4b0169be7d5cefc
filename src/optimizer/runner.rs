use crate::config::TabuParams;
use crate::error::{DpResult, DrillError};
use crate::optimizer::neighborhood::neighborhood_size;
use crate::optimizer::{Candidate, SearchState, Selection};
use crate::scorer::Scorer;
use crate::tour::Tour;
use std::sync::Arc;
use strum_macros::Display;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    #[strum(serialize = "iteration budget exhausted")]
    IterationBudget,
    #[strum(serialize = "neighborhood is empty")]
    EmptyNeighborhood,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub initial_tour: Vec<usize>,
    pub initial_cost: f64,
    pub best_tour: Vec<usize>,
    pub best_cost: f64,
    pub best_iteration: usize,
    pub iterations: usize,
    pub aspirations: usize,
    pub tenure: usize,
    pub stop_reason: StopReason,
}

/// Receives every state transition of a run, in order.
pub trait SearchObserver {
    /// Iteration 0: the initial tour.
    fn on_start(&mut self, tour: &Tour) -> DpResult<()>;

    /// `tour` is the state after applying `candidate` at `iteration`.
    fn on_move(&mut self, iteration: usize, candidate: &Candidate, tour: &Tour) -> DpResult<()>;

    /// No admissible move at `iteration`; the run aborts after this call.
    fn on_stall(&mut self, iteration: usize) -> DpResult<()>;

    fn on_finish(&mut self, outcome: &SearchOutcome) -> DpResult<()>;
}

impl<O: SearchObserver> SearchObserver for Option<O> {
    fn on_start(&mut self, tour: &Tour) -> DpResult<()> {
        match self {
            Some(o) => o.on_start(tour),
            None => Ok(()),
        }
    }

    fn on_move(&mut self, iteration: usize, candidate: &Candidate, tour: &Tour) -> DpResult<()> {
        match self {
            Some(o) => o.on_move(iteration, candidate, tour),
            None => Ok(()),
        }
    }

    fn on_stall(&mut self, iteration: usize) -> DpResult<()> {
        match self {
            Some(o) => o.on_stall(iteration),
            None => Ok(()),
        }
    }

    fn on_finish(&mut self, outcome: &SearchOutcome) -> DpResult<()> {
        match self {
            Some(o) => o.on_finish(outcome),
            None => Ok(()),
        }
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    params: TabuParams,
}

impl Optimizer {
    /// Rejects out-of-range parameters before any work is done.
    pub fn new(scorer: Arc<Scorer>, params: TabuParams) -> DpResult<Self> {
        params.validate()?;
        if scorer.hole_count() < 2 {
            return Err(DrillError::EmptyBoard(scorer.hole_count()));
        }
        Ok(Self { scorer, params })
    }

    pub fn params(&self) -> &TabuParams {
        &self.params
    }

    pub fn run<O: SearchObserver>(&self, observer: &mut O) -> DpResult<SearchOutcome> {
        let opts = &self.params;
        let mut state = SearchState::new(self.scorer.clone(), opts);

        info!(
            "🔥 Tabu search over {} holes | tenure {} | {} iterations | initial {:.4}",
            self.scorer.hole_count(),
            state.memory.tenure(),
            opts.max_iterations,
            state.current_cost()
        );

        observer.on_start(&state.tour)?;

        let stop_reason = loop {
            if state.iteration >= opts.max_iterations {
                break StopReason::IterationBudget;
            }

            match state.select_move() {
                Selection::Chosen(candidate) => {
                    state.apply(candidate);
                    observer.on_move(state.iteration, &candidate, &state.tour)?;
                }
                Selection::Empty => break StopReason::EmptyNeighborhood,
                Selection::Blocked => {
                    let iteration = state.iteration + 1;
                    observer.on_stall(iteration)?;
                    return Err(DrillError::DegenerateInstance(format!(
                        "no admissible move at iteration {} (all {} candidates tabu or over the beta bound)",
                        iteration,
                        if opts.sample_size > 0 {
                            opts.sample_size
                        } else {
                            neighborhood_size(state.tour.len())
                        }
                    )));
                }
            }
        };

        let outcome = SearchOutcome {
            initial_tour: state.initial_tour,
            initial_cost: state.initial_cost,
            best_tour: state.best_tour,
            best_cost: state.best_cost,
            best_iteration: state.best_iteration,
            iterations: state.iteration,
            aspirations: state.aspirations,
            tenure: state.memory.tenure(),
            stop_reason,
        };

        info!(
            "🏆 Best {:.4} at iteration {} ({} iterations, {})",
            outcome.best_cost, outcome.best_iteration, outcome.iterations, outcome.stop_reason
        );

        observer.on_finish(&outcome)?;
        Ok(outcome)
    }
}
