use crate::reports;
use drillpath::board::{self, Board};
use drillpath::config::TabuParams;
use drillpath::error::DpResult;
use drillpath::optimizer::runner::Optimizer;
use drillpath::scorer::Scorer;
use drillpath::trace::TraceWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub fn run(board_path: &Path, params: TabuParams, log_file: Option<&Path>) -> DpResult<()> {
    info!("📂 Loading Board: {}", board_path.display());
    let board = Board::load(board_path)?;
    let holes = board::extract_holes(&board)?;
    info!(
        "🕳️  {}x{} grid with {} holes",
        board.size(),
        board.size(),
        holes.len()
    );

    let scorer = Arc::new(Scorer::new(holes));
    let optimizer = Optimizer::new(scorer.clone(), params)?;

    let mut trace = match log_file {
        Some(path) => {
            info!("📝 Writing trace to: {}", path.display());
            Some(TraceWriter::create(path)?)
        }
        None => None,
    };

    let start = Instant::now();
    let outcome = optimizer.run(&mut trace)?;
    let elapsed = start.elapsed();

    reports::print_run_summary(&outcome, optimizer.params(), scorer.hole_count(), elapsed);
    reports::print_final_value(outcome.best_cost);
    Ok(())
}
