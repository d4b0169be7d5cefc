use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use drillpath::config::TabuParams;
use drillpath::optimizer::runner::SearchOutcome;
use std::time::Duration;

fn format_tour(cities: &[usize]) -> String {
    cities
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_run_summary(
    outcome: &SearchOutcome,
    params: &TabuParams,
    hole_count: usize,
    elapsed: Duration,
) {
    println!("\nFROM: {}", format_tour(&outcome.initial_tour));
    println!("TO:   {}", format_tour(&outcome.best_tour));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let improvement = if outcome.initial_cost > 0.0 {
        (1.0 - outcome.best_cost / outcome.initial_cost) * 100.0
    } else {
        0.0
    };

    table.add_row(vec![Cell::new("Holes"), Cell::new(hole_count)]);
    table.add_row(vec![
        Cell::new("Parameters"),
        Cell::new(format!(
            "alpha={} beta={} decay={} lambda={}",
            params.alpha, params.beta, params.decay_factor, params.lambda
        )),
    ]);
    table.add_row(vec![Cell::new("Tabu tenure"), Cell::new(outcome.tenure)]);
    table.add_row(vec![Cell::new("Initial tour"), Cell::new(params.init)]);
    table.add_row(vec![
        Cell::new("Initial length"),
        Cell::new(format!("{:.4}", outcome.initial_cost)),
    ]);
    table.add_row(vec![
        Cell::new("Best length"),
        Cell::new(format!("{:.4}", outcome.best_cost)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Improvement"),
        Cell::new(format!("{:.2}%", improvement)).fg(Color::Green),
    ]);
    table.add_row(vec![Cell::new("Iterations"), Cell::new(outcome.iterations)]);
    table.add_row(vec![
        Cell::new("Best at iteration"),
        Cell::new(outcome.best_iteration),
    ]);
    table.add_row(vec![Cell::new("Aspirations"), Cell::new(outcome.aspirations)]);
    table.add_row(vec![Cell::new("Stopped"), Cell::new(outcome.stop_reason)]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.3}s", elapsed.as_secs_f64())),
    ]);

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    println!("\n{}", table);
}

/// The one stdout line the tuning scripts parse, split on `:`.
pub fn print_final_value(best_cost: f64) {
    println!("FINAL_VALUE:{}", best_cost);
}
