use clap::{CommandFactory, FromArgMatches, Parser};
use drillpath::config::TabuParams;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};

mod cmd;
mod reports;

/// Tabu-search drilling path optimizer for PCB hole grids.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board file: a size line followed by `size` rows of 0/1 cells.
    board: PathBuf,

    #[command(flatten)]
    params: TabuParams,

    /// Write the TOUR/VALUE/MOVE trace here. Omitted means no trace.
    #[arg(long = "logFile")]
    log_file: Option<PathBuf>,

    /// JSON file with tabu parameters; explicit flags override it.
    #[arg(long = "params")]
    params_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    info!("🚀 Initializing DrillPath...");

    let params = match &cli.params_file {
        Some(path) => {
            info!("⚖️  Loading Parameters from: {}", path.display());
            match TabuParams::load_from_file(path) {
                Ok(mut file_params) => {
                    file_params.merge_from_cli(&cli.params, &matches);
                    file_params
                }
                Err(e) => {
                    error!("❌ {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => cli.params.clone(),
    };

    match cmd::solve::run(&cli.board, params, cli.log_file.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
