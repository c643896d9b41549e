use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info};

use ilscore::{ApproachConfig, ScoreResult, Scorer};

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Approach procedure definition (JSON); defaults to ILS 34R KSEA
    #[arg(global = true, short, long)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one flight and optionally trim its gaze recordings
    Score(cmd::score::ScoreArgs),
    /// Split gaze recordings along explicit boundaries
    Trim(cmd::trim::TrimArgs),
    /// Score a directory of pilot folders
    Batch(cmd::batch::BatchArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading approach procedure from {path}");
            ApproachConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{e}");
                process::exit(1);
            })
        }
        None => ApproachConfig::default(),
    };
    info!("Procedure: {}", config.procedure);

    let scorer = Scorer::new(config).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    let result: ScoreResult<()> = match cli.command {
        Commands::Score(args) => cmd::score::run(args, &scorer),
        Commands::Trim(args) => cmd::trim::run(args),
        Commands::Batch(args) => cmd::batch::run(args, &scorer),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}
