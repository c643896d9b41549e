use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use ilscore::telemetry::parse_sys_time;
use ilscore::trim::{trim_file, Boundary};
use ilscore::{ScoreResult, ScoringError};

#[derive(Args, Debug, Clone)]
pub struct TrimArgs {
    /// Gaze recordings to split
    pub input: Vec<PathBuf>,

    /// Directory for the window files
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Window boundary as `label=timestamp`, repeatable, in increasing
    /// order; the last one terminates the final window
    #[arg(short, long = "boundary")]
    pub boundaries: Vec<String>,
}

pub fn run(args: TrimArgs) -> ScoreResult<()> {
    let boundaries = parse_boundaries(&args.boundaries)?;
    fs::create_dir_all(&args.output)?;
    for file in &args.input {
        // One bad recording should not sink the rest of the batch.
        if let Err(e) = trim_file(file, &args.output, &boundaries) {
            warn!("Failed to trim {}: {e}", file.display());
        }
    }
    Ok(())
}

fn parse_boundaries(raw: &[String]) -> ScoreResult<Vec<Boundary>> {
    raw.iter()
        .map(|entry| {
            let (label, timestamp) = entry.split_once('=').ok_or_else(|| {
                ScoringError::Config(format!("boundary '{entry}' is not label=timestamp"))
            })?;
            Ok(Boundary::new(label.trim(), parse_sys_time(timestamp)?))
        })
        .collect()
}
