use clap::Args;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use ilscore::report;
use ilscore::{ScoreCalculation, ScoreResult, Scorer};

use super::score::score_flight;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory of per-pilot folders, each holding a `*_datarefs.csv`
    /// flight log and optional gaze recordings
    pub data_dir: PathBuf,

    /// Directory for all scoring output
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Scores every pilot folder in parallel. The scorer only ever reads its
/// configuration, so flights are independent of each other.
pub fn run(args: BatchArgs, scorer: &Scorer) -> ScoreResult<()> {
    let pilots = discover_pilots(&args.data_dir)?;
    if pilots.is_empty() {
        warn!("No pilot folders found under {}", args.data_dir.display());
        return Ok(());
    }
    info!("Scoring {} pilot(s)", pilots.len());
    fs::create_dir_all(&args.output)?;

    let mut results: Vec<ScoreCalculation> = pilots
        .par_iter()
        .filter_map(|pilot| {
            score_pilot(scorer, pilot, &args.output)
                .map_err(|e| error!("{}: {e}", pilot.name))
                .ok()
        })
        .collect();
    results.sort_by(|a, b| a.participant.cmp(&b.participant));

    let refs: Vec<&ScoreCalculation> = results.iter().collect();
    report::print_summary(&refs);
    Ok(())
}

struct PilotFolder {
    name: String,
    flight_log: PathBuf,
    gaze_files: Vec<PathBuf>,
}

/// A pilot folder is any subdirectory containing a `*_datarefs.csv`; every
/// other CSV in it is treated as a gaze recording.
fn discover_pilots(data_dir: &Path) -> ScoreResult<Vec<PilotFolder>> {
    let mut pilots = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }
        let name = match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let mut flight_log = None;
        let mut gaze_files = Vec::new();
        for file in fs::read_dir(&dir)? {
            let path = file?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let is_datarefs = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("_datarefs.csv"));
            if is_datarefs && flight_log.is_none() {
                flight_log = Some(path);
            } else {
                gaze_files.push(path);
            }
        }

        match flight_log {
            Some(flight_log) => {
                gaze_files.sort();
                pilots.push(PilotFolder {
                    name,
                    flight_log,
                    gaze_files,
                });
            }
            None => warn!("{name}: no *_datarefs.csv found, skipping"),
        }
    }
    pilots.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(pilots)
}

fn score_pilot(
    scorer: &Scorer,
    pilot: &PilotFolder,
    output: &Path,
) -> ScoreResult<ScoreCalculation> {
    score_flight(
        scorer,
        &pilot.flight_log,
        output,
        &pilot.name,
        &pilot.gaze_files,
    )
}
