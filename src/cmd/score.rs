use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use ilscore::report;
use ilscore::trim;
use ilscore::{ingest, ScoreCalculation, ScoreResult, Scorer, ScoringError, Segmenter};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// X-Plane flight log: a raw `Data.txt` dump or a datarefs CSV recording
    pub input: PathBuf,

    /// Directory to create the `<name>_scoring` / `<name>_trim` folders in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Participant identifier; defaults to the input file stem
    #[arg(short, long)]
    pub name: Option<String>,

    /// Gaze recordings to split along the flight's phase boundaries
    #[arg(short, long)]
    pub gaze: Vec<PathBuf>,
}

pub fn run(args: ScoreArgs, scorer: &Scorer) -> ScoreResult<()> {
    let name = participant_name(&args.input, args.name.as_deref());
    let calc = score_flight(scorer, &args.input, &args.output, &name, &args.gaze)?;
    report::print_summary(&[&calc]);
    Ok(())
}

pub fn participant_name(input: &Path, explicit: Option<&str>) -> String {
    match explicit {
        Some(name) => name.to_string(),
        None => input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("flight")
            .to_string(),
    }
}

/// Scores one flight end to end: ingest if raw, segment, score, write the
/// phase files and report, then trim any gaze recordings. Shared by the
/// `score` and `batch` commands.
pub fn score_flight(
    scorer: &Scorer,
    input: &Path,
    output_root: &Path,
    name: &str,
    gaze_files: &[PathBuf],
) -> ScoreResult<ScoreCalculation> {
    let scoring_dir = output_root.join(format!("{name}_scoring"));
    fs::create_dir_all(&scoring_dir)?;

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let flight_csv = match extension.as_str() {
        "txt" => {
            let reformatted = ingest::reformat_txt(input, &scoring_dir, name)?;
            ingest::select_columns(&reformatted, &scoring_dir, name)?
        }
        "csv" => input.to_path_buf(),
        other => {
            return Err(ScoringError::Config(format!(
                "unsupported flight data file type '{other}'"
            )))
        }
    };

    let segmenter = Segmenter::new(scorer.config());
    let data = segmenter.segment_file(&flight_csv)?;
    report::write_phase_files(&data, &scoring_dir, name)?;

    let calc = scorer.score(name, data);
    report::write_score_report(&calc, &scoring_dir)?;
    info!("Done scoring {name}");

    if !gaze_files.is_empty() {
        trim_gaze_files(&calc, output_root, name, gaze_files)?;
    }

    Ok(calc)
}

/// An alignment fault in one gaze file leaves the others untouched.
fn trim_gaze_files(
    calc: &ScoreCalculation,
    output_root: &Path,
    name: &str,
    gaze_files: &[PathBuf],
) -> ScoreResult<()> {
    let boundaries = trim::phase_boundaries(&calc.data);
    if boundaries.is_empty() {
        warn!("Did not find system timestamps; gaze files not trimmed");
        return Ok(());
    }

    let trim_dir = output_root.join(format!("{name}_trim"));
    fs::create_dir_all(&trim_dir)?;
    for file in gaze_files {
        if let Err(e) = trim::trim_file(file, &trim_dir, &boundaries) {
            warn!("Failed to trim {}: {e}", file.display());
        }
    }
    Ok(())
}
