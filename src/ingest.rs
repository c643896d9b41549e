use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ScoreResult, ScoringError};
use crate::telemetry;

// Channels kept when reducing a raw X-Plane dump to the scoring table.
// Alpha, pitch, and terrain ride along for later analysis even though the
// scorer does not read them.
const SELECTED_COLUMNS: [&str; 16] = [
    telemetry::COL_MISSION_TIME,
    telemetry::COL_AIRSPEED,
    telemetry::COL_ENGINE,
    "alpha,__deg",
    telemetry::COL_BANK,
    telemetry::COL_GROUND_ROLL,
    "pitch,__deg",
    telemetry::COL_VERTICAL_SPEED,
    telemetry::COL_ALTITUDE,
    "terrn,ftMSL",
    telemetry::COL_HEADING,
    telemetry::COL_LATITUDE,
    telemetry::COL_LONGITUDE,
    telemetry::COL_DME,
    telemetry::COL_HDEF,
    telemetry::COL_VDEF,
];

/// Rewrites an X-Plane `Data.txt` dump (pipe-delimited, space-padded) as a
/// CSV file, dropping the leading banner line. Returns the new path.
pub fn reformat_txt(input: &Path, out_dir: &Path, name: &str) -> ScoreResult<PathBuf> {
    let output = out_dir.join(format!("{name}_Reformatted_Data.csv"));
    let reader = BufReader::new(File::open(input)?);
    let mut writer = Writer::from_path(&output)?;

    for line in reader.lines().skip(1) {
        let line = line?;
        let fields: Vec<String> = line
            .split('|')
            .map(|field| field.split_whitespace().collect::<String>())
            .collect();
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    info!("Reformatted {} -> {}", input.display(), output.display());
    Ok(output)
}

/// Projects the reformatted dump down to the scoring channels, resolved by
/// header name. A missing channel is a schema fault; a short data row is
/// skipped with a diagnostic.
pub fn select_columns(input: &Path, out_dir: &Path, name: &str) -> ScoreResult<PathBuf> {
    let output = out_dir.join(format!("{name}_Refactored_Data.csv"));
    let mut reader = ReaderBuilder::new().flexible(true).from_path(input)?;
    let header = reader.headers()?.clone();

    let mut indices = Vec::with_capacity(SELECTED_COLUMNS.len());
    for column in SELECTED_COLUMNS {
        let index = header
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| ScoringError::Schema(format!("Column not found: {column}")))?;
        indices.push(index);
    }

    let mut writer = Writer::from_path(&output)?;
    writer.write_record(SELECTED_COLUMNS)?;

    let mut record = StringRecord::new();
    let mut line = 1usize;
    while reader.read_record(&mut record)? {
        line += 1;
        if indices.iter().any(|&i| i >= record.len()) {
            warn!("{name}: removed data line number {line}");
            continue;
        }
        let selected: Vec<&str> = indices.iter().map(|&i| &record[i]).collect();
        writer.write_record(selected)?;
    }
    writer.flush()?;

    info!("Selected scoring columns -> {}", output.display());
    Ok(output)
}
