use chrono::NaiveDateTime;
use csv::{Reader, StringRecord, Writer};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ScoreResult, ScoringError};
use crate::segmenter::FlightData;
use crate::telemetry::parse_sys_time;

/// A labeled instant splitting the auxiliary timeline. Windows run from one
/// boundary to the next and are named after the boundary that opens them.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub label: String,
    pub at: NaiveDateTime,
}

impl Boundary {
    pub fn new(label: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            label: label.into(),
            at,
        }
    }
}

/// The gaze windows of interest: one per phase transition the flight
/// actually reached, terminated by the end-of-flight boundary that flushes
/// the last window.
pub fn phase_boundaries(data: &FlightData) -> Vec<Boundary> {
    let times = &data.times;
    let labeled = [
        ("approach", times.begin_approach),
        ("roundout", times.begin_roundout),
        ("landing", times.begin_landing),
        ("end_flight", times.end_flight),
    ];
    labeled
        .into_iter()
        .filter_map(|(label, at)| at.map(|at| Boundary::new(label, at)))
        .collect()
}

/// Splits one auxiliary recording into per-window CSV files.
///
/// The file's own clock is relative: its header names one column
/// `...TIME(<reference>)...` and each row carries seconds since that
/// reference. Boundary offsets are computed once, then the rows stream
/// through in a single pass. A window is written only when a row crosses
/// its closing boundary; whatever is pending at end of data is dropped, so
/// callers wanting the last window must supply a terminating boundary.
pub fn trim_file(
    input: &Path,
    out_dir: &Path,
    boundaries: &[Boundary],
) -> ScoreResult<Vec<PathBuf>> {
    if boundaries.is_empty() {
        warn!("No boundaries supplied; {} not trimmed", input.display());
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_path(input)?;
    let header = reader.headers()?.clone();
    let (time_index, reference) = resolve_time_anchor(&header)?;

    let offsets = boundary_offsets(boundaries, reference)?;
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("gaze")
        .to_string();

    info!(
        "Trimming {} into {} window(s) from reference {}",
        input.display(),
        boundaries.len().saturating_sub(1),
        reference
    );

    let mut written = Vec::new();
    let mut window = 0usize;
    let mut buffer: Vec<StringRecord> = Vec::new();
    let mut opened = false;

    let mut record = StringRecord::new();
    let mut line = 1usize;
    while reader.read_record(&mut record)? {
        line += 1;
        let raw = record.get(time_index).unwrap_or("").trim();
        let offset: f64 = raw.parse().map_err(|_| {
            ScoringError::Alignment(format!(
                "{}: line {line}: bad time offset '{raw}'",
                input.display()
            ))
        })?;

        // Everything before the first boundary is dropped by design.
        if offset < offsets[0] {
            continue;
        }
        opened = true;

        // Crossing one or more boundaries flushes the windows they close.
        while window + 1 < offsets.len() && offset >= offsets[window + 1] {
            let path = flush_window(out_dir, &stem, &boundaries[window].label, &header, &buffer)?;
            written.push(path);
            buffer.clear();
            window += 1;
        }

        // Rows at or past the final boundary belong to no window.
        if window + 1 == offsets.len() {
            break;
        }
        buffer.push(record.clone());
    }

    if opened && window + 1 < offsets.len() && !buffer.is_empty() {
        debug!(
            "Window '{}' still pending at end of {}; dropped (no closing boundary crossed)",
            boundaries[window].label,
            input.display()
        );
    }

    Ok(written)
}

/// Finds the column embedding the reference timestamp and parses it.
fn resolve_time_anchor(header: &StringRecord) -> ScoreResult<(usize, NaiveDateTime)> {
    let (index, name) = header
        .iter()
        .enumerate()
        .find(|(_, name)| name.contains("TIME("))
        .ok_or_else(|| ScoringError::Alignment("no TIME(...) column in header".to_string()))?;

    let open = name.find('(').unwrap_or(0);
    let close = name.rfind(')').unwrap_or(name.len());
    if open + 1 >= close {
        return Err(ScoringError::Alignment(format!(
            "malformed reference timestamp in column '{name}'"
        )));
    }
    let reference = parse_sys_time(&name[open + 1..close]).map_err(|_| {
        ScoringError::Alignment(format!("unparsable reference timestamp in column '{name}'"))
    })?;
    Ok((index, reference))
}

/// Converts absolute boundaries to seconds-since-reference, checking they
/// increase strictly.
fn boundary_offsets(boundaries: &[Boundary], reference: NaiveDateTime) -> ScoreResult<Vec<f64>> {
    let offsets: Vec<f64> = boundaries
        .iter()
        .map(|b| (b.at - reference).num_milliseconds() as f64 / 1000.0)
        .collect();
    for pair in offsets.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ScoringError::Alignment(
                "boundaries must be strictly increasing".to_string(),
            ));
        }
    }
    Ok(offsets)
}

fn flush_window(
    out_dir: &Path,
    stem: &str,
    label: &str,
    header: &StringRecord,
    rows: &[StringRecord],
) -> ScoreResult<PathBuf> {
    let path = out_dir.join(format!("{stem}_{label}.csv"));
    let mut writer = Writer::from_path(&path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    debug!("Wrote window '{label}' ({} rows)", rows.len());
    Ok(path)
}
