use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use csv::Writer;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::info;

use crate::error::ScoreResult;
use crate::scorer::ScoreCalculation;
use crate::segmenter::{FlightData, Phase};

/// Writes one CSV per phase containing the original rows routed to it,
/// named `<name>_flight_data_<phase>.csv`.
pub fn write_phase_files(
    data: &FlightData,
    out_dir: &Path,
    name: &str,
) -> ScoreResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for phase in Phase::iter() {
        let path = out_dir.join(format!("{}_flight_data_{}.csv", name, phase.file_tag()));
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(&data.header)?;
        for row in data.rows(phase) {
            writer.write_record(row)?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

/// Writes the `<participant>_score.csv` report: percentage scores, phase
/// durations, and the side-channel statistics.
pub fn write_score_report(calc: &ScoreCalculation, out_dir: &Path) -> ScoreResult<PathBuf> {
    let path = out_dir.join(format!("{}_score.csv", calc.participant));
    let mut writer = Writer::from_path(&path)?;

    writer.write_record(["Metric", "Outcome"])?;
    let rows = [
        ("Overall Score", calc.overall.fraction()),
        ("Total Time", calc.data.dur_total),
        ("Approach Score", calc.approach.fraction()),
        ("Approach Time", calc.data.dur_approach),
        ("Landing Score", calc.landing.fraction()),
        ("Landing Time", calc.data.dur_landing),
        ("AVG ILS Speed", calc.stats.avg_approach_speed),
        ("AVG VSI Final Approach", calc.stats.avg_final_vertical_speed),
        ("AVG Glideslope Deflection", calc.stats.avg_glideslope_deflection),
        ("AVG Localizer Deflection", calc.stats.avg_localizer_deflection),
        ("AVG Roll Bank Angle", calc.stats.avg_bank_angle),
        ("MAX Roll Bank Angle", calc.stats.max_bank_angle),
    ];
    for (metric, value) in rows {
        writer.write_record(&[metric.to_string(), value.to_string()])?;
    }
    writer.flush()?;

    info!("Wrote score report: {}", path.display());
    Ok(path)
}

/// Prints the per-flight scoring summary to stdout.
pub fn print_summary(calcs: &[&ScoreCalculation]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Participant").add_attribute(Attribute::Bold),
        Cell::new("Overall").fg(Color::Cyan),
        Cell::new("Approach"),
        Cell::new("Landing"),
        Cell::new("Samples"),
        Cell::new("Total s"),
        Cell::new("Max Bank").fg(Color::Red),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for calc in calcs {
        table.add_row(vec![
            Cell::new(&calc.participant).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}%", calc.overall.fraction() * 100.0)).fg(Color::Cyan),
            Cell::new(format!("{:.1}%", calc.approach.fraction() * 100.0)),
            Cell::new(format!("{:.1}%", calc.landing.fraction() * 100.0)),
            Cell::new(calc.data.sample_count()),
            Cell::new(format!("{:.0}", calc.data.dur_total)),
            Cell::new(format!("{:.1}", calc.stats.max_bank_angle)).fg(Color::Red),
        ]);
    }
    println!("\n{table}");
}
