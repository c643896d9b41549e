use chrono::NaiveDateTime;
use csv::{Reader, StringRecord};
use std::io;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::{debug, info, warn};

use crate::config::ApproachConfig;
use crate::error::ScoreResult;
use crate::telemetry::{ColumnMap, TelemetrySample};

/// The four scored segments of an ILS approach and landing, in flight order.
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Stepdown,
    FinalApproach,
    Roundout,
    Landing,
}

impl Phase {
    /// Suffix used for the per-phase output files.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Self::Stepdown => "stepdown",
            Self::FinalApproach => "approach",
            Self::Roundout => "roundout",
            Self::Landing => "landing",
        }
    }
}

/// Wall-clock instants of the phase transitions. Present only when the
/// recording carried a `sys_time` column; a file either has all the
/// boundaries it reached or none at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseTimes {
    pub begin_flight: Option<NaiveDateTime>,
    pub begin_approach: Option<NaiveDateTime>,
    pub begin_roundout: Option<NaiveDateTime>,
    pub begin_landing: Option<NaiveDateTime>,
    pub end_flight: Option<NaiveDateTime>,
}

/// Output of segmentation: every scored sample routed to its phase, the raw
/// CSV rows for the per-phase files, transition timestamps, and the derived
/// durations. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FlightData {
    pub stepdown: Vec<TelemetrySample>,
    pub final_approach: Vec<TelemetrySample>,
    pub roundout: Vec<TelemetrySample>,
    pub landing: Vec<TelemetrySample>,

    /// Header of the source file, replayed into each per-phase file.
    pub header: StringRecord,
    pub stepdown_rows: Vec<StringRecord>,
    pub final_approach_rows: Vec<StringRecord>,
    pub roundout_rows: Vec<StringRecord>,
    pub landing_rows: Vec<StringRecord>,

    pub times: PhaseTimes,

    /// Seconds spent between the initial approach fix and clearing minimums.
    pub dur_approach: f64,
    /// Seconds spent from clearing minimums to the end of the flight.
    pub dur_landing: f64,
    /// Seconds from the start of the recording to the last active sample.
    pub dur_total: f64,
}

impl FlightData {
    pub fn samples(&self, phase: Phase) -> &[TelemetrySample] {
        match phase {
            Phase::Stepdown => &self.stepdown,
            Phase::FinalApproach => &self.final_approach,
            Phase::Roundout => &self.roundout,
            Phase::Landing => &self.landing,
        }
    }

    pub fn rows(&self, phase: Phase) -> &[StringRecord] {
        match phase {
            Phase::Stepdown => &self.stepdown_rows,
            Phase::FinalApproach => &self.final_approach_rows,
            Phase::Roundout => &self.roundout_rows,
            Phase::Landing => &self.landing_rows,
        }
    }

    /// Total number of scored samples across all four phases.
    pub fn sample_count(&self) -> usize {
        Phase::iter().map(|p| self.samples(p).len()).sum()
    }
}

/// Single-pass classifier that turns an ordered telemetry log into a
/// [`FlightData`]. Classification is priority-ordered and mutually
/// exclusive; once the flight advances to a later phase it never returns
/// to an earlier one because DME and altitude only shrink inbound.
pub struct Segmenter<'a> {
    config: &'a ApproachConfig,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: &'a ApproachConfig) -> Self {
        Self { config }
    }

    pub fn segment_file<P: AsRef<Path>>(&self, path: P) -> ScoreResult<FlightData> {
        info!("Segmenting flight log: {}", path.as_ref().display());
        // Flexible so that truncated rows surface as skippable structural
        // faults instead of reader errors.
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        self.segment(&mut reader)
    }

    pub fn segment<R: io::Read>(&self, reader: &mut Reader<R>) -> ScoreResult<FlightData> {
        let header = reader.headers()?.clone();
        let columns = ColumnMap::resolve(&header)?;

        let mut data = FlightData {
            header,
            ..Default::default()
        };

        // Mission-time anchors for the duration math. The approach start is
        // refreshed on every pre-approach sample so it lands on the last one
        // before the initial approach fix; the approach end is refreshed on
        // every final-approach sample so it lands on the last one above
        // minimums.
        let mut approach_start: Option<f64> = None;
        let mut approach_end: Option<f64> = None;
        let mut last_active: Option<f64> = None;
        let mut last_active_clock: Option<NaiveDateTime> = None;

        let mut record = StringRecord::new();
        let mut line = 1usize;
        while reader.read_record(&mut record)? {
            line += 1;
            if !columns.is_complete(&record) {
                warn!("Skipping short data row at line {line}");
                continue;
            }
            let sample = columns.sample(&record, line)?;
            let mission_time = sample.mission_time;
            let sys_time = sample.sys_time;
            let airspeed = sample.airspeed;

            if sample.dme > self.config.initial_fix_dme {
                // Pre-approach: not scored, but it anchors the flight start
                // and the approach-start clock.
                if data.times.begin_flight.is_none() {
                    data.times.begin_flight = sys_time;
                }
                approach_start = Some(mission_time);
            } else if sample.dme < self.config.initial_fix_dme
                && sample.dme > self.config.intersection_dme
            {
                if data.stepdown.is_empty() {
                    data.times.begin_approach = sys_time;
                }
                data.stepdown.push(sample);
                data.stepdown_rows.push(record.clone());
            } else if sample.altitude > self.config.minimums_altitude {
                approach_end = Some(mission_time);
                data.final_approach.push(sample);
                data.final_approach_rows.push(record.clone());
            } else if sample.ground_roll <= 0.0 {
                if data.roundout.is_empty() {
                    data.times.begin_roundout = sys_time;
                }
                data.roundout.push(sample);
                data.roundout_rows.push(record.clone());
            } else {
                if data.landing.is_empty() {
                    data.times.begin_landing = sys_time;
                }
                data.landing.push(sample);
                data.landing_rows.push(record.clone());
            }

            if airspeed > 0.0 {
                last_active = Some(mission_time);
                last_active_clock = sys_time;
            }
        }

        data.times.end_flight = last_active_clock;
        data.dur_total = last_active.unwrap_or(0.0);

        match (approach_start, approach_end) {
            (Some(start), Some(end)) => {
                // Normal completion: the pilot cleared minimums.
                data.dur_approach = end - start;
                data.dur_landing = data.dur_total - end;
            }
            (Some(start), None) => {
                // Flight ended before clearing minimums.
                data.dur_approach = data.dur_total - start;
                data.dur_landing = 0.0;
            }
            (None, _) => {
                // Flight ended before the initial approach fix.
                data.dur_approach = 0.0;
                data.dur_landing = 0.0;
            }
        }

        debug!(
            "Segmented {} samples: {} stepdown, {} final approach, {} roundout, {} landing",
            data.sample_count(),
            data.stepdown.len(),
            data.final_approach.len(),
            data.roundout.len(),
            data.landing.len()
        );

        Ok(data)
    }
}
