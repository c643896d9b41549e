use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::error::{ScoreResult, ScoringError};

// X-Plane dataref column names as they appear in the recording header.
pub const COL_MISSION_TIME: &str = "missn,_time";
pub const COL_AIRSPEED: &str = "_Vind,_kias";
pub const COL_ENGINE: &str = "engn1,__rpm";
pub const COL_BANK: &str = "_roll,__deg";
pub const COL_GROUND_ROLL: &str = "_land,groll";
pub const COL_VERTICAL_SPEED: &str = "__VVI,__fpm";
pub const COL_ALTITUDE: &str = "p-alt,ftMSL";
pub const COL_HEADING: &str = "hding,__mag";
pub const COL_LATITUDE: &str = "__lat,__deg";
pub const COL_LONGITUDE: &str = "__lon,__deg";
pub const COL_DME: &str = "pilN1,dme-d";
pub const COL_HDEF: &str = "pilN1,h-def";
pub const COL_VDEF: &str = "pilN1,v-def";
pub const COL_SYS_TIME: &str = "sys_time";

/// Wall-clock formats produced by the two recording setups (the datarefs
/// network logger and spreadsheet re-exports of it).
const SYS_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%y %H:%M"];

/// One recorded instant of the flight.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Mission-elapsed time in seconds, monotonic within a flight.
    pub mission_time: f64,
    /// Wall-clock timestamp, present only for datarefs-over-network logs.
    pub sys_time: Option<NaiveDateTime>,
    /// Indicated airspeed in knots.
    pub airspeed: f64,
    /// Engine RPM setting.
    pub engine: f64,
    /// Roll (bank) angle in degrees, signed.
    pub bank: f64,
    /// Ground roll distance in feet; positive only after touchdown.
    pub ground_roll: f64,
    /// Vertical speed in fpm, signed, negative = descending.
    pub vertical_speed: f64,
    /// Altitude MSL in feet.
    pub altitude: f64,
    /// Magnetic heading in degrees.
    pub heading: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// DME distance from the runway in nautical miles.
    pub dme: f64,
    /// Localizer deflection in dots. `None` means the receiver had no
    /// localizer lock (recorded as negative zero by the simulator).
    pub hdef: Option<f64>,
    /// Glideslope deflection in dots.
    pub vdef: f64,
}

/// Tries each accepted wall-clock format in turn.
pub fn parse_sys_time(raw: &str) -> ScoreResult<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in SYS_TIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(time);
        }
    }
    Err(ScoringError::Parse(format!(
        "unrecognized timestamp '{trimmed}'"
    )))
}

/// Header positions of the telemetry channels, resolved once per file.
/// Required channels are schema faults when absent; optional channels
/// default to zero per row when the column is missing.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    mission_time: usize,
    airspeed: usize,
    bank: usize,
    ground_roll: usize,
    vertical_speed: usize,
    altitude: usize,
    dme: usize,
    hdef: usize,
    vdef: usize,
    sys_time: Option<usize>,
    engine: Option<usize>,
    heading: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    /// Highest index any resolved channel points at, for the structural
    /// short-row check.
    max_index: usize,
}

impl ColumnMap {
    pub fn resolve(header: &StringRecord) -> ScoreResult<Self> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                ScoringError::Schema(format!("required column '{name}' not found in header"))
            })
        };

        let map = Self {
            mission_time: require(COL_MISSION_TIME)?,
            airspeed: require(COL_AIRSPEED)?,
            bank: require(COL_BANK)?,
            ground_roll: require(COL_GROUND_ROLL)?,
            vertical_speed: require(COL_VERTICAL_SPEED)?,
            altitude: require(COL_ALTITUDE)?,
            dme: require(COL_DME)?,
            hdef: require(COL_HDEF)?,
            vdef: require(COL_VDEF)?,
            sys_time: find(COL_SYS_TIME),
            engine: find(COL_ENGINE),
            heading: find(COL_HEADING),
            latitude: find(COL_LATITUDE),
            longitude: find(COL_LONGITUDE),
            max_index: 0,
        };

        let max_index = [
            Some(map.mission_time),
            Some(map.airspeed),
            Some(map.bank),
            Some(map.ground_roll),
            Some(map.vertical_speed),
            Some(map.altitude),
            Some(map.dme),
            Some(map.hdef),
            Some(map.vdef),
            map.sys_time,
            map.engine,
            map.heading,
            map.latitude,
            map.longitude,
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);

        Ok(Self { max_index, ..map })
    }

    /// Whether the file carries wall-clock timestamps.
    pub fn has_sys_time(&self) -> bool {
        self.sys_time.is_some()
    }

    /// Structural check: a data row with fewer fields than the resolved
    /// channels reach is skipped, not scored.
    pub fn is_complete(&self, record: &StringRecord) -> bool {
        record.len() > self.max_index
    }

    /// Converts one data row into a sample. Any unparsable required cell is
    /// a parse fault that aborts the flight.
    pub fn sample(&self, record: &StringRecord, line: usize) -> ScoreResult<TelemetrySample> {
        let number = |index: usize, name: &str| -> ScoreResult<f64> {
            let raw = record.get(index).unwrap_or("").trim();
            raw.parse::<f64>().map_err(|_| {
                ScoringError::Parse(format!("line {line}: bad {name} value '{raw}'"))
            })
        };
        let optional = |index: Option<usize>, name: &str| -> ScoreResult<f64> {
            match index {
                Some(i) => number(i, name),
                None => Ok(0.0),
            }
        };

        let sys_time = match self.sys_time {
            Some(i) => Some(parse_sys_time(record.get(i).unwrap_or(""))?),
            None => None,
        };

        Ok(TelemetrySample {
            mission_time: number(self.mission_time, "mission time")?,
            sys_time,
            airspeed: number(self.airspeed, "airspeed")?,
            engine: optional(self.engine, "engine RPM")?,
            bank: number(self.bank, "bank angle")?,
            ground_roll: number(self.ground_roll, "ground roll")?,
            vertical_speed: number(self.vertical_speed, "vertical speed")?,
            altitude: number(self.altitude, "altitude")?,
            heading: optional(self.heading, "heading")?,
            latitude: optional(self.latitude, "latitude")?,
            longitude: optional(self.longitude, "longitude")?,
            dme: number(self.dme, "DME")?,
            hdef: decode_hdef(number(self.hdef, "localizer deflection")?),
            vdef: number(self.vdef, "glideslope deflection")?,
        })
    }
}

/// The simulator encodes "no localizer lock" as negative zero, an in-band
/// sentinel that must not be confused with a centered needle. Decode it to
/// an explicit absence at the parse boundary.
fn decode_hdef(value: f64) -> Option<f64> {
    if value == 0.0 && value.is_sign_negative() {
        None
    } else {
        Some(value)
    }
}
