use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ScoreResult, ScoringError};

/// A published fix on the approach plate: a DME distance from the runway
/// paired with the minimum MSL altitude the aircraft must hold until the
/// next fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Distance from the runway in nautical miles.
    pub dme: f64,
    /// Minimum stepdown MSL altitude in feet until this fix is passed.
    pub min_altitude: f64,
}

impl Fix {
    pub fn new(dme: f64, min_altitude: f64) -> Self {
        Self { dme, min_altitude }
    }
}

/// Everything specific to one approach procedure and aircraft. Built once,
/// validated once, then shared read-only by the segmenter and scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachConfig {
    /// Human-readable procedure identifier, used in logs only.
    pub procedure: String,

    /// Decision minimums MSL altitude in feet.
    pub minimums_altitude: f64,

    /// DME distance of the initial approach fix in nautical miles. Samples
    /// farther out than this are pre-approach and are not scored.
    pub initial_fix_dme: f64,

    /// DME distance of the intersection fix where the stepdown sequence
    /// hands over to the final approach, in nautical miles.
    pub intersection_dme: f64,

    /// Assigned approach speed for the aircraft in knots.
    pub target_speed: f64,

    /// Published final approach course in degrees magnetic. When set, a
    /// heading more than 25 degrees off course fails the stability gate
    /// the same way excessive bank does.
    pub target_course: Option<f64>,

    /// Stepdown fixes ordered by strictly decreasing DME.
    pub fixes: Vec<Fix>,
}

impl Default for ApproachConfig {
    /// ILS 34R at KSEA, flown at 90 knots.
    fn default() -> Self {
        Self {
            procedure: "ILS 34R KSEA".to_string(),
            minimums_altitude: 572.0,
            initial_fix_dme: 22.2,
            intersection_dme: 6.3,
            target_speed: 90.0,
            target_course: None,
            fixes: vec![
                Fix::new(22.2, 7000.0),
                Fix::new(19.1, 6000.0),
                Fix::new(15.9, 5000.0),
                Fix::new(12.5, 4000.0),
                Fix::new(6.3, 2200.0),
            ],
        }
    }
}

impl ApproachConfig {
    /// Loads a procedure definition from a JSON file. Missing fields fall
    /// back to the embedded KSEA defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoreResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: ApproachConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the ordering invariants the fix-table lookup relies on.
    pub fn validate(&self) -> ScoreResult<()> {
        if self.fixes.is_empty() {
            return Err(ScoringError::Config(
                "approach procedure has no stepdown fixes".to_string(),
            ));
        }
        if self.intersection_dme >= self.initial_fix_dme {
            return Err(ScoringError::Config(format!(
                "intersection fix ({} nm) must be inside the initial approach fix ({} nm)",
                self.intersection_dme, self.initial_fix_dme
            )));
        }
        for pair in self.fixes.windows(2) {
            if pair[1].dme >= pair[0].dme {
                return Err(ScoringError::Config(format!(
                    "fix DMEs must strictly decrease: {} nm follows {} nm",
                    pair[1].dme, pair[0].dme
                )));
            }
            if pair[1].min_altitude > pair[0].min_altitude {
                return Err(ScoringError::Config(format!(
                    "fix minimums must not increase toward the runway: {} ft follows {} ft",
                    pair[1].min_altitude, pair[0].min_altitude
                )));
            }
        }
        Ok(())
    }
}
