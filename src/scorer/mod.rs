pub mod engine;
pub mod penalties;
pub mod stats;

pub use self::stats::FlightStats;

use crate::config::ApproachConfig;
use crate::error::ScoreResult;
use crate::segmenter::FlightData;

/// Points earned against the maximum achievable for one portion of the
/// flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseScore {
    pub earned: f64,
    pub max: f64,
}

impl PhaseScore {
    /// A portion that contributed no samples keeps a maximum of 1 and earns
    /// 0, so percentages stay defined without awarding free credit.
    fn from_penalties(max: f64, penalty: f64, sample_count: usize) -> Self {
        if sample_count == 0 {
            Self { earned: 0.0, max: 1.0 }
        } else {
            Self {
                earned: max - penalty,
                max,
            }
        }
    }

    /// Fraction of the achievable points earned, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.earned / self.max
    }
}

/// The finished scoring of one flight. Constructed by [`engine::score`] in
/// a single pass and read-only afterward.
#[derive(Debug, Clone)]
pub struct ScoreCalculation {
    pub participant: String,
    /// Stepdown + final approach.
    pub approach: PhaseScore,
    /// Roundout + landing.
    pub landing: PhaseScore,
    pub overall: PhaseScore,
    pub stats: FlightStats,
    pub data: FlightData,
}

/// Penalty scoring engine for one approach procedure. Holds only the
/// validated immutable configuration, so one scorer can serve any number
/// of flights, concurrently if needed.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ApproachConfig,
}

impl Scorer {
    pub fn new(config: ApproachConfig) -> ScoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ApproachConfig {
        &self.config
    }

    pub fn score(&self, participant: &str, data: FlightData) -> ScoreCalculation {
        engine::score(&self.config, participant, data)
    }
}
