use tracing::debug;

use super::penalties::{self, FixLookup};
use super::stats::StatsAccumulator;
use super::{PhaseScore, ScoreCalculation};
use crate::config::ApproachConfig;
use crate::consts::{MAX_PTS_PER_SAMPLE_ILS, MAX_PTS_PER_SAMPLE_LANDING, MAX_PTS_PER_SAMPLE_ROUNDOUT};
use crate::segmenter::FlightData;
use crate::telemetry::TelemetrySample;

/// Runs every per-phase penalty pass and assembles the immutable result.
pub fn score(config: &ApproachConfig, participant: &str, data: FlightData) -> ScoreCalculation {
    let mut stats = StatsAccumulator::default();

    let stepdown_penalty = score_stepdown(config, &data.stepdown, &mut stats);
    let final_penalty = score_final_approach(config, &data.final_approach, &mut stats);
    let roundout_penalty = score_roundout(&data.roundout, &mut stats);
    let landing_penalty = score_landing(&data.landing, &mut stats);

    let ils_count = data.stepdown.len() + data.final_approach.len();
    let approach = PhaseScore::from_penalties(
        ils_count as f64 * MAX_PTS_PER_SAMPLE_ILS,
        stepdown_penalty + final_penalty,
        ils_count,
    );

    let ground_max = data.roundout.len() as f64 * MAX_PTS_PER_SAMPLE_ROUNDOUT
        + data.landing.len() as f64 * MAX_PTS_PER_SAMPLE_LANDING;
    let landing = PhaseScore::from_penalties(
        ground_max,
        roundout_penalty + landing_penalty,
        data.roundout.len() + data.landing.len(),
    );

    let overall = PhaseScore {
        earned: approach.earned + landing.earned,
        max: approach.max + landing.max,
    };

    debug!(
        "Scored {participant}: approach {:.1}/{:.1}, landing {:.1}/{:.1}",
        approach.earned, approach.max, landing.earned, landing.max
    );

    ScoreCalculation {
        participant: participant.to_string(),
        approach,
        landing,
        overall,
        stats: stats.finalize(),
        data,
    }
}

/// Stepdown: localizer + speed + fix-altitude per sample. A sample with no
/// localizer lock forfeits all of its points outright.
fn score_stepdown(
    config: &ApproachConfig,
    samples: &[TelemetrySample],
    stats: &mut StatsAccumulator,
) -> f64 {
    let mut lookup = FixLookup::new(&config.fixes);
    let mut penalty = 0.0;
    for s in samples {
        stats.add_speed(s.airspeed);
        stats.add_bank(s.bank);
        match s.hdef {
            Some(hdef) => {
                stats.add_localizer(hdef);
                let stable = penalties::is_stable(s.bank, s.heading, config.target_course);
                penalty += penalties::localizer(hdef, stable)
                    + penalties::speed(s.airspeed, config.target_speed)
                    + lookup.altitude_penalty(s.dme, s.altitude, s.vertical_speed);
            }
            None => penalty += MAX_PTS_PER_SAMPLE_ILS,
        }
    }
    penalty
}

/// Final approach: localizer + speed + glideslope per sample.
fn score_final_approach(
    config: &ApproachConfig,
    samples: &[TelemetrySample],
    stats: &mut StatsAccumulator,
) -> f64 {
    let mut penalty = 0.0;
    for s in samples {
        stats.add_speed(s.airspeed);
        stats.add_bank(s.bank);
        stats.add_vertical_speed(s.vertical_speed);
        stats.add_glideslope(s.vdef);
        match s.hdef {
            Some(hdef) => {
                stats.add_localizer(hdef);
                let stable = penalties::is_stable(s.bank, s.heading, config.target_course);
                penalty += penalties::localizer(hdef, stable)
                    + penalties::speed(s.airspeed, config.target_speed)
                    + penalties::glideslope(s.vdef, s.vertical_speed);
            }
            None => penalty += MAX_PTS_PER_SAMPLE_ILS,
        }
    }
    penalty
}

/// Roundout: descent-rate + localizer per sample.
fn score_roundout(samples: &[TelemetrySample], stats: &mut StatsAccumulator) -> f64 {
    let mut penalty = 0.0;
    for s in samples {
        stats.add_bank(s.bank);
        match s.hdef {
            Some(hdef) => {
                stats.add_localizer(hdef);
                // Roundout localizer tracking is gated on bank only.
                let stable = penalties::is_stable(s.bank, s.heading, None);
                penalty += penalties::roundout_descent(s.vertical_speed)
                    + penalties::localizer(hdef, stable);
            }
            None => penalty += MAX_PTS_PER_SAMPLE_ROUNDOUT,
        }
    }
    penalty
}

/// Landing: centerline tracking only; the aircraft is on its wheels.
fn score_landing(samples: &[TelemetrySample], stats: &mut StatsAccumulator) -> f64 {
    let mut penalty = 0.0;
    for s in samples {
        match s.hdef {
            Some(hdef) => {
                stats.add_localizer(hdef);
                penalty += penalties::localizer_landing(hdef);
            }
            None => penalty += MAX_PTS_PER_SAMPLE_LANDING,
        }
    }
    penalty
}
