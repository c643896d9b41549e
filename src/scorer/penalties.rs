use crate::config::Fix;
use crate::consts::{
    ALTITUDE_GRACE_FT, FULL_DEFLECTION_DOTS, MAX_COURSE_DEVIATION_DEG, MAX_DESCENT_FPM,
    MAX_STABLE_BANK_DEG, SPEED_TOLERANCE_KT,
};

/// Linear ramp to a full penalty at [`FULL_DEFLECTION_DOTS`].
#[inline]
fn deflection_ramp(dots: f64) -> f64 {
    (dots.abs() / FULL_DEFLECTION_DOTS).min(1.0)
}

/// Smallest angular distance between two compass headings, in degrees.
#[inline]
pub fn course_deviation(heading: f64, course: f64) -> f64 {
    let diff = (heading - course).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// The stability gate for airborne localizer tracking: wings near level
/// and, for procedures that publish one, roughly on the target course.
#[inline]
pub fn is_stable(bank: f64, heading: f64, target_course: Option<f64>) -> bool {
    if bank.abs() >= MAX_STABLE_BANK_DEG {
        return false;
    }
    match target_course {
        Some(course) => course_deviation(heading, course) <= MAX_COURSE_DEVIATION_DEG,
        None => true,
    }
}

/// Localizer penalty during the airborne phases: the needle ramp, gated to
/// a full penalty whenever the sample fails the stability check.
#[inline]
pub fn localizer(hdef: f64, stable: bool) -> f64 {
    if stable {
        deflection_ramp(hdef)
    } else {
        1.0
    }
}

/// Localizer penalty on the runway: the bank gate no longer applies.
#[inline]
pub fn localizer_landing(hdef: f64) -> f64 {
    deflection_ramp(hdef)
}

/// Glideslope penalty: full if descending faster than the gate allows,
/// otherwise the needle ramp.
#[inline]
pub fn glideslope(vdef: f64, vertical_speed: f64) -> f64 {
    if vertical_speed < MAX_DESCENT_FPM {
        1.0
    } else {
        deflection_ramp(vdef)
    }
}

/// Airspeed penalty: linear in the deviation from the assigned speed,
/// saturating at [`SPEED_TOLERANCE_KT`] knots off.
#[inline]
pub fn speed(airspeed: f64, target: f64) -> f64 {
    ((airspeed - target).abs() / SPEED_TOLERANCE_KT).min(1.0)
}

/// Roundout descent-rate penalty: all or nothing.
#[inline]
pub fn roundout_descent(vertical_speed: f64) -> f64 {
    if vertical_speed < MAX_DESCENT_FPM {
        1.0
    } else {
        0.0
    }
}

/// Forward-only cursor into the descending fix table. Stepdown samples
/// arrive with non-increasing DME, so the governing fix (the nearest one
/// the aircraft has not yet passed) only ever moves toward the runway.
pub struct FixLookup<'a> {
    fixes: &'a [Fix],
    current: usize,
    last_dme: f64,
}

impl<'a> FixLookup<'a> {
    /// `fixes` must be non-empty and strictly decreasing in DME, which
    /// [`crate::config::ApproachConfig::validate`] guarantees.
    pub fn new(fixes: &'a [Fix]) -> Self {
        Self {
            fixes,
            current: 0,
            last_dme: f64::INFINITY,
        }
    }

    /// The fix whose minimum governs the aircraft at `dme`: the last fix in
    /// table order with `fix.dme >= dme`.
    pub fn fix_for(&mut self, dme: f64) -> Fix {
        debug_assert!(
            dme <= self.last_dme,
            "stepdown DME must be non-increasing: {} after {}",
            dme,
            self.last_dme
        );
        self.last_dme = dme;
        while self.current + 1 < self.fixes.len() && self.fixes[self.current + 1].dme >= dme {
            self.current += 1;
        }
        self.fixes[self.current]
    }

    /// Stepdown altitude penalty: full if descending through the gate, zero
    /// above the governing minimum, ramping over the grace band below it.
    pub fn altitude_penalty(&mut self, dme: f64, altitude: f64, vertical_speed: f64) -> f64 {
        let fix = self.fix_for(dme);
        if vertical_speed < MAX_DESCENT_FPM {
            1.0
        } else if altitude > fix.min_altitude {
            0.0
        } else if altitude > fix.min_altitude - ALTITUDE_GRACE_FT {
            (fix.min_altitude - altitude) / ALTITUDE_GRACE_FT
        } else {
            1.0
        }
    }
}
