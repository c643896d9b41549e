/// Deflection (dots) at which the localizer/glideslope penalty saturates.
pub const FULL_DEFLECTION_DOTS: f64 = 2.5;

/// Bank angle (degrees, absolute) beyond which a sample is considered
/// unstabilized and the localizer penalty saturates outright.
pub const MAX_STABLE_BANK_DEG: f64 = 15.0;

/// Vertical speed (signed fpm, negative = descending) below which the
/// descent-rate gates saturate their penalty.
pub const MAX_DESCENT_FPM: f64 = -1000.0;

/// Deviation from the target course (degrees) beyond which a sample is
/// considered unstabilized, when a procedure defines a target course.
pub const MAX_COURSE_DEVIATION_DEG: f64 = 25.0;

/// Band below a fix's minimum altitude (feet) over which the altitude
/// penalty ramps from 0 to 1.
pub const ALTITUDE_GRACE_FT: f64 = 100.0;

/// Airspeed error (knots) at which the speed penalty saturates.
pub const SPEED_TOLERANCE_KT: f64 = 10.0;

/// Max points earnable per sample during the stepdown and final approach
/// phases (1 each for localizer, speed, and altitude/glideslope).
pub const MAX_PTS_PER_SAMPLE_ILS: f64 = 3.0;

/// Max points earnable per sample during the roundout phase.
pub const MAX_PTS_PER_SAMPLE_ROUNDOUT: f64 = 2.0;

/// Max points earnable per sample during the landing phase.
pub const MAX_PTS_PER_SAMPLE_LANDING: f64 = 2.0;
