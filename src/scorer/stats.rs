/// Running sums gathered alongside the penalty pass. Finalized exactly once
/// into a [`FlightStats`]; the scoring result itself stays immutable.
#[derive(Debug, Default, Clone)]
pub struct StatsAccumulator {
    speed_total: f64,
    speed_count: usize,

    vertical_speed_total: f64,
    vertical_speed_count: usize,

    localizer_total: f64,
    localizer_count: usize,

    glideslope_total: f64,
    glideslope_count: usize,

    bank_total: f64,
    bank_count: usize,

    max_bank: f64,
}

impl StatsAccumulator {
    /// Airspeed during the stepdown and final approach phases.
    pub fn add_speed(&mut self, airspeed: f64) {
        self.speed_total += airspeed;
        self.speed_count += 1;
    }

    /// Vertical speed during the final approach only.
    pub fn add_vertical_speed(&mut self, vertical_speed: f64) {
        self.vertical_speed_total += vertical_speed;
        self.vertical_speed_count += 1;
    }

    /// Localizer needle magnitude, any phase. Samples with no localizer
    /// lock are never added.
    pub fn add_localizer(&mut self, hdef: f64) {
        self.localizer_total += hdef.abs();
        self.localizer_count += 1;
    }

    /// Glideslope needle magnitude during the final approach.
    pub fn add_glideslope(&mut self, vdef: f64) {
        self.glideslope_total += vdef.abs();
        self.glideslope_count += 1;
    }

    /// Bank angle during the stepdown, final approach, and roundout. Tracks
    /// the largest magnitude seen.
    pub fn add_bank(&mut self, bank: f64) {
        self.bank_total += bank;
        self.bank_count += 1;
        if bank.abs() > self.max_bank {
            self.max_bank = bank.abs();
        }
    }

    pub fn finalize(self) -> FlightStats {
        fn mean(total: f64, count: usize) -> f64 {
            if count == 0 {
                0.0
            } else {
                total / count as f64
            }
        }

        FlightStats {
            avg_approach_speed: mean(self.speed_total, self.speed_count),
            avg_final_vertical_speed: mean(self.vertical_speed_total, self.vertical_speed_count),
            avg_localizer_deflection: mean(self.localizer_total, self.localizer_count),
            avg_glideslope_deflection: mean(self.glideslope_total, self.glideslope_count),
            avg_bank_angle: mean(self.bank_total, self.bank_count),
            max_bank_angle: self.max_bank,
        }
    }
}

/// Descriptive statistics reported next to the score. They never feed back
/// into the score itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightStats {
    /// Mean airspeed across the stepdown and final approach, knots.
    pub avg_approach_speed: f64,
    /// Mean vertical speed across the final approach, fpm.
    pub avg_final_vertical_speed: f64,
    /// Mean localizer needle magnitude across all scored phases, dots.
    pub avg_localizer_deflection: f64,
    /// Mean glideslope needle magnitude across the final approach, dots.
    pub avg_glideslope_deflection: f64,
    /// Mean signed bank angle across the airborne scored phases, degrees.
    pub avg_bank_angle: f64,
    /// Largest bank magnitude seen before touchdown, degrees.
    pub max_bank_angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_finalizes_to_zero() {
        let stats = StatsAccumulator::default().finalize();
        assert_eq!(stats, FlightStats::default());
    }

    #[test]
    fn max_bank_tracks_magnitude() {
        let mut acc = StatsAccumulator::default();
        acc.add_bank(5.0);
        acc.add_bank(-22.0);
        acc.add_bank(10.0);
        let stats = acc.finalize();
        assert_eq!(stats.max_bank_angle, 22.0);
        assert!((stats.avg_bank_angle - (-7.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn localizer_mean_uses_magnitude() {
        let mut acc = StatsAccumulator::default();
        acc.add_localizer(-1.0);
        acc.add_localizer(1.0);
        assert_eq!(acc.finalize().avg_localizer_deflection, 1.0);
    }
}
