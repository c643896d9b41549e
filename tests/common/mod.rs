#![allow(dead_code)]

use ilscore::telemetry::TelemetrySample;

/// Builder for hand-rolled telemetry samples with sensible on-profile
/// defaults: on speed, wings level, needles centered, gentle descent.
pub struct SampleBuilder {
    sample: TelemetrySample,
}

impl SampleBuilder {
    pub fn new(dme: f64, altitude: f64) -> Self {
        Self {
            sample: TelemetrySample {
                mission_time: 0.0,
                sys_time: None,
                airspeed: 90.0,
                engine: 2200.0,
                bank: 0.0,
                ground_roll: 0.0,
                vertical_speed: -500.0,
                altitude,
                heading: 340.0,
                latitude: 47.4,
                longitude: -122.3,
                dme,
                hdef: Some(0.0),
                vdef: 0.0,
            },
        }
    }

    pub fn time(mut self, mission_time: f64) -> Self {
        self.sample.mission_time = mission_time;
        self
    }

    pub fn airspeed(mut self, airspeed: f64) -> Self {
        self.sample.airspeed = airspeed;
        self
    }

    pub fn bank(mut self, bank: f64) -> Self {
        self.sample.bank = bank;
        self
    }

    pub fn ground_roll(mut self, ground_roll: f64) -> Self {
        self.sample.ground_roll = ground_roll;
        self
    }

    pub fn vertical_speed(mut self, vertical_speed: f64) -> Self {
        self.sample.vertical_speed = vertical_speed;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.sample.heading = heading;
        self
    }

    pub fn hdef(mut self, hdef: Option<f64>) -> Self {
        self.sample.hdef = hdef;
        self
    }

    pub fn vdef(mut self, vdef: f64) -> Self {
        self.sample.vdef = vdef;
        self
    }

    pub fn build(self) -> TelemetrySample {
        self.sample
    }
}

/// Header row for a synthetic flight log, optionally with wall-clock time.
pub fn flight_header(with_sys_time: bool) -> String {
    let mut header = String::from(
        "\"missn,_time\",\"_Vind,_kias\",\"_roll,__deg\",\"_land,groll\",\
         \"__VVI,__fpm\",\"p-alt,ftMSL\",\"pilN1,dme-d\",\"pilN1,h-def\",\"pilN1,v-def\"",
    );
    if with_sys_time {
        header.push_str(",sys_time");
    }
    header.push('\n');
    header
}

/// One synthetic flight-log row matching [`flight_header`]. `hdef` is raw
/// text so tests can exercise the negative-zero sentinel.
#[allow(clippy::too_many_arguments)]
pub fn flight_row(
    mission_time: f64,
    airspeed: f64,
    bank: f64,
    ground_roll: f64,
    vertical_speed: f64,
    altitude: f64,
    dme: f64,
    hdef: &str,
    vdef: f64,
    sys_time: Option<&str>,
) -> String {
    let mut row = format!(
        "{mission_time},{airspeed},{bank},{ground_roll},{vertical_speed},{altitude},{dme},{hdef},{vdef}"
    );
    if let Some(sys_time) = sys_time {
        row.push(',');
        row.push_str(sys_time);
    }
    row.push('\n');
    row
}

/// A straightforward complete flight: two pre-approach samples, two
/// stepdown, two final approach, two roundout, two landing.
pub fn full_flight_csv(with_sys_time: bool) -> String {
    let clock = |hhmmss: &str| format!("2023-04-12 {hhmmss}");
    let sys = |hhmmss: &str| -> Option<String> {
        with_sys_time.then(|| clock(hhmmss))
    };

    let mut csv = flight_header(with_sys_time);
    let rows: [(f64, f64, f64, f64, f64, f64, f64, &str, f64, Option<String>); 10] = [
        (10.0, 100.0, 0.0, 0.0, -200.0, 7400.0, 24.0, "0.1", 0.0, sys("14:00:10")),
        (20.0, 100.0, 0.0, 0.0, -200.0, 7300.0, 23.0, "0.1", 0.0, sys("14:00:20")),
        (30.0, 92.0, 1.0, 0.0, -400.0, 6800.0, 20.0, "0.2", 0.1, sys("14:00:30")),
        (40.0, 91.0, -1.0, 0.0, -400.0, 5600.0, 14.0, "0.1", 0.1, sys("14:00:40")),
        (50.0, 90.0, 0.5, 0.0, -600.0, 1900.0, 5.5, "0.0", 0.2, sys("14:00:50")),
        (60.0, 89.0, 0.5, 0.0, -600.0, 900.0, 2.0, "0.1", 0.1, sys("14:01:00")),
        (70.0, 85.0, 0.0, 0.0, -300.0, 450.0, 0.8, "0.1", 0.0, sys("14:01:10")),
        (80.0, 75.0, 0.0, 0.0, -100.0, 420.0, 0.5, "0.0", 0.0, sys("14:01:20")),
        (90.0, 60.0, 0.0, 800.0, 0.0, 400.0, 0.3, "0.1", 0.0, sys("14:01:30")),
        (100.0, 30.0, 0.0, 2500.0, 0.0, 400.0, 0.1, "0.0", 0.0, sys("14:01:40")),
    ];
    for (t, ias, bank, groll, vs, alt, dme, hdef, vdef, sys_time) in rows {
        csv.push_str(&flight_row(
            t,
            ias,
            bank,
            groll,
            vs,
            alt,
            dme,
            hdef,
            vdef,
            sys_time.as_deref(),
        ));
    }
    csv
}
