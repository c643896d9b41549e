use chrono::NaiveDate;
use ilscore::{ApproachConfig, ScoringError, Segmenter};

mod common;
use common::{flight_header, flight_row, full_flight_csv};

fn segment(csv: &str) -> Result<ilscore::FlightData, ScoringError> {
    let config = ApproachConfig::default();
    let segmenter = Segmenter::new(&config);
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    segmenter.segment(&mut reader)
}

#[test]
fn classifies_every_sample_into_exactly_one_phase() {
    let data = segment(&full_flight_csv(false)).unwrap();

    assert_eq!(data.stepdown.len(), 2);
    assert_eq!(data.final_approach.len(), 2);
    assert_eq!(data.roundout.len(), 2);
    assert_eq!(data.landing.len(), 2);
    // 10 rows total, 2 discarded before the initial approach fix.
    assert_eq!(data.sample_count(), 8);
}

#[test]
fn phase_rows_mirror_sample_buckets() {
    let data = segment(&full_flight_csv(false)).unwrap();
    assert_eq!(data.stepdown_rows.len(), data.stepdown.len());
    assert_eq!(data.final_approach_rows.len(), data.final_approach.len());
    assert_eq!(data.roundout_rows.len(), data.roundout.len());
    assert_eq!(data.landing_rows.len(), data.landing.len());
}

#[test]
fn classifier_never_returns_to_an_earlier_phase() {
    let data = segment(&full_flight_csv(false)).unwrap();
    // Mission times must be ordered phase-block by phase-block.
    let last_stepdown = data.stepdown.last().unwrap().mission_time;
    let first_final = data.final_approach.first().unwrap().mission_time;
    let last_final = data.final_approach.last().unwrap().mission_time;
    let first_roundout = data.roundout.first().unwrap().mission_time;
    let last_roundout = data.roundout.last().unwrap().mission_time;
    let first_landing = data.landing.first().unwrap().mission_time;

    assert!(last_stepdown < first_final);
    assert!(last_final < first_roundout);
    assert!(last_roundout < first_landing);
}

#[test]
fn durations_for_a_completed_flight() {
    let data = segment(&full_flight_csv(false)).unwrap();
    // Approach runs from the last pre-IAF sample (t=20) to the last sample
    // above minimums (t=60); the flight stays active through t=100.
    assert_eq!(data.dur_total, 100.0);
    assert_eq!(data.dur_approach, 40.0);
    assert_eq!(data.dur_landing, 40.0);
}

#[test]
fn durations_when_flight_ends_before_clearing_minimums() {
    let mut csv = flight_header(false);
    csv.push_str(&flight_row(10.0, 100.0, 0.0, 0.0, -200.0, 7400.0, 24.0, "0.1", 0.0, None));
    csv.push_str(&flight_row(20.0, 92.0, 0.0, 0.0, -400.0, 6800.0, 20.0, "0.1", 0.1, None));
    csv.push_str(&flight_row(30.0, 91.0, 0.0, 0.0, -900.0, 6000.0, 15.0, "0.1", 0.1, None));

    let data = segment(&csv).unwrap();
    assert!(data.final_approach.is_empty());
    assert_eq!(data.dur_total, 30.0);
    assert_eq!(data.dur_approach, 20.0);
    assert_eq!(data.dur_landing, 0.0);
}

#[test]
fn durations_when_flight_never_reaches_the_iaf() {
    let mut csv = flight_header(false);
    csv.push_str(&flight_row(10.0, 100.0, 0.0, 0.0, -200.0, 7400.0, 26.0, "0.1", 0.0, None));
    csv.push_str(&flight_row(20.0, 100.0, 0.0, 0.0, -200.0, 7300.0, 25.0, "0.1", 0.0, None));

    let data = segment(&csv).unwrap();
    assert_eq!(data.sample_count(), 0);
    assert_eq!(data.dur_total, 20.0);
    assert_eq!(data.dur_approach, 0.0);
    assert_eq!(data.dur_landing, 0.0);
}

#[test]
fn wall_clock_boundaries_recorded_when_present() {
    let data = segment(&full_flight_csv(true)).unwrap();
    let day = NaiveDate::from_ymd_opt(2023, 4, 12).unwrap();
    let at = |h, m, s| day.and_hms_opt(h, m, s).unwrap();

    assert_eq!(data.times.begin_flight, Some(at(14, 0, 10)));
    assert_eq!(data.times.begin_approach, Some(at(14, 0, 30)));
    assert_eq!(data.times.begin_roundout, Some(at(14, 1, 10)));
    assert_eq!(data.times.begin_landing, Some(at(14, 1, 30)));
    assert_eq!(data.times.end_flight, Some(at(14, 1, 40)));
}

#[test]
fn wall_clock_boundaries_absent_without_sys_time() {
    let data = segment(&full_flight_csv(false)).unwrap();
    assert_eq!(data.times, Default::default());
}

#[test]
fn sample_at_exactly_the_iaf_falls_through_to_the_altitude_test() {
    // dme == initial fix distance matches neither the pre-approach nor the
    // stepdown window, so the altitude condition decides.
    let mut csv = flight_header(false);
    csv.push_str(&flight_row(10.0, 90.0, 0.0, 0.0, -400.0, 6900.0, 22.2, "0.1", 0.1, None));

    let data = segment(&csv).unwrap();
    assert!(data.stepdown.is_empty());
    assert_eq!(data.final_approach.len(), 1);
}

#[test]
fn short_row_is_skipped_and_processing_continues() {
    let mut csv = flight_header(false);
    csv.push_str(&flight_row(10.0, 92.0, 0.0, 0.0, -400.0, 6800.0, 20.0, "0.1", 0.1, None));
    csv.push_str("30.0,91.0\n");
    csv.push_str(&flight_row(40.0, 91.0, 0.0, 0.0, -400.0, 5600.0, 14.0, "0.1", 0.1, None));

    let config = ApproachConfig::default();
    let segmenter = Segmenter::new(&config);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv.as_bytes());
    let data = segmenter.segment(&mut reader).unwrap();
    assert_eq!(data.stepdown.len(), 2);
}

#[test]
fn unparsable_cell_aborts_the_flight() {
    let mut csv = flight_header(false);
    csv.push_str("10.0,92.0,0.0,0.0,-400.0,not-a-number,20.0,0.1,0.1\n");

    let err = segment(&csv).unwrap_err();
    assert!(matches!(err, ScoringError::Parse(_)));
}

#[test]
fn missing_required_column_aborts_before_any_row() {
    let csv = "\"missn,_time\",\"_Vind,_kias\"\n10.0,92.0\n";
    let err = segment(csv).unwrap_err();
    assert!(matches!(err, ScoringError::Schema(_)));
}
