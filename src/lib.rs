pub mod config;
pub mod consts;
pub mod error;
pub mod ingest;
pub mod report;
pub mod scorer;
pub mod segmenter;
pub mod telemetry;
pub mod trim;

pub use config::{ApproachConfig, Fix};
pub use error::{ScoreResult, ScoringError};
pub use scorer::{ScoreCalculation, Scorer};
pub use segmenter::{FlightData, Phase, Segmenter};
