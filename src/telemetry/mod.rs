mod error;
mod generator;
mod phase;
mod sample;

pub use error::TelemetryError;
pub use generator::{flight_timestamps, generate_series, parse_start_time};
pub use sample::FlightSample;
