use rand::Rng;

use super::error::TelemetryError;
use super::phase::Phase;
use super::sample::FlightSample;

pub const FLIGHT_DURATION_MS: i64 = 15_000;
pub const SAMPLE_INTERVAL_MS: i64 = 50;
pub const FLIGHT_HISTORY_LEN: i64 = 5;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;
const PRESSURE_LAPSE_HPA_PER_M: f64 = 0.12;
const GROUND_TEMPERATURE_C: f64 = 15.0;
const TEMPERATURE_LAPSE_C_PER_M: f64 = 0.0065;
const BATTERY_FULL_V: f64 = 3.7;
const BATTERY_DRAIN_V: f64 = 0.3;

const ALTITUDE_NOISE_M: f64 = 2.0;
const VELOCITY_NOISE_M_S: f64 = 1.0;
const ACCELERATION_NOISE_M_S2: f64 = 0.5;

/// Timestamps of the recorded flights, newest first.
///
/// Flights are placed 1, 3, 5, 7 and 9 days before `now_ms`.
pub fn flight_timestamps(now_ms: i64) -> Vec<i64> {
    let mut timestamps: Vec<i64> = (0..FLIGHT_HISTORY_LEN)
        .map(|i| now_ms - (2 * i + 1) * DAY_MS)
        .collect();
    timestamps.sort_unstable_by(|a, b| b.cmp(a));
    timestamps
}

/// Parses the `timestamp` query value into a flight start time.
pub fn parse_start_time(raw: Option<&str>) -> Result<i64, TelemetryError> {
    let raw = raw.ok_or(TelemetryError::MissingTimestamp)?;
    let start_time: i64 = raw
        .trim()
        .parse()
        .map_err(|_| TelemetryError::InvalidTimestamp(raw.to_string()))?;

    // the last sample must still fit in an i64
    start_time
        .checked_add(FLIGHT_DURATION_MS)
        .ok_or_else(|| TelemetryError::InvalidTimestamp(raw.to_string()))?;

    Ok(start_time)
}

/// Synthesizes one full flight starting at `start_time`, in ascending time order.
pub fn generate_series<R: Rng>(start_time: i64, rng: &mut R) -> Vec<FlightSample> {
    (0..FLIGHT_DURATION_MS)
        .step_by(SAMPLE_INTERVAL_MS as usize)
        .map(|offset| sample_at(start_time, offset, rng))
        .collect()
}

fn sample_at<R: Rng>(start_time: i64, offset_ms: i64, rng: &mut R) -> FlightSample {
    let nominal = Phase::at(offset_ms).kinematics(offset_ms);

    let altitude = nominal.altitude + rng.random_range(-ALTITUDE_NOISE_M..=ALTITUDE_NOISE_M);
    let velocity = nominal.velocity + rng.random_range(-VELOCITY_NOISE_M_S..=VELOCITY_NOISE_M_S);
    let acceleration = nominal.acceleration
        + rng.random_range(-ACCELERATION_NOISE_M_S2..=ACCELERATION_NOISE_M_S2);

    // derived channels use the unrounded altitude
    let pressure = SEA_LEVEL_PRESSURE_HPA - altitude * PRESSURE_LAPSE_HPA_PER_M;
    let temperature = GROUND_TEMPERATURE_C - altitude * TEMPERATURE_LAPSE_C_PER_M;
    let battery_voltage =
        BATTERY_FULL_V - (offset_ms as f64 / FLIGHT_DURATION_MS as f64) * BATTERY_DRAIN_V;

    FlightSample {
        timestamp: start_time + offset_ms,
        altitude: round2(altitude),
        velocity: round2(velocity),
        acceleration: round2(acceleration),
        pressure: round2(pressure),
        temperature: round1(temperature),
        battery_voltage: round2(battery_voltage),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
