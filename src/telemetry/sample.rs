use serde::Serialize;

/// One synthetic sensor reading, as the firmware reports it.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct FlightSample {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub battery_voltage: f64,
}
