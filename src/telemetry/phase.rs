//! Flight phases of the synthetic water rocket flight.
//!
//! Each phase owns a time window (milliseconds since launch) and a linear
//! kinematic profile. Neighbouring phases agree on altitude at their shared
//! boundary, so the nominal altitude curve is continuous.

pub const ASCENT_START_MS: i64 = 2_000;
pub const DESCENT_START_MS: i64 = 8_000;
pub const PARACHUTE_START_MS: i64 = 12_000;

const GRAVITY: f64 = -9.81;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Launch,
    Ascent,
    Descent,
    Parachute,
}

/// Noise-free altitude (m), velocity (m/s) and acceleration (m/s²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Phase {
    pub fn at(offset_ms: i64) -> Self {
        if offset_ms < ASCENT_START_MS {
            Phase::Launch
        } else if offset_ms < DESCENT_START_MS {
            Phase::Ascent
        } else if offset_ms < PARACHUTE_START_MS {
            Phase::Descent
        } else {
            Phase::Parachute
        }
    }

    /// Evaluates this phase's profile at `offset_ms`.
    ///
    /// The offset is not clamped to the phase window, which lets callers
    /// compare two phases at their shared boundary.
    pub fn kinematics(self, offset_ms: i64) -> Kinematics {
        let t = offset_ms as f64;
        match self {
            Phase::Launch => {
                let p = t / 2000.0;
                Kinematics {
                    altitude: 150.0 * p,
                    velocity: 75.0 - 30.0 * p,
                    acceleration: 20.0 - t / 100.0,
                }
            }
            Phase::Ascent => {
                let p = (t - 2000.0) / 6000.0;
                Kinematics {
                    altitude: 150.0 + 250.0 * p,
                    velocity: 45.0 - 60.0 * p,
                    acceleration: GRAVITY - 5.0 * p,
                }
            }
            Phase::Descent => {
                let p = (t - 8000.0) / 4000.0;
                Kinematics {
                    altitude: 400.0 - 300.0 * p,
                    velocity: -15.0 - 10.0 * p,
                    acceleration: GRAVITY,
                }
            }
            Phase::Parachute => {
                let p = (t - 12000.0) / 3000.0;
                Kinematics {
                    altitude: 100.0 - 100.0 * p,
                    velocity: -25.0 + 20.0 * p,
                    acceleration: 5.0,
                }
            }
        }
    }
}
