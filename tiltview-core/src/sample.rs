use serde::{Deserialize, Serialize};

/// One PID-loop measurement. Timestamps are milliseconds since epoch as
/// reported by the device side; duplicates are legal and kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidSample {
    pub timestamp: u64,
    pub setpoint: f64,
    pub pitch: f64,
    pub error: f64,
}

/// One IMU attitude measurement. Angles are degrees in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub timestamp: u64,
    pub pitch_angle: f64,
    pub roll_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Pid,
    Angle,
}
