pub mod client;
pub mod manager;

pub use client::{ClientCore, TelemetryUpdate};
pub use manager::{spawn_telemetry, TelemetryConfig, TelemetryHandle};
