use serde::{Deserialize, Serialize};

/// One message on the backend push channel. The backend emits a single JSON
/// object per message with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushEvent {
    Pid {
        timestamp: u64,
        setpoint: f64,
        pitch: f64,
        error: f64,
    },
    Angle {
        timestamp: u64,
        pitch_angle: f64,
        roll_angle: f64,
    },
    Freq {
        value: f64,
    },
    Console {
        text: String,
    },
    /// Any discriminator this build does not know about. Kept as a variant so
    /// newer backends do not turn into parse failures.
    #[serde(other)]
    Unknown,
}

impl PushEvent {
    /// Parses one raw push message. Malformed payloads yield `None` and a
    /// debug log line; callers drop them silently.
    pub fn parse(raw: &str) -> Option<PushEvent> {
        match serde_json::from_str(raw) {
            Ok(event) => Some(event),
            Err(err) => {
                log::debug!("discarding malformed push message: {err}");
                None
            }
        }
    }
}
