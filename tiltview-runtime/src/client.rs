use protocol::PushEvent;
use tiltview_core::{AngleSample, PidSample, SampleBuffer};

/// State change pushed from the telemetry thread to the UI. Batches arrive at
/// most once per flush tick; frequency and console updates are immediate.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryUpdate {
    LinkUp,
    LinkDown,
    PidBatch(Vec<PidSample>),
    AngleBatch(Vec<AngleSample>),
    Frequency(f64),
    Console(String),
}

/// Deterministic half of the connection manager: classification, the
/// streaming gate and the buffer/flush cycle, with no threads or clocks so
/// the whole state machine is testable call by call. The thread wrapper in
/// [`crate::manager`] owns the timers and the transport.
#[derive(Debug, Default)]
pub struct ClientCore {
    streaming: bool,
    buffer: SampleBuffer,
}

impl ClientCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Classifies one raw push message. Chart samples are buffered (or
    /// dropped while the streaming gate is closed, so they can never leak
    /// into a later session); gauge and console traffic passes through
    /// immediately. Malformed or unknown payloads dispatch nothing.
    pub fn handle_message(&mut self, raw: &str) -> Option<TelemetryUpdate> {
        match PushEvent::parse(raw)? {
            PushEvent::Pid {
                timestamp,
                setpoint,
                pitch,
                error,
            } => {
                if self.streaming {
                    self.buffer.push_pid(PidSample {
                        timestamp,
                        setpoint,
                        pitch,
                        error,
                    });
                }
                None
            }
            PushEvent::Angle {
                timestamp,
                pitch_angle,
                roll_angle,
            } => {
                if self.streaming {
                    self.buffer.push_angle(AngleSample {
                        timestamp,
                        pitch_angle,
                        roll_angle,
                    });
                }
                None
            }
            PushEvent::Freq { value } => Some(TelemetryUpdate::Frequency(value)),
            PushEvent::Console { text } => Some(TelemetryUpdate::Console(text)),
            PushEvent::Unknown => None,
        }
    }

    /// Opens or closes the streaming gate. Closing it zeroes the frequency
    /// gauge and discards anything buffered but not yet flushed; stale
    /// in-flight samples must not reappear when streaming restarts.
    pub fn set_streaming(&mut self, on: bool) -> Option<TelemetryUpdate> {
        self.streaming = on;
        if on {
            return None;
        }
        self.buffer.clear();
        Some(TelemetryUpdate::Frequency(0.0))
    }

    /// Drains the buffer into at most one batch update per series. An empty
    /// buffer produces no updates at all, so an idle stream never wakes the
    /// render path.
    pub fn flush(&mut self) -> Vec<TelemetryUpdate> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        let (pid, angle) = self.buffer.flush();
        let mut updates = Vec::with_capacity(2);
        if !pid.is_empty() {
            updates.push(TelemetryUpdate::PidBatch(pid));
        }
        if !angle.is_empty() {
            updates.push(TelemetryUpdate::AngleBatch(angle));
        }
        updates
    }

    /// Discards buffered samples, used on teardown.
    pub fn discard_buffered(&mut self) {
        self.buffer.clear();
    }
}
