use crate::sample::{AngleSample, PidSample};

/// Accumulates inbound samples between flush ticks so a high-rate stream
/// never drives the render path directly. Appends are O(1) and unbounded;
/// the periodic flush drains faster than any expected device rate fills.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    pid: Vec<PidSample>,
    angle: Vec<AngleSample>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_pid(&mut self, sample: PidSample) {
        self.pid.push(sample);
    }

    pub fn push_angle(&mut self, sample: AngleSample) {
        self.angle.push(sample);
    }

    pub fn len(&self) -> usize {
        self.pid.len() + self.angle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pid.is_empty() && self.angle.is_empty()
    }

    /// Atomically drains both queues, returning whatever accumulated since
    /// the previous flush. Either batch may be empty.
    pub fn flush(&mut self) -> (Vec<PidSample>, Vec<AngleSample>) {
        (
            std::mem::take(&mut self.pid),
            std::mem::take(&mut self.angle),
        )
    }

    /// Discards buffered samples without flushing them anywhere. Used when
    /// streaming stops so stale in-flight points never reappear.
    pub fn clear(&mut self) {
        self.pid.clear();
        self.angle.clear();
    }
}
