use crate::sample::{AngleSample, PidSample};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MIN_WINDOW_SECONDS: u32 = 1;
pub const MAX_WINDOW_SECONDS: u32 = 60;
pub const DEFAULT_WINDOW_SECONDS: u32 = 30;

/// Authoritative view of "recent" telemetry: one ordered sequence per series,
/// pruned to a shared time window after every mutation.
///
/// Pruning references the data's own clock (the newest timestamp seen), not
/// wall time, so replayed or simulated streams window correctly. The
/// reference is clamped to the series maximum: a late out-of-order batch can
/// never resurrect already-evicted samples.
#[derive(Debug)]
pub struct SlidingWindowStore {
    pid: VecDeque<PidSample>,
    angle: VecDeque<AngleSample>,
    window_seconds: u32,
}

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Default for SlidingWindowStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECONDS)
    }
}

impl SlidingWindowStore {
    pub fn new(window_seconds: u32) -> Self {
        Self {
            pid: VecDeque::new(),
            angle: VecDeque::new(),
            window_seconds: window_seconds.clamp(MIN_WINDOW_SECONDS, MAX_WINDOW_SECONDS),
        }
    }

    pub fn window_seconds(&self) -> u32 {
        self.window_seconds
    }

    pub fn window_ms(&self) -> u64 {
        u64::from(self.window_seconds) * 1000
    }

    pub fn pid(&self) -> &VecDeque<PidSample> {
        &self.pid
    }

    pub fn angle(&self) -> &VecDeque<AngleSample> {
        &self.angle
    }

    /// Appends a flushed batch in arrival order, then prunes against the
    /// newest timestamp known to the series. No-op for an empty batch.
    pub fn append_pid(&mut self, batch: Vec<PidSample>) {
        let Some(last) = batch.last() else { return };
        let mut reference = last.timestamp;
        if let Some(back) = self.pid.back() {
            reference = reference.max(back.timestamp);
        }
        self.pid.extend(batch);
        let cutoff = reference.saturating_sub(self.window_ms());
        while self.pid.front().is_some_and(|s| s.timestamp < cutoff) {
            self.pid.pop_front();
        }
    }

    pub fn append_angle(&mut self, batch: Vec<AngleSample>) {
        let Some(last) = batch.last() else { return };
        let mut reference = last.timestamp;
        if let Some(back) = self.angle.back() {
            reference = reference.max(back.timestamp);
        }
        self.angle.extend(batch);
        let cutoff = reference.saturating_sub(self.window_ms());
        while self.angle.front().is_some_and(|s| s.timestamp < cutoff) {
            self.angle.pop_front();
        }
    }

    /// Changes the retention window and re-prunes immediately so a shrink is
    /// visible before the next sample arrives. Falls back to wall time as the
    /// reference when the store is empty.
    pub fn set_window(&mut self, seconds: u32) {
        self.window_seconds = seconds.clamp(MIN_WINDOW_SECONDS, MAX_WINDOW_SECONDS);
        log::debug!("retention window set to {}s", self.window_seconds);
        let reference = self.latest_timestamp().unwrap_or_else(wall_clock_ms);
        let cutoff = reference.saturating_sub(self.window_ms());
        while self.pid.front().is_some_and(|s| s.timestamp < cutoff) {
            self.pid.pop_front();
        }
        while self.angle.front().is_some_and(|s| s.timestamp < cutoff) {
            self.angle.pop_front();
        }
    }

    pub fn clear_pid(&mut self) {
        self.pid.clear();
    }

    pub fn clear_angle(&mut self) {
        self.angle.clear();
    }

    pub fn clear_all(&mut self) {
        self.pid.clear();
        self.angle.clear();
    }

    /// Newest timestamp across both series; anchors the scrolling time axis.
    pub fn latest_timestamp(&self) -> Option<u64> {
        let pid = self.pid.back().map(|s| s.timestamp);
        let angle = self.angle.back().map(|s| s.timestamp);
        match (pid, angle) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}
