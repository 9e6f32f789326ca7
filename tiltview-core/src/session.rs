use crate::store::{DEFAULT_WINDOW_SECONDS, MAX_WINDOW_SECONDS, MIN_WINDOW_SECONDS};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Console entries older than this fall off the front.
pub const CONSOLE_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleDirection {
    Sent,
    Received,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub timestamp: u64,
    pub text: String,
    pub direction: ConsoleDirection,
}

/// Serial link state as the user sees it. `is_streaming` is only meaningful
/// while `is_connected` holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerialState {
    pub is_connected: bool,
    pub is_streaming: bool,
    pub selected_port: String,
    pub available_ports: Vec<String>,
    pub console: VecDeque<ConsoleEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub time_window_seconds: u32,
    pub frequency_hz: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            time_window_seconds: DEFAULT_WINDOW_SECONDS,
            frequency_hz: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MahonyGains {
    pub p: f64,
    pub i: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuOffsets {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub step: f64,
}

impl Default for ImuOffsets {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            step: 0.10,
        }
    }
}

/// Every state transition the dashboard can make, one tagged variant each.
/// Consumed by the pure per-slice reducers below.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPorts(Vec<String>),
    SelectPort(String),
    SetConnected(bool),
    SetStreaming(bool),
    PushConsole(ConsoleEntry),
    ClearConsole,
    SetTimeWindow(u32),
    SetFrequency(f64),
    SetPidP(f64),
    SetPidI(f64),
    SetPidD(f64),
    SetMahonyP(f64),
    SetMahonyI(f64),
    SetOffsetX(f64),
    SetOffsetY(f64),
    SetOffsetZ(f64),
    SetOffsetStep(f64),
}

/// Whole-session UI state, volatile for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub serial: SerialState,
    pub chart: ChartConfig,
    pub pid: PidGains,
    pub mahony: MahonyGains,
    pub offsets: ImuOffsets,
}

impl SessionState {
    /// Single top-level transition function; each slice reducer ignores
    /// actions that do not concern it.
    pub fn apply(&mut self, action: Action) {
        reduce_serial(&mut self.serial, &action);
        reduce_chart(&mut self.chart, &action);
        reduce_pid(&mut self.pid, &action);
        reduce_mahony(&mut self.mahony, &action);
        reduce_offsets(&mut self.offsets, &action);
    }
}

fn reduce_serial(state: &mut SerialState, action: &Action) {
    match action {
        Action::SetPorts(ports) => state.available_ports = ports.clone(),
        Action::SelectPort(port) => state.selected_port = port.clone(),
        Action::SetConnected(connected) => {
            state.is_connected = *connected;
            if !connected {
                state.is_streaming = false;
            }
        }
        Action::SetStreaming(streaming) => state.is_streaming = *streaming,
        Action::PushConsole(entry) => {
            state.console.push_back(entry.clone());
            while state.console.len() > CONSOLE_CAPACITY {
                state.console.pop_front();
            }
        }
        Action::ClearConsole => state.console.clear(),
        _ => {}
    }
}

fn reduce_chart(state: &mut ChartConfig, action: &Action) {
    match action {
        Action::SetTimeWindow(seconds) => {
            state.time_window_seconds = (*seconds).clamp(MIN_WINDOW_SECONDS, MAX_WINDOW_SECONDS);
        }
        Action::SetFrequency(hz) => state.frequency_hz = *hz,
        _ => {}
    }
}

fn reduce_pid(state: &mut PidGains, action: &Action) {
    match action {
        Action::SetPidP(v) => state.p = *v,
        Action::SetPidI(v) => state.i = *v,
        Action::SetPidD(v) => state.d = *v,
        _ => {}
    }
}

fn reduce_mahony(state: &mut MahonyGains, action: &Action) {
    match action {
        Action::SetMahonyP(v) => state.p = *v,
        Action::SetMahonyI(v) => state.i = *v,
        _ => {}
    }
}

fn reduce_offsets(state: &mut ImuOffsets, action: &Action) {
    match action {
        Action::SetOffsetX(v) => state.x = *v,
        Action::SetOffsetY(v) => state.y = *v,
        Action::SetOffsetZ(v) => state.z = *v,
        Action::SetOffsetStep(v) => state.step = *v,
        _ => {}
    }
}
