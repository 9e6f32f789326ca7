pub mod client;
pub mod command;
pub mod event;

pub use client::{BackendClient, ProtocolError, DEFAULT_BACKEND_URL, DEFAULT_BAUD};
pub use command::{DeviceCommand, MahonyTerm, OffsetAxis, PidTerm};
pub use event::PushEvent;
