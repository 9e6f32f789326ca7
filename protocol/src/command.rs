use std::fmt;

/// PID loop term addressed by `pid set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidTerm {
    P,
    I,
    D,
}

impl PidTerm {
    fn letter(self) -> char {
        match self {
            PidTerm::P => 'p',
            PidTerm::I => 'i',
            PidTerm::D => 'd',
        }
    }
}

/// Mahony filter coefficient addressed by `imu mahony`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MahonyTerm {
    P,
    I,
}

impl MahonyTerm {
    fn letter(self) -> char {
        match self {
            MahonyTerm::P => 'p',
            MahonyTerm::I => 'i',
        }
    }
}

/// IMU offset axis addressed by `imu offset set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAxis {
    X,
    Y,
    Z,
}

impl OffsetAxis {
    fn letter(self) -> char {
        match self {
            OffsetAxis::X => 'x',
            OffsetAxis::Y => 'y',
            OffsetAxis::Z => 'z',
        }
    }
}

/// Textual command accepted by the device firmware. The wire strings are
/// owned by the firmware; this type only guarantees they are assembled in one
/// place instead of by ad-hoc concatenation at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    PidSet { term: PidTerm, value: f64 },
    PidShow,
    MahonySet { term: MahonyTerm, value: f64 },
    MahonyShow,
    OffsetSet { axis: OffsetAxis, value: f64 },
    OffsetShow,
    Stream { on: bool },
    /// Raw console input forwarded verbatim.
    Raw(String),
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCommand::PidSet { term, value } => {
                write!(f, "pid set {} {}", term.letter(), value)
            }
            DeviceCommand::PidShow => write!(f, "pid show"),
            DeviceCommand::MahonySet { term, value } => {
                write!(f, "imu mahony {} {}", term.letter(), value)
            }
            DeviceCommand::MahonyShow => write!(f, "imu mahony show"),
            DeviceCommand::OffsetSet { axis, value } => {
                write!(f, "imu offset set {} {}", axis.letter(), value)
            }
            DeviceCommand::OffsetShow => write!(f, "imu offset show"),
            DeviceCommand::Stream { on } => {
                write!(f, "pid stream {}", if *on { "on" } else { "off" })
            }
            DeviceCommand::Raw(text) => write!(f, "{text}"),
        }
    }
}
