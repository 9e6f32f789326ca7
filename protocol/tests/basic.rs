use protocol::{DeviceCommand, MahonyTerm, OffsetAxis, PidTerm, PushEvent};

#[test]
fn pid_commands_render_firmware_syntax() {
    let cmd = DeviceCommand::PidSet {
        term: PidTerm::P,
        value: 1.5,
    };
    assert_eq!(cmd.to_string(), "pid set p 1.5");
    let cmd = DeviceCommand::PidSet {
        term: PidTerm::D,
        value: 0.02,
    };
    assert_eq!(cmd.to_string(), "pid set d 0.02");
    assert_eq!(DeviceCommand::PidShow.to_string(), "pid show");
}

#[test]
fn mahony_commands_render_firmware_syntax() {
    let cmd = DeviceCommand::MahonySet {
        term: MahonyTerm::I,
        value: 0.1,
    };
    assert_eq!(cmd.to_string(), "imu mahony i 0.1");
    assert_eq!(DeviceCommand::MahonyShow.to_string(), "imu mahony show");
}

#[test]
fn offset_commands_render_firmware_syntax() {
    let cmd = DeviceCommand::OffsetSet {
        axis: OffsetAxis::Z,
        value: -0.25,
    };
    assert_eq!(cmd.to_string(), "imu offset set z -0.25");
    assert_eq!(DeviceCommand::OffsetShow.to_string(), "imu offset show");
}

#[test]
fn stream_commands_render_firmware_syntax() {
    assert_eq!(
        DeviceCommand::Stream { on: true }.to_string(),
        "pid stream on"
    );
    assert_eq!(
        DeviceCommand::Stream { on: false }.to_string(),
        "pid stream off"
    );
}

#[test]
fn raw_command_passes_through() {
    assert_eq!(DeviceCommand::Raw("help".to_string()).to_string(), "help");
}

#[test]
fn parses_pid_event() {
    let raw = r#"{"type":"pid","timestamp":1000,"setpoint":0.0,"pitch":1.25,"error":-1.25}"#;
    let event = PushEvent::parse(raw).expect("pid event");
    assert_eq!(
        event,
        PushEvent::Pid {
            timestamp: 1000,
            setpoint: 0.0,
            pitch: 1.25,
            error: -1.25,
        }
    );
}

#[test]
fn parses_angle_event() {
    let raw = r#"{"type":"angle","timestamp":2000,"pitch_angle":-3.5,"roll_angle":0.5}"#;
    let event = PushEvent::parse(raw).expect("angle event");
    assert_eq!(
        event,
        PushEvent::Angle {
            timestamp: 2000,
            pitch_angle: -3.5,
            roll_angle: 0.5,
        }
    );
}

#[test]
fn parses_freq_and_console_events() {
    let event = PushEvent::parse(r#"{"type":"freq","value":98.5}"#).expect("freq event");
    assert_eq!(event, PushEvent::Freq { value: 98.5 });
    let event = PushEvent::parse(r#"{"type":"console","text":"ok"}"#).expect("console event");
    assert_eq!(
        event,
        PushEvent::Console {
            text: "ok".to_string()
        }
    );
}

#[test]
fn unknown_discriminator_maps_to_unknown() {
    let event = PushEvent::parse(r#"{"type":"battery","value":3.7}"#).expect("unknown event");
    assert_eq!(event, PushEvent::Unknown);
}

#[test]
fn malformed_payloads_yield_none() {
    assert!(PushEvent::parse("not json").is_none());
    assert!(PushEvent::parse(r#"{"timestamp":1}"#).is_none());
    assert!(PushEvent::parse(r#"{"type":"pid","timestamp":"oops"}"#).is_none());
}
