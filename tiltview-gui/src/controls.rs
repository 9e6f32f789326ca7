use crate::DashboardApp;
use eframe::egui;
use link::HttpLinkFactory;
use protocol::{DeviceCommand, DEFAULT_BAUD};
use tiltview_core::Action;
use tiltview_runtime::{spawn_telemetry, TelemetryConfig};

impl DashboardApp {
    /// Asks the backend for the current port list. Keeps the selection when
    /// it is still present, otherwise falls back to the first port.
    pub(crate) fn refresh_ports(&mut self) {
        match self.backend.ports() {
            Ok(ports) => {
                let selected = &self.session.serial.selected_port;
                if !ports.contains(selected) {
                    let fallback = ports.first().cloned().unwrap_or_default();
                    self.session.apply(Action::SelectPort(fallback));
                }
                self.session.apply(Action::SetPorts(ports));
            }
            Err(err) => {
                log::warn!("port scan failed: {err}");
                self.notifications
                    .show_error("Port scan failed", &err.to_string());
            }
        }
    }

    fn connect(&mut self) {
        let port = self.session.serial.selected_port.clone();
        if port.is_empty() {
            self.notifications
                .show_error("No port selected", "Rescan and pick a serial port first");
            return;
        }
        match self.backend.connect(&port, DEFAULT_BAUD) {
            Ok(()) => {
                self.session.apply(Action::SetConnected(true));
                let factory = HttpLinkFactory::new(self.backend.stream_url());
                self.telemetry = Some(spawn_telemetry(
                    Box::new(factory),
                    TelemetryConfig::default(),
                ));
                // Seed the console with the firmware's current settings.
                self.send_command(DeviceCommand::PidShow);
                self.send_command(DeviceCommand::MahonyShow);
                self.send_command(DeviceCommand::OffsetShow);
                self.notifications.show_info("Connected", &port);
            }
            Err(err) => {
                log::warn!("connect to {port} failed: {err}");
                self.notifications
                    .show_error("Connect failed", &err.to_string());
            }
        }
    }

    fn disconnect(&mut self) {
        if self.session.serial.is_streaming {
            self.set_streaming(false);
        }
        if let Err(err) = self.backend.disconnect() {
            log::warn!("disconnect failed: {err}");
            self.notifications
                .show_error("Disconnect failed", &err.to_string());
        }
        if let Some((handle, _)) = self.telemetry.take() {
            handle.stop();
        }
        self.link_alive = false;
        self.session.apply(Action::SetConnected(false));
        self.session.apply(Action::SetFrequency(0.0));
        self.store.clear_all();
        self.pid_chart.mark_dirty();
    }

    /// Toggles the firmware's telemetry stream. Stopping it deliberately also
    /// wipes the charts; a passive link drop never does.
    fn set_streaming(&mut self, on: bool) {
        if !self.send_command(DeviceCommand::Stream { on }) {
            return;
        }
        if let Some((handle, _)) = &self.telemetry {
            handle.set_streaming(on);
        }
        self.session.apply(Action::SetStreaming(on));
        if !on {
            self.session.apply(Action::SetFrequency(0.0));
            self.store.clear_all();
            self.pid_chart.mark_dirty();
        }
    }

    pub(crate) fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("TiltView");
            ui.separator();

            let connected = self.session.serial.is_connected;
            let mut selected = self.session.serial.selected_port.clone();
            ui.add_enabled_ui(!connected, |ui| {
                egui::ComboBox::from_id_source("port_select")
                    .selected_text(if selected.is_empty() {
                        "select port".to_string()
                    } else {
                        selected.clone()
                    })
                    .show_ui(ui, |ui| {
                        for port in &self.session.serial.available_ports {
                            ui.selectable_value(&mut selected, port.clone(), port);
                        }
                    });
            });
            if selected != self.session.serial.selected_port {
                self.session.apply(Action::SelectPort(selected));
            }
            if !connected && ui.button("Rescan").clicked() {
                self.refresh_ports();
            }

            if connected {
                if ui.button("Disconnect").clicked() {
                    self.disconnect();
                }
                let streaming = self.session.serial.is_streaming;
                let label = if streaming { "Stop stream" } else { "Start stream" };
                if ui.button(label).clicked() {
                    self.set_streaming(!streaming);
                }
            } else if ui.button("Connect").clicked() {
                self.connect();
            }

            ui.separator();
            let connected = self.session.serial.is_connected;
            let (status, color) = if !connected {
                ("offline", egui::Color32::GRAY)
            } else if self.link_alive {
                ("live", egui::Color32::from_rgb(181, 206, 168))
            } else {
                ("reconnecting", egui::Color32::from_rgb(220, 122, 95))
            };
            ui.colored_label(color, format!("\u{25cf} {status}"));

            ui.separator();
            ui.monospace(format!("{:6.1} Hz", self.session.chart.frequency_hz));
            if let Some(angle) = self.store.angle().back() {
                ui.separator();
                ui.monospace(format!(
                    "pitch {:+7.2}\u{b0}  roll {:+7.2}\u{b0}",
                    angle.pitch_angle, angle.roll_angle
                ));
            }
        });
    }
}
