use crate::DashboardApp;
use eframe::egui;
use protocol::DeviceCommand;
use tiltview_core::range::format_axis_time;
use tiltview_core::{Action, ConsoleDirection};

const SENT_COLOR: egui::Color32 = egui::Color32::from_rgb(86, 156, 214);
const RECEIVED_COLOR: egui::Color32 = egui::Color32::from_rgb(212, 212, 212);

impl DashboardApp {
    pub(crate) fn render_console(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Console");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    self.session.apply(Action::ClearConsole);
                }
            });
        });

        egui::ScrollArea::vertical()
            .id_source("console_scroll")
            .max_height(260.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in &self.session.serial.console {
                    let (color, prefix) = match entry.direction {
                        ConsoleDirection::Sent => (SENT_COLOR, ">"),
                        ConsoleDirection::Received => (RECEIVED_COLOR, "<"),
                    };
                    ui.colored_label(
                        color,
                        format!(
                            "{} {prefix} {}",
                            format_axis_time(entry.timestamp),
                            entry.text
                        ),
                    );
                }
            });

        let connected = self.session.serial.is_connected;
        ui.add_enabled_ui(connected, |ui| {
            ui.horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.console_input).hint_text("raw command"),
                );
                let submitted =
                    edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui.button("Send").clicked();
                if (submitted || clicked) && !self.console_input.trim().is_empty() {
                    let command = self.console_input.trim().to_string();
                    if self.send_command(DeviceCommand::Raw(command)) {
                        self.console_input.clear();
                        edit.request_focus();
                    }
                }
            });
        });
    }
}
