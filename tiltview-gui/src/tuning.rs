use crate::DashboardApp;
use eframe::egui;
use protocol::{DeviceCommand, MahonyTerm, OffsetAxis, PidTerm};
use tiltview_core::Action;

impl DashboardApp {
    pub(crate) fn render_tuning_forms(&mut self, ui: &mut egui::Ui) {
        let connected = self.session.serial.is_connected;

        ui.heading("PID gains");
        egui::Grid::new("pid_gains").num_columns(2).show(ui, |ui| {
            ui.label("P");
            ui.add(egui::DragValue::new(&mut self.pid_draft.p).speed(0.01));
            ui.end_row();
            ui.label("I");
            ui.add(egui::DragValue::new(&mut self.pid_draft.i).speed(0.01));
            ui.end_row();
            ui.label("D");
            ui.add(egui::DragValue::new(&mut self.pid_draft.d).speed(0.01));
            ui.end_row();
        });
        ui.add_enabled_ui(connected, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    self.apply_pid_gains();
                }
                if ui.button("Read").clicked() {
                    self.send_command(DeviceCommand::PidShow);
                }
            });
        });

        ui.separator();
        ui.heading("Mahony filter");
        egui::Grid::new("mahony_gains").num_columns(2).show(ui, |ui| {
            ui.label("Kp");
            ui.add(egui::DragValue::new(&mut self.mahony_draft.p).speed(0.01));
            ui.end_row();
            ui.label("Ki");
            ui.add(egui::DragValue::new(&mut self.mahony_draft.i).speed(0.01));
            ui.end_row();
        });
        ui.add_enabled_ui(connected, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    self.apply_mahony_gains();
                }
                if ui.button("Read").clicked() {
                    self.send_command(DeviceCommand::MahonyShow);
                }
            });
        });

        ui.separator();
        ui.heading("IMU offsets");
        ui.horizontal(|ui| {
            ui.label("Step");
            ui.add(
                egui::DragValue::new(&mut self.offsets_draft.step)
                    .speed(0.01)
                    .clamp_range(0.01..=10.0),
            );
        });
        ui.add_enabled_ui(connected, |ui| {
            self.offset_row(ui, OffsetAxis::X);
            self.offset_row(ui, OffsetAxis::Y);
            self.offset_row(ui, OffsetAxis::Z);
            if ui.button("Read").clicked() {
                self.send_command(DeviceCommand::OffsetShow);
            }
        });
    }

    /// Each gain goes out as its own command; the firmware has no bulk set.
    /// A send failure stops the sequence so state never drifts silently.
    fn apply_pid_gains(&mut self) {
        let draft = self.pid_draft;
        let terms = [
            (PidTerm::P, draft.p, Action::SetPidP(draft.p)),
            (PidTerm::I, draft.i, Action::SetPidI(draft.i)),
            (PidTerm::D, draft.d, Action::SetPidD(draft.d)),
        ];
        for (term, value, action) in terms {
            if !self.send_command(DeviceCommand::PidSet { term, value }) {
                return;
            }
            self.session.apply(action);
        }
    }

    fn apply_mahony_gains(&mut self) {
        let draft = self.mahony_draft;
        let terms = [
            (MahonyTerm::P, draft.p, Action::SetMahonyP(draft.p)),
            (MahonyTerm::I, draft.i, Action::SetMahonyI(draft.i)),
        ];
        for (term, value, action) in terms {
            if !self.send_command(DeviceCommand::MahonySet { term, value }) {
                return;
            }
            self.session.apply(action);
        }
    }

    fn offset_row(&mut self, ui: &mut egui::Ui, axis: OffsetAxis) {
        let (value, label) = match axis {
            OffsetAxis::X => (self.offsets_draft.x, "X"),
            OffsetAxis::Y => (self.offsets_draft.y, "Y"),
            OffsetAxis::Z => (self.offsets_draft.z, "Z"),
        };
        ui.horizontal(|ui| {
            ui.label(label);
            ui.monospace(format!("{value:+.2}"));
            let step = self.offsets_draft.step;
            let mut target = None;
            if ui.small_button("-").clicked() {
                target = Some(value - step);
            }
            if ui.small_button("+").clicked() {
                target = Some(value + step);
            }
            if let Some(value) = target {
                if self.send_command(DeviceCommand::OffsetSet { axis, value }) {
                    match axis {
                        OffsetAxis::X => {
                            self.offsets_draft.x = value;
                            self.session.apply(Action::SetOffsetX(value));
                        }
                        OffsetAxis::Y => {
                            self.offsets_draft.y = value;
                            self.session.apply(Action::SetOffsetY(value));
                        }
                        OffsetAxis::Z => {
                            self.offsets_draft.z = value;
                            self.session.apply(Action::SetOffsetZ(value));
                        }
                    }
                }
            }
        });
    }
}
