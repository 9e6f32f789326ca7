use eframe::egui;
use protocol::{BackendClient, DeviceCommand, DEFAULT_BACKEND_URL};
use std::sync::mpsc::Receiver;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tiltview_core::{Action, ConsoleDirection, ConsoleEntry, SessionState, SlidingWindowStore};
use tiltview_runtime::{TelemetryHandle, TelemetryUpdate};

mod charts;
mod console;
mod controls;
mod notifications;
mod tuning;

use charts::ChartView;
use notifications::NotificationHandler;

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub backend_url: String,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "TiltView".to_string(),
            width: 1280.0,
            height: 720.0,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Repaint cadence while telemetry is flowing; matches the flush interval so
/// the charts redraw once per batch, not once per sample.
const STREAM_REPAINT: Duration = Duration::from_millis(50);
const IDLE_REPAINT: Duration = Duration::from_millis(250);

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub struct DashboardApp {
    backend: BackendClient,
    session: SessionState,
    store: SlidingWindowStore,
    telemetry: Option<(TelemetryHandle, Receiver<TelemetryUpdate>)>,
    link_alive: bool,
    notifications: NotificationHandler,
    pid_chart: ChartView,
    angle_chart: ChartView,
    console_input: String,
    pid_draft: tiltview_core::session::PidGains,
    mahony_draft: tiltview_core::session::MahonyGains,
    offsets_draft: tiltview_core::session::ImuOffsets,
}

impl DashboardApp {
    pub fn new(backend_url: &str) -> Self {
        let mut app = Self {
            backend: BackendClient::new(backend_url),
            session: SessionState::default(),
            store: SlidingWindowStore::default(),
            telemetry: None,
            link_alive: false,
            notifications: NotificationHandler::new(),
            pid_chart: ChartView::pid(),
            angle_chart: ChartView::angle(),
            console_input: String::new(),
            pid_draft: Default::default(),
            mahony_draft: Default::default(),
            offsets_draft: Default::default(),
        };
        app.refresh_ports();
        app
    }

    /// Drains every update the telemetry thread produced since the last
    /// frame. Batches mutate the store (and dirty the charts); gauge and
    /// console updates go straight to session state.
    fn poll_telemetry(&mut self) {
        let Some((_, updates)) = &self.telemetry else {
            return;
        };
        let mut actions = Vec::new();
        let mut pid_batches = Vec::new();
        let mut angle_batches = Vec::new();
        while let Ok(update) = updates.try_recv() {
            match update {
                TelemetryUpdate::LinkUp => self.link_alive = true,
                TelemetryUpdate::LinkDown => {
                    // Passive drop: keep chart contents, the manager retries.
                    self.link_alive = false;
                }
                TelemetryUpdate::PidBatch(batch) => pid_batches.push(batch),
                TelemetryUpdate::AngleBatch(batch) => angle_batches.push(batch),
                TelemetryUpdate::Frequency(hz) => actions.push(Action::SetFrequency(hz)),
                TelemetryUpdate::Console(text) => {
                    actions.push(Action::PushConsole(ConsoleEntry {
                        timestamp: wall_clock_ms(),
                        text,
                        direction: ConsoleDirection::Received,
                    }));
                }
            }
        }
        for action in actions {
            self.session.apply(action);
        }
        for batch in pid_batches {
            self.store.append_pid(batch);
            self.pid_chart.mark_dirty();
        }
        for batch in angle_batches {
            self.store.append_angle(batch);
            self.angle_chart.mark_dirty();
        }
    }

    /// Sends one device command and mirrors it into the console log. REST
    /// failures become dismissable notices, never a crash.
    fn send_command(&mut self, command: DeviceCommand) -> bool {
        match self.backend.send(&command) {
            Ok(()) => {
                self.session.apply(Action::PushConsole(ConsoleEntry {
                    timestamp: wall_clock_ms(),
                    text: command.to_string(),
                    direction: ConsoleDirection::Sent,
                }));
                true
            }
            Err(err) => {
                log::warn!("command failed: {err}");
                self.notifications
                    .show_error("Command failed", &err.to_string());
                false
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_telemetry();
        self.notifications.expire_old();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::SidePanel::right("control_panel")
            .default_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_tuning_forms(ui);
                    ui.separator();
                    self.render_console(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart_area(ui);
        });

        self.notifications.render(ctx);

        let repaint = if self.session.serial.is_streaming {
            STREAM_REPAINT
        } else {
            IDLE_REPAINT
        };
        ctx.request_repaint_after(repaint);
    }
}

pub fn run_gui(config: GuiConfig) -> Result<(), GuiError> {
    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([config.width, config.height]),
        ..Default::default()
    };
    // NOTE: Vsync generates hangs and lag on occluded windows.
    options.vsync = false;

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(DashboardApp::new(&config.backend_url))),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}
