use crate::DashboardApp;
use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds};
use tiltview_core::range::{dynamic_y_range, format_axis_time, x_range, ANGLE_Y_RANGE};
use tiltview_core::store::{MAX_WINDOW_SECONDS, MIN_WINDOW_SECONDS};
use tiltview_core::{Action, SeriesKind, SlidingWindowStore};

pub(crate) struct SeriesStyle {
    pub(crate) name: &'static str,
    pub(crate) color: egui::Color32,
}

/// One scrolling chart: series styles, per-series visibility and the cached
/// auto y-range. The cache is recomputed only when the underlying data or the
/// visibility set changed, not on every frame.
pub(crate) struct ChartView {
    id: &'static str,
    title: &'static str,
    kind: SeriesKind,
    series: Vec<SeriesStyle>,
    hidden: Vec<bool>,
    fixed_y: Option<(f64, f64)>,
    cached_y: (f64, f64),
    dirty: bool,
}

impl ChartView {
    pub(crate) fn pid() -> Self {
        Self {
            id: "pid_chart",
            title: "PID response",
            kind: SeriesKind::Pid,
            series: vec![
                SeriesStyle {
                    name: "Setpoint",
                    color: egui::Color32::from_rgb(86, 156, 214),
                },
                SeriesStyle {
                    name: "Pitch",
                    color: egui::Color32::from_rgb(220, 122, 95),
                },
                SeriesStyle {
                    name: "Error",
                    color: egui::Color32::from_rgb(181, 206, 168),
                },
            ],
            hidden: vec![false; 3],
            fixed_y: None,
            cached_y: (0.0, 1.0),
            dirty: true,
        }
    }

    pub(crate) fn angle() -> Self {
        Self {
            id: "angle_chart",
            title: "Orientation",
            kind: SeriesKind::Angle,
            series: vec![
                SeriesStyle {
                    name: "Pitch",
                    color: egui::Color32::from_rgb(197, 134, 192),
                },
                SeriesStyle {
                    name: "Roll",
                    color: egui::Color32::from_rgb(78, 201, 176),
                },
            ],
            hidden: vec![false; 2],
            fixed_y: Some(ANGLE_Y_RANGE),
            cached_y: ANGLE_Y_RANGE,
            dirty: false,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn series_points(&self, store: &SlidingWindowStore) -> Vec<Vec<[f64; 2]>> {
        match self.kind {
            SeriesKind::Pid => {
                let pid = store.pid();
                vec![
                    pid.iter()
                        .map(|s| [s.timestamp as f64, s.setpoint])
                        .collect(),
                    pid.iter().map(|s| [s.timestamp as f64, s.pitch]).collect(),
                    pid.iter().map(|s| [s.timestamp as f64, s.error]).collect(),
                ]
            }
            SeriesKind::Angle => {
                let angle = store.angle();
                vec![
                    angle
                        .iter()
                        .map(|s| [s.timestamp as f64, s.pitch_angle])
                        .collect(),
                    angle
                        .iter()
                        .map(|s| [s.timestamp as f64, s.roll_angle])
                        .collect(),
                ]
            }
        }
    }

    fn y_range(&mut self, series_points: &[Vec<[f64; 2]>]) -> (f64, f64) {
        if let Some(fixed) = self.fixed_y {
            return fixed;
        }
        if self.dirty {
            let visible = series_points
                .iter()
                .zip(&self.hidden)
                .filter(|(_, hidden)| !**hidden)
                .flat_map(|(points, _)| points.iter().map(|p| p[1]));
            self.cached_y = dynamic_y_range(visible);
            self.dirty = false;
        }
        self.cached_y
    }

    /// Draws the header row and the plot. Returns true when the user asked
    /// for this chart's series to be cleared.
    pub(crate) fn render(
        &mut self,
        ui: &mut egui::Ui,
        store: &SlidingWindowStore,
        height: f32,
    ) -> bool {
        let mut clear_requested = false;
        ui.horizontal(|ui| {
            ui.strong(self.title);
            ui.separator();
            for (style, hidden) in self.series.iter().zip(self.hidden.iter_mut()) {
                let mut visible = !*hidden;
                let label = egui::RichText::new(style.name).color(style.color);
                if ui.checkbox(&mut visible, label).changed() {
                    *hidden = !visible;
                    self.dirty = true;
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    clear_requested = true;
                }
            });
        });

        let series_points = self.series_points(store);
        let bounds = self.axis_bounds(store, &series_points);

        let plot = Plot::new(self.id)
            .height(height)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .show_x(false)
            .show_y(false)
            .x_axis_formatter(|mark, _max_chars, _range| {
                if mark.value < 0.0 {
                    String::new()
                } else {
                    format_axis_time(mark.value as u64)
                }
            });

        let response = plot.show(ui, |plot_ui| {
            for ((points, style), hidden) in series_points
                .into_iter()
                .zip(&self.series)
                .zip(&self.hidden)
            {
                if *hidden {
                    continue;
                }
                plot_ui.line(Line::new(points).color(style.color).name(style.name));
            }
            if let Some((min, max)) = bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            }
            plot_ui.pointer_coordinate()
        });

        if response.response.hovered() {
            if let Some(pointer) = response.inner {
                if let Some((timestamp, lines)) = self.hover_readout(store, pointer.x) {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        egui::Id::new((self.id, "hover")),
                        |ui| {
                            ui.monospace(format_axis_time(timestamp));
                            for (style, value) in lines {
                                ui.colored_label(
                                    style.color,
                                    format!("{}: {value:.2}", style.name),
                                );
                            }
                        },
                    );
                }
            }
        }

        clear_requested
    }

    /// Axis bounds for the next frame, or `None` while the store has no data
    /// so the plot keeps its automatic bounds.
    fn axis_bounds(
        &mut self,
        store: &SlidingWindowStore,
        series_points: &[Vec<[f64; 2]>],
    ) -> Option<([f64; 2], [f64; 2])> {
        let latest = store.latest_timestamp()?;
        let (y_min, y_max) = self.y_range(series_points);
        let (x_min, x_max) = x_range(latest, store.window_ms());
        Some(([x_min, y_min], [x_max, y_max]))
    }

    /// Values of every visible series at the sample nearest the hovered x.
    fn hover_readout(
        &self,
        store: &SlidingWindowStore,
        x: f64,
    ) -> Option<(u64, Vec<(&SeriesStyle, f64)>)> {
        let nearest = |timestamp: u64| (timestamp as f64 - x).abs();
        let (timestamp, values) = match self.kind {
            SeriesKind::Pid => {
                let sample = store
                    .pid()
                    .iter()
                    .min_by(|a, b| nearest(a.timestamp).total_cmp(&nearest(b.timestamp)))?;
                (
                    sample.timestamp,
                    vec![sample.setpoint, sample.pitch, sample.error],
                )
            }
            SeriesKind::Angle => {
                let sample = store
                    .angle()
                    .iter()
                    .min_by(|a, b| nearest(a.timestamp).total_cmp(&nearest(b.timestamp)))?;
                (sample.timestamp, vec![sample.pitch_angle, sample.roll_angle])
            }
        };
        let lines = self
            .series
            .iter()
            .zip(&self.hidden)
            .zip(values)
            .filter(|((_, hidden), _)| !**hidden)
            .map(|((style, _), value)| (style, value))
            .collect();
        Some((timestamp, lines))
    }
}

impl DashboardApp {
    pub(crate) fn render_chart_area(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Window");
            let mut window = self.store.window_seconds();
            let slider = egui::Slider::new(&mut window, MIN_WINDOW_SECONDS..=MAX_WINDOW_SECONDS)
                .suffix(" s");
            if ui.add(slider).changed() {
                self.store.set_window(window);
                self.session.apply(Action::SetTimeWindow(window));
                self.pid_chart.mark_dirty();
            }
        });
        ui.add_space(4.0);

        let chart_height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
        if self.pid_chart.render(ui, &self.store, chart_height) {
            self.store.clear_pid();
            self.pid_chart.mark_dirty();
        }
        ui.add_space(8.0);
        if self.angle_chart.render(ui, &self.store, chart_height) {
            self.store.clear_angle();
        }
    }
}
