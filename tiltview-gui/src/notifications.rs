use eframe::egui;
use std::time::Instant;

/// Seconds a toast stays on screen.
const TOAST_LIFETIME_SECS: f32 = 5.0;
const TOAST_WIDTH: f32 = 380.0;

#[derive(Debug, Clone)]
pub(crate) struct Notification {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) is_error: bool,
    pub(crate) created_at: Instant,
}

/// Transient toast stack in the top-right corner. Errors and infos share one
/// queue; age alone decides eviction.
pub(crate) struct NotificationHandler {
    notifications: Vec<Notification>,
}

impl NotificationHandler {
    pub(crate) fn new() -> Self {
        Self {
            notifications: Vec::new(),
        }
    }

    pub(crate) fn show_info(&mut self, title: &str, message: &str) {
        self.push(title, message, false);
    }

    pub(crate) fn show_error(&mut self, title: &str, message: &str) {
        self.push(title, message, true);
    }

    fn push(&mut self, title: &str, message: &str, is_error: bool) {
        self.notifications.push(Notification {
            title: title.to_string(),
            message: message.to_string(),
            is_error,
            created_at: Instant::now(),
        });
    }

    pub(crate) fn expire_old(&mut self) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.created_at).as_secs_f32() < TOAST_LIFETIME_SECS);
    }

    pub(crate) fn render(&self, ctx: &egui::Context) {
        if self.notifications.is_empty() {
            return;
        }
        let screen_rect = ctx.screen_rect();
        let x = screen_rect.max.x - 4.0;
        let mut y = screen_rect.min.y + 32.0;
        for (idx, notification) in self.notifications.iter().enumerate() {
            let fill = egui::Color32::from_rgba_premultiplied(20, 20, 20, 200);
            let stroke = if notification.is_error {
                egui::Color32::from_rgba_premultiplied(160, 60, 60, 200)
            } else {
                egui::Color32::from_rgba_premultiplied(80, 80, 80, 200)
            };
            let text = egui::Color32::from_rgba_premultiplied(235, 235, 235, 230);

            egui::Area::new(egui::Id::new(("toast", idx)))
                .order(egui::Order::Foreground)
                .interactable(false)
                .pivot(egui::Align2::RIGHT_TOP)
                .fixed_pos(egui::pos2(x, y))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .rounding(egui::Rounding::same(6.0))
                        .show(ui, |ui| {
                            ui.set_max_width(TOAST_WIDTH);
                            ui.add_space(2.0);
                            ui.label(
                                egui::RichText::new(&notification.title)
                                    .color(text)
                                    .strong()
                                    .size(16.0),
                            );
                            ui.label(
                                egui::RichText::new(&notification.message)
                                    .color(text)
                                    .size(14.0),
                            );
                            ui.add_space(2.0);
                        });
                });
            y += 66.0;
        }
    }
}
