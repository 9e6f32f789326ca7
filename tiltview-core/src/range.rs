//! Axis range math for the scrolling charts.

/// Fraction of the value span added as headroom above and below.
pub const PAD_RATIO: f64 = 0.12;
/// Smallest span a flat line is widened to before padding.
pub const MIN_SPAN: f64 = 1e-6;
/// Fixed range for the bounded angle domain.
pub const ANGLE_Y_RANGE: (f64, f64) = (-180.0, 180.0);

/// Y range over the visible in-window values: `[min - 0.12*span, max +
/// 0.12*span]` with a `1e-6` span floor, or `[0, 1]` when no finite value
/// exists.
pub fn dynamic_y_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if min > max {
        return (0.0, 1.0);
    }
    let span = (max - min).max(MIN_SPAN);
    let pad = span * PAD_RATIO;
    (min - pad, max + pad)
}

/// Scrolling X range `[latest - window, latest]`.
pub fn x_range(latest_timestamp: u64, window_ms: u64) -> (f64, f64) {
    let start = latest_timestamp.saturating_sub(window_ms);
    (start as f64, latest_timestamp as f64)
}

/// Formats a millisecond epoch timestamp as `mm:ss.mmm` within the hour,
/// matching the device console's time display.
pub fn format_axis_time(timestamp_ms: u64) -> String {
    let minutes = (timestamp_ms / 60_000) % 60;
    let seconds = (timestamp_ms / 1000) % 60;
    let millis = timestamp_ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}
