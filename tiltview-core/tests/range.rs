use tiltview_core::range::{dynamic_y_range, format_axis_time, x_range, ANGLE_Y_RANGE};

#[test]
fn padded_range_over_visible_values() {
    // span 60, pad 7.2
    let (lo, hi) = dynamic_y_range([-10.0, 50.0]);
    assert!((lo - -17.2).abs() < 1e-9);
    assert!((hi - 57.2).abs() < 1e-9);
}

#[test]
fn empty_input_falls_back_to_unit_range() {
    assert_eq!(dynamic_y_range(std::iter::empty()), (0.0, 1.0));
}

#[test]
fn non_finite_values_are_ignored() {
    let (lo, hi) = dynamic_y_range([f64::NAN, 1.0, f64::INFINITY, 2.0]);
    assert!((lo - (1.0 - 0.12)).abs() < 1e-9);
    assert!((hi - (2.0 + 0.12)).abs() < 1e-9);

    assert_eq!(dynamic_y_range([f64::NAN, f64::INFINITY]), (0.0, 1.0));
}

#[test]
fn flat_line_gets_span_floor() {
    let (lo, hi) = dynamic_y_range([5.0, 5.0, 5.0]);
    assert!(hi > lo);
    assert!((hi - lo - (1e-6 + 2.0 * 0.12e-6)).abs() < 1e-12);
}

#[test]
fn x_range_scrolls_with_latest() {
    assert_eq!(x_range(11_000, 10_000), (1000.0, 11_000.0));
    // Saturates near the epoch instead of wrapping.
    assert_eq!(x_range(500, 10_000), (0.0, 500.0));
}

#[test]
fn angle_range_is_fixed() {
    assert_eq!(ANGLE_Y_RANGE, (-180.0, 180.0));
}

#[test]
fn axis_time_formats_minutes_seconds_millis() {
    assert_eq!(format_axis_time(0), "00:00.000");
    assert_eq!(format_axis_time(61_005), "01:01.005");
    // Wraps at the hour like a wall clock readout.
    assert_eq!(format_axis_time(3_600_000 + 2500), "00:02.500");
}
