use tiltview_core::{AngleSample, PidSample, SlidingWindowStore};

fn pid(timestamp: u64) -> PidSample {
    PidSample {
        timestamp,
        setpoint: 0.0,
        pitch: 0.0,
        error: 0.0,
    }
}

fn angle(timestamp: u64) -> AngleSample {
    AngleSample {
        timestamp,
        pitch_angle: 0.0,
        roll_angle: 0.0,
    }
}

#[test]
fn append_keeps_samples_inside_window() {
    let mut store = SlidingWindowStore::new(10);
    store.append_pid((0..100).map(|i| pid(i * 1000)).collect());
    let cutoff = 99_000 - 10_000;
    assert!(store.pid().iter().all(|s| s.timestamp >= cutoff));
    assert_eq!(store.pid().back().map(|s| s.timestamp), Some(99_000));
}

#[test]
fn window_boundary_sample_is_retained() {
    // Window 10s, samples at 0 / 5000 / 11000: cutoff is 1000, so the 0
    // sample goes and 5000 stays.
    let mut store = SlidingWindowStore::new(10);
    store.append_angle(vec![angle(0)]);
    store.append_angle(vec![angle(5000)]);
    store.append_angle(vec![angle(11_000)]);
    let timestamps: Vec<u64> = store.angle().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![5000, 11_000]);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut store = SlidingWindowStore::new(10);
    store.append_pid(vec![pid(1000)]);
    store.append_pid(Vec::new());
    assert_eq!(store.pid().len(), 1);
    assert_eq!(store.latest_timestamp(), Some(1000));
}

#[test]
fn window_shrink_prunes_immediately() {
    let mut store = SlidingWindowStore::new(10);
    store.append_pid((0..=10).map(|i| pid(i * 1000)).collect());
    assert_eq!(store.pid().len(), 11);

    store.set_window(2);
    assert!(store.pid().iter().all(|s| s.timestamp >= 10_000 - 2000));
    let timestamps: Vec<u64> = store.pid().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![8000, 9000, 10_000]);
}

#[test]
fn window_is_clamped_to_valid_range() {
    let mut store = SlidingWindowStore::new(0);
    assert_eq!(store.window_seconds(), 1);
    store.set_window(600);
    assert_eq!(store.window_seconds(), 60);
}

#[test]
fn out_of_order_batch_does_not_resurrect_evicted_data() {
    let mut store = SlidingWindowStore::new(2);
    store.append_pid(vec![pid(10_000)]);
    // Late batch whose own max is older than what the store already holds.
    // The prune reference clamps to the existing maximum, so these points
    // are evicted right away instead of widening the window backwards.
    store.append_pid(vec![pid(1000), pid(2000)]);
    let timestamps: Vec<u64> = store.pid().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![10_000]);
}

#[test]
fn duplicate_timestamps_survive_pruning() {
    let mut store = SlidingWindowStore::new(10);
    store.append_angle(vec![angle(1000), angle(1000), angle(2000)]);
    assert_eq!(store.angle().len(), 3);
}

#[test]
fn clear_is_per_series() {
    let mut store = SlidingWindowStore::new(10);
    store.append_pid(vec![pid(1000)]);
    store.append_angle(vec![angle(2000)]);

    store.clear_pid();
    assert!(store.pid().is_empty());
    assert_eq!(store.angle().len(), 1);
    assert_eq!(store.latest_timestamp(), Some(2000));
}

#[test]
fn latest_timestamp_spans_both_series() {
    let mut store = SlidingWindowStore::new(10);
    assert_eq!(store.latest_timestamp(), None);
    store.append_pid(vec![pid(1000)]);
    store.append_angle(vec![angle(3000)]);
    assert_eq!(store.latest_timestamp(), Some(3000));
    store.append_pid(vec![pid(4000)]);
    assert_eq!(store.latest_timestamp(), Some(4000));
}
