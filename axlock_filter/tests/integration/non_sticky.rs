//! Non-sticky mode: per-sample dominance, clamping and fast switching.

use axlock_common::config::AxisLockConfig;
use axlock_common::input::{Axis, InputEvent};
use axlock_filter::{AxisLockEngine, ManualScheduler, SuppressReason, Verdict};

fn engine(threshold: u32) -> AxisLockEngine {
    AxisLockEngine::with_timer(AxisLockConfig::non_sticky(threshold), &ManualScheduler::new())
        .unwrap()
}

fn send(engine: &AxisLockEngine, axis: Axis, value: i32) -> (i32, Verdict) {
    let mut event = InputEvent::motion(axis, value);
    let verdict = engine.process_sample(&mut event);
    (event.value, verdict)
}

#[test]
fn x_then_y_switches_in_one_sample() {
    let engine = engine(5);

    assert_eq!(send(&engine, Axis::X, 6), (6, Verdict::Passed));
    let snap = engine.snapshot();
    assert_eq!((snap.accum_x, snap.accum_y), (5, 0));

    assert_eq!(send(&engine, Axis::Y, 8), (8, Verdict::Passed));
    let snap = engine.snapshot();
    assert_eq!((snap.accum_x, snap.accum_y), (0, 5));
    assert_eq!(snap.last_dominant, Some(Axis::Y));
}

#[test]
fn sustained_motion_stays_clamped() {
    let engine = engine(5);
    for _ in 0..1_000 {
        assert_eq!(send(&engine, Axis::X, -40).1, Verdict::Passed);
    }
    assert_eq!(engine.snapshot().accum_x, -5);

    // A reversal only needs to beat the clamp, not the history.
    assert_eq!(send(&engine, Axis::Y, 6), (6, Verdict::Passed));
}

#[test]
fn tie_with_clamped_axis_resolves_to_x() {
    let engine = engine(5);
    send(&engine, Axis::X, 9);
    // abs_x clamped to 5; Y climbs to exactly 5.
    assert_eq!(
        send(&engine, Axis::Y, 2),
        (0, Verdict::Suppressed(SuppressReason::NotDominant(Axis::X)))
    );
    assert_eq!(
        send(&engine, Axis::Y, 3),
        (0, Verdict::Suppressed(SuppressReason::NotDominant(Axis::X)))
    );
    let snap = engine.snapshot();
    assert_eq!((snap.abs_accum_x, snap.abs_accum_y), (5, 5));

    assert_eq!(send(&engine, Axis::Y, 1), (1, Verdict::Passed));
}

#[test]
fn small_jitter_is_suppressed_until_threshold() {
    let engine = engine(5);
    for value in [1, -1, 2, -2, 1] {
        assert_eq!(
            send(&engine, Axis::Y, value),
            (0, Verdict::Suppressed(SuppressReason::Undecided))
        );
    }
    assert_eq!(engine.snapshot().accum_y, 1);
}

#[test]
fn remainders_track_in_non_sticky_mode() {
    let engine = AxisLockEngine::with_timer(
        AxisLockConfig::non_sticky(5).with_remainders(true),
        &ManualScheduler::new(),
    )
    .unwrap();
    send(&engine, Axis::X, 2);
    send(&engine, Axis::X, 4);
    send(&engine, Axis::Y, -1);
    assert_eq!(engine.take_remainders(), (2, -1));
}
