//! Sticky mode: lock acquisition, lock stability, inactivity release.

use axlock_common::config::AxisLockConfig;
use axlock_common::consts::ACCUM_LIMIT;
use axlock_common::input::{Axis, InputEvent};
use axlock_filter::{AxisLockEngine, ManualScheduler, SuppressReason, Verdict};

// ─── Helpers ────────────────────────────────────────────────────────

fn engine(threshold: u32, release_ms: u32) -> (AxisLockEngine, ManualScheduler) {
    let sched = ManualScheduler::new();
    let engine =
        AxisLockEngine::with_timer(AxisLockConfig::sticky(threshold, release_ms), &sched).unwrap();
    (engine, sched)
}

fn send(engine: &AxisLockEngine, axis: Axis, value: i32) -> i32 {
    let mut event = InputEvent::motion(axis, value);
    engine.process_sample(&mut event);
    event.value
}

// ─── Tests ──────────────────────────────────────────────────────────

#[test]
fn lock_then_release_then_relock_other_axis() {
    let (engine, sched) = engine(10, 50);

    assert_eq!(send(&engine, Axis::X, 3), 0);
    assert_eq!(send(&engine, Axis::X, 4), 0);
    assert_eq!(send(&engine, Axis::X, 5), 5);
    assert_eq!(engine.locked_axis(), Some(Axis::X));

    assert_eq!(send(&engine, Axis::Y, 20), 0);
    assert_eq!(engine.locked_axis(), Some(Axis::X));

    assert_eq!(sched.advance(60), 1);
    let snap = engine.snapshot();
    assert_eq!(snap.locked_axis, None);
    assert_eq!((snap.accum_x, snap.accum_y), (0, 0));

    assert_eq!(send(&engine, Axis::Y, 12), 12);
    assert_eq!(engine.locked_axis(), Some(Axis::Y));
}

#[test]
fn y_dominant_stream_never_breaks_x_lock() {
    let (engine, sched) = engine(10, 50);
    send(&engine, Axis::X, 10);

    for step in 0..500 {
        sched.advance(5);
        let mut event = InputEvent::motion(Axis::Y, 1_000 + step);
        let verdict = engine.process_sample(&mut event);
        assert_eq!(
            verdict,
            Verdict::Suppressed(SuppressReason::LockedToOther(Axis::X))
        );
        assert_eq!(event.value, 0);
    }
    assert_eq!(engine.locked_axis(), Some(Axis::X));
    assert_eq!(sched.now_ms(), 2_500);
}

#[test]
fn release_is_inactivity_based() {
    let (engine, sched) = engine(10, 50);
    send(&engine, Axis::X, 10);
    sched.advance(45);
    send(&engine, Axis::X, 1);
    sched.advance(45);
    assert_eq!(engine.locked_axis(), Some(Axis::X));
    sched.advance(5);
    assert_eq!(engine.locked_axis(), None);
}

#[test]
fn unlocked_samples_are_suppressed() {
    let (engine, _sched) = engine(10, 50);
    let mut event = InputEvent::motion(Axis::Y, 9);
    assert_eq!(
        engine.process_sample(&mut event),
        Verdict::Suppressed(SuppressReason::Undecided)
    );
    assert_eq!(event.value, 0);
}

#[test]
fn negative_motion_locks_and_passes() {
    let (engine, _sched) = engine(10, 50);
    assert_eq!(send(&engine, Axis::Y, -6), 0);
    assert_eq!(send(&engine, Axis::Y, -6), -6);
    assert_eq!(engine.locked_axis(), Some(Axis::Y));
    assert_eq!(engine.snapshot().accum_y, -12);
    assert_eq!(send(&engine, Axis::Y, 3), 3);
}

#[test]
fn extreme_values_saturate() {
    let (engine, _sched) = engine(10, 50);
    for _ in 0..4 {
        send(&engine, Axis::Y, i32::MIN);
        send(&engine, Axis::X, i32::MAX);
    }
    let snap = engine.snapshot();
    assert_eq!(snap.accum_y, -ACCUM_LIMIT);
    assert_eq!(snap.accum_x, ACCUM_LIMIT);
    assert_eq!(snap.abs_accum_y, ACCUM_LIMIT);
    // Y reached the bound first.
    assert_eq!(snap.locked_axis, Some(Axis::Y));
}
