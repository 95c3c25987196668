//! Real-thread behavior: release timer fires on its own worker while
//! samples arrive from other threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use axlock_common::config::AxisLockConfig;
use axlock_common::consts::ACCUM_LIMIT;
use axlock_common::input::{Axis, InputEvent};
use axlock_filter::AxisLockEngine;

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

#[test]
fn thread_timer_releases_after_inactivity() {
    let engine = AxisLockEngine::new(AxisLockConfig::sticky(10, 20)).unwrap();

    let mut event = InputEvent::motion(Axis::X, 12);
    engine.process_sample(&mut event);
    assert_eq!(engine.locked_axis(), Some(Axis::X));

    assert!(wait_until(Duration::from_secs(2), || engine
        .snapshot()
        .is_idle()));

    let mut event = InputEvent::motion(Axis::Y, 12);
    engine.process_sample(&mut event);
    assert_eq!(event.value, 12);
    assert_eq!(engine.locked_axis(), Some(Axis::Y));
}

#[test]
fn continuous_samples_hold_the_lock() {
    let engine = AxisLockEngine::new(AxisLockConfig::sticky(10, 200)).unwrap();
    let mut event = InputEvent::motion(Axis::X, 10);
    engine.process_sample(&mut event);

    let start = Instant::now();
    while start.elapsed() < Duration::from_millis(400) {
        let mut event = InputEvent::motion(Axis::Y, 1);
        engine.process_sample(&mut event);
        assert_eq!(event.value, 0);
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(engine.locked_axis(), Some(Axis::X));
}

#[test]
fn producers_and_timer_never_corrupt_state() {
    let engine = Arc::new(AxisLockEngine::new(AxisLockConfig::sticky(10, 1)).unwrap());
    let stop = Arc::new(AtomicBool::new(false));

    let producers: Vec<_> = [(Axis::X, i32::MAX), (Axis::Y, i32::MIN), (Axis::X, -7)]
        .into_iter()
        .map(|(axis, value)| {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut passed = 0u64;
                while !stop.load(Ordering::Relaxed) {
                    let mut event = InputEvent::motion(axis, value);
                    engine.process_sample(&mut event);
                    assert!(event.value == value || event.value == 0);
                    if event.value != 0 {
                        passed += 1;
                    }
                    let snap = engine.snapshot();
                    assert!(snap.accum_x.abs() <= ACCUM_LIMIT);
                    assert!(snap.accum_y.abs() <= ACCUM_LIMIT);
                    if event.value != 0 {
                        thread::sleep(Duration::from_micros(1_500));
                    }
                }
                passed
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(200));
    stop.store(true, Ordering::Relaxed);
    for producer in producers {
        producer.join().unwrap();
    }

    assert!(wait_until(Duration::from_secs(2), || engine
        .snapshot()
        .is_idle()));
}

#[test]
fn engines_are_independent() {
    let a = AxisLockEngine::new(AxisLockConfig::sticky(10, 20)).unwrap();
    let b = AxisLockEngine::new(AxisLockConfig::sticky(10, 20)).unwrap();

    let mut event = InputEvent::motion(Axis::X, 15);
    a.process_sample(&mut event);
    let mut event = InputEvent::motion(Axis::Y, 15);
    b.process_sample(&mut event);

    assert_eq!(a.locked_axis(), Some(Axis::X));
    assert_eq!(b.locked_axis(), Some(Axis::Y));
}
