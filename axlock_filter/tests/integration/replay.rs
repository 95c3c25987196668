//! Registry and replay driven by the shipped configuration and trace.

use std::path::PathBuf;

use axlock_common::config::load_processor_file;
use axlock_common::input::{Axis, InputEvent};
use axlock_filter::replay::{ReplaySummary, parse_trace, replay};
use axlock_filter::{ManualScheduler, ProcessorRegistry, Verdict};

fn repo_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(relative)
}

fn load_registry(sched: &ManualScheduler) -> ProcessorRegistry {
    let file = load_processor_file(&repo_file("config/processors.toml")).unwrap();
    ProcessorRegistry::from_file_config(&file, sched).unwrap()
}

#[test]
fn shipped_config_builds_both_processors() {
    let sched = ManualScheduler::new();
    let registry = load_registry(&sched);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["scroll", "straighten"]);

    let scroll = registry.get("scroll").unwrap();
    assert!(scroll.config().sticky);
    assert!(scroll.config().track_remainders);
    assert!(!registry.get("straighten").unwrap().config().sticky);
}

#[test]
fn diagonal_scroll_trace_through_sticky_processor() {
    let sched = ManualScheduler::new();
    let registry = load_registry(&sched);
    let engine = registry.get("scroll").unwrap();

    let text = std::fs::read_to_string(repo_file("config/traces/diagonal_scroll.trace")).unwrap();
    let samples = parse_trace(&text).unwrap();
    let run = replay(engine, &sched, &samples);
    let records = &run.records;
    let outputs: Vec<i32> = records.iter().map(|r| r.output.value).collect();

    // x3 x4 y1 suppressed; x5 locks X; y20 suppressed; x6 passes; y-2 suppressed;
    // release; y12 locks Y; x3 suppressed; y9 passes; wheel untouched.
    assert_eq!(outputs, vec![0, 0, 0, 5, 0, 6, 0, 12, 0, 9, 1]);
    assert_eq!(records[7].releases, 1);
    assert_eq!(records[10].verdict, Verdict::Ignored);

    // Y lock from t=110 releases 50 ms after the last motion sample.
    assert_eq!(run.trailing_releases, 1);
    assert_eq!(sched.now_ms(), 176);

    let summary = ReplaySummary::from_run(&run);
    assert_eq!(summary.passed, 4);
    assert_eq!(summary.suppressed, 6);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.releases, 2);

    // Only suppressions after the first release were left at the end of the
    // trace; the trailing release clears them.
    assert_eq!(run.final_remainders, (3, 0));
    assert_eq!(engine.remainders(), (0, 0));
}

#[test]
fn same_trace_through_non_sticky_processor() {
    let sched = ManualScheduler::new();
    let registry = load_registry(&sched);
    let engine = registry.get("straighten").unwrap();

    let samples = parse_trace("0 x 6\n4 y 8\n8 x 2\n").unwrap();
    let run = replay(engine, &sched, &samples);
    let outputs: Vec<i32> = run.records.iter().map(|r| r.output.value).collect();
    assert_eq!(outputs, vec![6, 8, 0]);
    assert_eq!(run.trailing_releases, 0);
}

#[test]
fn registry_routes_by_name() {
    let sched = ManualScheduler::new();
    let registry = load_registry(&sched);

    let mut event = InputEvent::motion(Axis::Y, 5);
    assert_eq!(registry.process("straighten", &mut event), Some(Verdict::Passed));
    assert_eq!(event.value, 5);

    let mut event = InputEvent::motion(Axis::Y, 5);
    assert!(registry.process("scroll", &mut event).unwrap().is_suppressed());
    assert_eq!(event.value, 0);
}
