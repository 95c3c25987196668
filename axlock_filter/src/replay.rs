//! Trace replay.
//!
//! Feeds a recorded motion trace through an engine on a virtual clock, so
//! release timeouts fire exactly where the timestamps say they would.
//!
//! # Trace format
//!
//! ```text
//! # t_ms  channel  value
//! 0       x        3
//! 8       x        4
//! 16      y        20
//! 90      wheel    1
//! ```
//!
//! Channels: `x`, `y`, `wheel`, `hwheel`, `key`. Timestamps must not
//! decrease. Blank lines and `#` comments are ignored.

use axlock_common::input::{
    EventKind, INPUT_REL_HWHEEL, INPUT_REL_WHEEL, INPUT_REL_X, INPUT_REL_Y, InputEvent,
};

use crate::engine::AxisLockEngine;
use crate::error::TraceError;
use crate::policy::Verdict;
use crate::timer::ManualScheduler;

/// One timestamped input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSample {
    /// Milliseconds since trace start.
    pub t_ms: u64,
    /// Event as delivered by the input transport.
    pub event: InputEvent,
}

/// Result of replaying one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayRecord {
    /// Sample timestamp.
    pub t_ms: u64,
    /// Event before processing.
    pub input: InputEvent,
    /// Event after processing.
    pub output: InputEvent,
    /// Engine verdict.
    pub verdict: Verdict,
    /// Release timeouts fired just before this sample.
    pub releases: usize,
}

impl std::fmt::Display for ReplayRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.releases > 0 {
            writeln!(f, "{:>8} -- released", self.t_ms)?;
        }
        write!(
            f,
            "{:>8} {:<6} {:>7} -> {:>7}  {}",
            self.t_ms,
            channel_name(&self.input),
            self.input.value,
            self.output.value,
            self.verdict
        )
    }
}

/// Parse a trace.
pub fn parse_trace(text: &str) -> Result<Vec<TraceSample>, TraceError> {
    let mut samples = Vec::new();
    let mut previous_ms = 0u64;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        let [t_text, channel, value_text] = fields.as_slice() else {
            return Err(TraceError::Malformed { line });
        };

        let t_ms: u64 = t_text.parse().map_err(|_| TraceError::BadTimestamp {
            line,
            text: (*t_text).to_string(),
        })?;
        if t_ms < previous_ms {
            return Err(TraceError::TimeWentBackwards {
                line,
                t_ms,
                previous_ms,
            });
        }
        previous_ms = t_ms;

        let value: i32 = value_text.parse().map_err(|_| TraceError::BadValue {
            line,
            text: (*value_text).to_string(),
        })?;

        let (kind, code) = parse_channel(channel).ok_or_else(|| TraceError::UnknownChannel {
            line,
            text: (*channel).to_string(),
        })?;

        samples.push(TraceSample {
            t_ms,
            event: InputEvent::new(kind, code, value),
        });
    }

    Ok(samples)
}

fn parse_channel(name: &str) -> Option<(EventKind, u16)> {
    match name.to_ascii_lowercase().as_str() {
        "x" => Some((EventKind::Rel, INPUT_REL_X)),
        "y" => Some((EventKind::Rel, INPUT_REL_Y)),
        "wheel" => Some((EventKind::Rel, INPUT_REL_WHEEL)),
        "hwheel" => Some((EventKind::Rel, INPUT_REL_HWHEEL)),
        "key" => Some((EventKind::Key, 0)),
        _ => None,
    }
}

fn channel_name(event: &InputEvent) -> &'static str {
    match (event.kind, event.code) {
        (EventKind::Rel, INPUT_REL_X) => "x",
        (EventKind::Rel, INPUT_REL_Y) => "y",
        (EventKind::Rel, INPUT_REL_WHEEL) => "wheel",
        (EventKind::Rel, INPUT_REL_HWHEEL) => "hwheel",
        (EventKind::Key, _) => "key",
        _ => "other",
    }
}

/// Outcome of replaying a whole trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRun {
    /// One record per sample.
    pub records: Vec<ReplayRecord>,
    /// Releases that fired after the last sample.
    pub trailing_releases: usize,
    /// Remainders `(x, y)` right after the last sample, before any trailing
    /// release clears them.
    pub final_remainders: (i32, i32),
}

/// Replay `samples` through `engine`.
///
/// `scheduler` must be the factory the engine's timer was created from.
/// The clock is advanced to each sample's timestamp (firing due releases)
/// before the sample is processed. After the last sample the clock runs on
/// until no timer on `scheduler` is armed.
pub fn replay(
    engine: &AxisLockEngine,
    scheduler: &ManualScheduler,
    samples: &[TraceSample],
) -> ReplayRun {
    let records = samples
        .iter()
        .map(|sample| {
            let releases = scheduler.advance_to(sample.t_ms);
            let mut output = sample.event;
            let verdict = engine.process_sample(&mut output);
            ReplayRecord {
                t_ms: sample.t_ms,
                input: sample.event,
                output,
                verdict,
                releases,
            }
        })
        .collect();

    let final_remainders = engine.remainders();
    ReplayRun {
        records,
        trailing_releases: drain_timers(scheduler),
        final_remainders,
    }
}

fn drain_timers(scheduler: &ManualScheduler) -> usize {
    let mut fired = 0;
    while let Some(deadline) = scheduler.next_deadline_ms() {
        match scheduler.advance_to(deadline) {
            0 => break,
            n => fired += n,
        }
    }
    fired
}

/// Totals over a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Samples forwarded unchanged after judgement.
    pub passed: usize,
    /// Samples zeroed.
    pub suppressed: usize,
    /// Non-motion events.
    pub ignored: usize,
    /// Release timeouts fired, including those after the last sample.
    pub releases: usize,
}

impl ReplaySummary {
    /// Tally a finished run.
    pub fn from_run(run: &ReplayRun) -> Self {
        let mut summary = run.records.iter().fold(Self::default(), |mut acc, record| {
            match record.verdict {
                Verdict::Passed => acc.passed += 1,
                Verdict::Suppressed(_) => acc.suppressed += 1,
                Verdict::Ignored => acc.ignored += 1,
            }
            acc.releases += record.releases;
            acc
        });
        summary.releases += run.trailing_releases;
        summary
    }
}
