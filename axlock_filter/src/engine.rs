//! Axis-lock engine.
//!
//! One engine per configured processor. Sample processing and release
//! timeouts are mutually exclusive under a single per-engine lock; the
//! critical sections are constant-time and never allocate or sleep.
//! Decision logs are emitted only after the lock has been dropped.

use std::sync::{Arc, Weak};
use std::time::Duration;

use axlock_common::config::AxisLockConfig;
use axlock_common::input::{Axis, InputEvent};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::EngineError;
use crate::policy::{self, Decision, Transition, Verdict};
use crate::state::{EngineSnapshot, EngineState};
use crate::timer::{ReleaseTimer, ThreadTimerFactory, TimerFactory};

/// Axis-lock filter instance.
pub struct AxisLockEngine {
    config: AxisLockConfig,
    threshold: i32,
    state: Arc<Mutex<EngineState>>,
    /// Present only in sticky mode.
    release: Option<Box<dyn ReleaseTimer>>,
    release_after: Duration,
}

impl std::fmt::Debug for AxisLockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisLockEngine")
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl AxisLockEngine {
    /// Build an engine using a thread-backed release timer.
    ///
    /// # Errors
    ///
    /// `EngineError::Config` if `config` fails validation, or
    /// `EngineError::TimerSpawn` if the timer worker cannot start.
    pub fn new(config: AxisLockConfig) -> Result<Self, EngineError> {
        Self::with_timer(config, &ThreadTimerFactory)
    }

    /// Build an engine whose release timer comes from `timers`.
    ///
    /// Configuration is validated before any state or timer is created.
    /// No timer is created in non-sticky mode.
    pub fn with_timer(config: AxisLockConfig, timers: &dyn TimerFactory) -> Result<Self, EngineError> {
        config.validate()?;

        let state = Arc::new(Mutex::new(EngineState::default()));
        let release = if config.sticky {
            let weak: Weak<Mutex<EngineState>> = Arc::downgrade(&state);
            let timer = timers.create(Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    release_lock(&state);
                }
            }))?;
            Some(timer)
        } else {
            None
        };

        debug!(
            threshold = config.threshold,
            sticky = config.sticky,
            release_after_ms = config.release_after_ms,
            track_remainders = config.track_remainders,
            "axis-lock engine initialized"
        );

        Ok(Self {
            threshold: config.threshold_magnitude(),
            release_after: Duration::from_millis(u64::from(config.release_after_ms)),
            config,
            state,
            release,
        })
    }

    /// Static configuration.
    pub fn config(&self) -> &AxisLockConfig {
        &self.config
    }

    /// Process one input event in place.
    ///
    /// Events other than relative X/Y are left untouched and cause no state
    /// change. Motion samples are accumulated, judged by the configured
    /// policy and zeroed when suppressed. In sticky mode every motion sample
    /// re-arms the release timer.
    pub fn process_sample(&self, event: &mut InputEvent) -> Verdict {
        let Some(axis) = event.motion_axis() else {
            return Verdict::Ignored;
        };

        let outcome = {
            let mut state = self.state.lock();
            state.update_accumulator(axis, event.value);

            let decision = if self.config.sticky {
                policy::sticky::apply(&mut state, axis, self.threshold)
            } else {
                policy::non_sticky::apply(&mut state, axis, self.threshold)
            };

            if decision.verdict.is_suppressed() && self.config.track_remainders {
                state.add_remainder(axis, event.value);
            }

            if let Some(timer) = &self.release {
                timer.reschedule(self.release_after);
            }

            SampleOutcome {
                axis,
                value: event.value,
                decision,
                accum_x: state.accumulator(Axis::X).signed(),
                accum_y: state.accumulator(Axis::Y).signed(),
            }
        };

        if outcome.decision.verdict.is_suppressed() {
            event.value = 0;
        }
        outcome.log();
        outcome.decision.verdict
    }

    /// Release-timeout handler: drop the lock and zero all accumulators.
    pub fn on_release_timeout(&self) {
        release_lock(&self.state);
    }

    /// Currently locked axis (sticky mode).
    pub fn locked_axis(&self) -> Option<Axis> {
        self.state.lock().locked_axis
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.state.lock().snapshot()
    }

    /// Suppressed motion as `(x, y)`; zero unless remainder tracking is on.
    pub fn remainders(&self) -> (i32, i32) {
        self.state.lock().remainders()
    }

    /// Return suppressed motion and zero it.
    pub fn take_remainders(&self) -> (i32, i32) {
        self.state.lock().take_remainders()
    }
}

impl Drop for AxisLockEngine {
    fn drop(&mut self) {
        if let Some(timer) = &self.release {
            timer.cancel();
        }
    }
}

fn release_lock(state: &Mutex<EngineState>) {
    let released = {
        let mut state = state.lock();
        let locked = state.locked_axis;
        state.reset();
        locked
    };
    debug!(locked = ?released, "axis lock released");
}

/// Decision data copied out of the critical section; logged after the
/// engine lock is dropped.
#[derive(Debug, Clone, Copy)]
struct SampleOutcome {
    axis: Axis,
    value: i32,
    decision: Decision,
    accum_x: i32,
    accum_y: i32,
}

impl SampleOutcome {
    fn log(&self) {
        match self.decision.transition {
            Some(Transition::LockAcquired { axis, abs_x, abs_y }) => {
                debug!(%axis, abs_x, abs_y, "axis lock acquired");
            }
            Some(Transition::DominantChanged { axis, previous }) => {
                debug!(%axis, ?previous, "dominant axis changed");
            }
            None => {}
        }

        if let Verdict::Suppressed(reason) = self.decision.verdict {
            debug!(
                axis = %self.axis,
                value = self.value,
                %reason,
                accum_x = self.accum_x,
                accum_y = self.accum_y,
                "sample suppressed"
            );
        }
    }
}
