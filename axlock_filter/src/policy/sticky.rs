//! Sticky policy: the first axis to dominate is locked until the release
//! timer resets the engine. Dominance is not re-evaluated while locked.

use axlock_common::input::Axis;

use super::{Decision, SuppressReason, Transition, Verdict};
use crate::dominance::determine_dominant_axis;
use crate::state::EngineState;

/// Apply the sticky policy to a sample on `axis`.
pub fn apply(state: &mut EngineState, axis: Axis, threshold: i32) -> Decision {
    let mut transition = None;
    if state.locked_axis.is_none() {
        if let Some(dominant) = determine_dominant_axis(state, threshold) {
            state.locked_axis = Some(dominant);
            let (abs_x, abs_y) = state.magnitudes();
            transition = Some(Transition::LockAcquired {
                axis: dominant,
                abs_x,
                abs_y,
            });
        }
    }

    let verdict = match state.locked_axis {
        None => Verdict::Suppressed(SuppressReason::Undecided),
        Some(locked) if locked == axis => Verdict::Passed,
        Some(locked) => Verdict::Suppressed(SuppressReason::LockedToOther(locked)),
    };
    Decision {
        verdict,
        transition,
    }
}
