//! Non-sticky policy: dominance is recomputed on every sample.
//!
//! When the sample's axis dominates, the other axis is zeroed and the
//! dominant accumulator is clamped to `threshold`, so a reversal only needs
//! to out-accumulate `threshold` rather than the whole history.

use axlock_common::input::Axis;

use super::{Decision, SuppressReason, Transition, Verdict};
use crate::dominance::determine_dominant_axis;
use crate::state::EngineState;

/// Apply the non-sticky policy to a sample on `axis`.
pub fn apply(state: &mut EngineState, axis: Axis, threshold: i32) -> Decision {
    match determine_dominant_axis(state, threshold) {
        None => Decision::plain(Verdict::Suppressed(SuppressReason::Undecided)),
        Some(dominant) if dominant != axis => {
            Decision::plain(Verdict::Suppressed(SuppressReason::NotDominant(dominant)))
        }
        Some(dominant) => {
            state.accumulator_mut(dominant.other()).clear();
            state.accumulator_mut(dominant).clamp_magnitude(threshold);
            let previous = state.last_dominant.replace(dominant);
            if previous == Some(dominant) {
                Decision::plain(Verdict::Passed)
            } else {
                Decision::with_transition(
                    Verdict::Passed,
                    Transition::DominantChanged {
                        axis: dominant,
                        previous,
                    },
                )
            }
        }
    }
}
