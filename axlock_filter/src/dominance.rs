//! Dominant-axis decision.
//!
//! Pure functions over accumulated magnitudes; called on every sample.

use axlock_common::input::Axis;

use crate::state::EngineState;

/// Decide which axis dominates, if any.
///
/// An axis dominates once its magnitude reaches `threshold` and exceeds the
/// other axis. An exact tie at or above `threshold` resolves to X.
#[inline]
pub const fn dominant_axis(abs_x: i32, abs_y: i32, threshold: i32) -> Option<Axis> {
    if abs_x >= threshold && abs_x > abs_y {
        Some(Axis::X)
    } else if abs_y >= threshold && abs_y > abs_x {
        Some(Axis::Y)
    } else if abs_x >= threshold && abs_x == abs_y {
        Some(Axis::X)
    } else {
        None
    }
}

/// [`dominant_axis`] over the accumulators of `state`.
#[inline]
pub fn determine_dominant_axis(state: &EngineState, threshold: i32) -> Option<Axis> {
    let (abs_x, abs_y) = state.magnitudes();
    dominant_axis(abs_x, abs_y, threshold)
}
