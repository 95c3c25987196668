//! Per-engine mutable state.
//!
//! Owned by exactly one [`AxisLockEngine`](crate::AxisLockEngine) and only
//! touched while its lock is held.

use axlock_common::input::Axis;

use crate::accumulator::{AxisAccumulator, saturating_accumulate};

/// Accumulators, lock and remainders of one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Sticky mode: axis currently passed through exclusively.
    pub locked_axis: Option<Axis>,
    /// Non-sticky mode: axis that passed the most recent sample.
    pub last_dominant: Option<Axis>,
    x: AxisAccumulator,
    y: AxisAccumulator,
    remainder_x: i32,
    remainder_y: i32,
}

impl EngineState {
    /// Accumulator of `axis`.
    #[inline]
    pub fn accumulator(&self, axis: Axis) -> &AxisAccumulator {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Mutable accumulator of `axis`.
    #[inline]
    pub fn accumulator_mut(&mut self, axis: Axis) -> &mut AxisAccumulator {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Add `delta` to the accumulator of `axis`.
    #[inline]
    pub fn update_accumulator(&mut self, axis: Axis, delta: i32) {
        self.accumulator_mut(axis).add(delta);
    }

    /// Magnitudes as `(abs_x, abs_y)`.
    #[inline]
    pub fn magnitudes(&self) -> (i32, i32) {
        (self.x.magnitude(), self.y.magnitude())
    }

    /// Add suppressed motion to the remainder of `axis`.
    #[inline]
    pub fn add_remainder(&mut self, axis: Axis, value: i32) {
        let slot = match axis {
            Axis::X => &mut self.remainder_x,
            Axis::Y => &mut self.remainder_y,
        };
        *slot = saturating_accumulate(*slot, value);
    }

    /// Remainders as `(x, y)`.
    #[inline]
    pub fn remainders(&self) -> (i32, i32) {
        (self.remainder_x, self.remainder_y)
    }

    /// Return remainders and zero them.
    pub fn take_remainders(&mut self) -> (i32, i32) {
        let taken = self.remainders();
        self.remainder_x = 0;
        self.remainder_y = 0;
        taken
    }

    /// Full reset: no lock, zero accumulators and remainders.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy of the observable fields.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            locked_axis: self.locked_axis,
            last_dominant: self.last_dominant,
            accum_x: self.x.signed(),
            accum_y: self.y.signed(),
            abs_accum_x: self.x.magnitude(),
            abs_accum_y: self.y.magnitude(),
            remainder_x: self.remainder_x,
            remainder_y: self.remainder_y,
        }
    }
}

/// Point-in-time view of an engine for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSnapshot {
    /// Sticky lock, if held.
    pub locked_axis: Option<Axis>,
    /// Last axis passed in non-sticky mode.
    pub last_dominant: Option<Axis>,
    /// Signed X accumulator.
    pub accum_x: i32,
    /// Signed Y accumulator.
    pub accum_y: i32,
    /// X magnitude.
    pub abs_accum_x: i32,
    /// Y magnitude.
    pub abs_accum_y: i32,
    /// Suppressed X motion (remainder tracking).
    pub remainder_x: i32,
    /// Suppressed Y motion (remainder tracking).
    pub remainder_y: i32,
}

impl EngineSnapshot {
    /// True when nothing has been accumulated or locked.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
