//! Overflow-safe accumulator arithmetic.
//!
//! Sums are formed in `i64` and saturated to `±ACCUM_LIMIT`, so no sequence
//! of `i32` deltas can wrap or overflow.

use axlock_common::consts::ACCUM_LIMIT;

/// Absolute value that never overflows.
///
/// `i32::MIN` and anything beyond the bound map to [`ACCUM_LIMIT`].
#[inline]
pub const fn saturating_abs(value: i32) -> i32 {
    match value.checked_abs() {
        Some(abs) if abs <= ACCUM_LIMIT => abs,
        _ => ACCUM_LIMIT,
    }
}

/// `acc + delta`, saturated to `±ACCUM_LIMIT`.
#[inline]
pub fn saturating_accumulate(acc: i32, delta: i32) -> i32 {
    let sum = i64::from(acc) + i64::from(delta);
    sum.clamp(-i64::from(ACCUM_LIMIT), i64::from(ACCUM_LIMIT)) as i32
}

/// Signed accumulator with a cached magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisAccumulator {
    signed: i32,
    magnitude: i32,
}

impl AxisAccumulator {
    /// Net signed movement.
    #[inline]
    pub const fn signed(&self) -> i32 {
        self.signed
    }

    /// `saturating_abs(signed)`.
    #[inline]
    pub const fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// Add a signed delta and refresh the magnitude.
    #[inline]
    pub fn add(&mut self, delta: i32) {
        self.set(saturating_accumulate(self.signed, delta));
    }

    /// Limit the magnitude to `limit`, preserving sign.
    #[inline]
    pub fn clamp_magnitude(&mut self, limit: i32) {
        if self.magnitude > limit {
            self.set(if self.signed < 0 { -limit } else { limit });
        }
    }

    /// Zero both fields.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, signed: i32) {
        self.signed = signed;
        self.magnitude = saturating_abs(signed);
    }
}
