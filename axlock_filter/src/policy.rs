//! Locking policies.
//!
//! Both policies run after the sample's delta has been accumulated and
//! return a [`Decision`]; the engine applies its verdict to the event and
//! logs any [`Transition`] once its lock is released.

use axlock_common::input::Axis;

pub mod non_sticky;
pub mod sticky;

/// Outcome of processing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not a relative X/Y sample; forwarded untouched, no state change.
    Ignored,
    /// Sample forwarded with its original value.
    Passed,
    /// Sample value forced to zero.
    Suppressed(SuppressReason),
}

impl Verdict {
    /// True if the event value was zeroed.
    #[inline]
    pub const fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed(_))
    }
}

/// State change made by a policy while judging a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Sticky lock taken on `axis` at the given magnitudes.
    LockAcquired {
        /// Newly locked axis.
        axis: Axis,
        /// `|accum_x|` when the lock was taken.
        abs_x: i32,
        /// `|accum_y|` when the lock was taken.
        abs_y: i32,
    },
    /// Non-sticky dominant axis moved to `axis`.
    DominantChanged {
        /// New dominant axis.
        axis: Axis,
        /// Dominant axis before this sample.
        previous: Option<Axis>,
    },
}

/// Policy result for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// What happens to the sample.
    pub verdict: Verdict,
    /// State change to report, if any.
    pub transition: Option<Transition>,
}

impl Decision {
    /// Decision without a state change.
    #[inline]
    pub const fn plain(verdict: Verdict) -> Self {
        Self {
            verdict,
            transition: None,
        }
    }

    /// Decision that also changed the engine's axis state.
    #[inline]
    pub const fn with_transition(verdict: Verdict, transition: Transition) -> Self {
        Self {
            verdict,
            transition: Some(transition),
        }
    }
}

/// Why a sample was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// No axis has reached the threshold yet.
    Undecided,
    /// Sticky lock held by the given (other) axis.
    LockedToOther(Axis),
    /// The given (other) axis currently dominates.
    NotDominant(Axis),
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignored => f.write_str("ignored"),
            Self::Passed => f.write_str("passed"),
            Self::Suppressed(reason) => write!(f, "suppressed ({reason})"),
        }
    }
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undecided => f.write_str("undecided"),
            Self::LockedToOther(axis) => write!(f, "locked to {axis}"),
            Self::NotDominant(axis) => write!(f, "{axis} dominant"),
        }
    }
}
