//! Input event model.
//!
//! Mirrors the shape of an input-subsystem event: a type, a channel code
//! and a signed value. Only relative X/Y motion is ever inspected by the
//! axis-lock filter; every other event passes through untouched.

use serde::{Deserialize, Serialize};

// ─── Channel codes ──────────────────────────────────────────────────

/// Relative X motion.
pub const INPUT_REL_X: u16 = 0x00;
/// Relative Y motion.
pub const INPUT_REL_Y: u16 = 0x01;
/// Horizontal wheel.
pub const INPUT_REL_HWHEEL: u16 = 0x06;
/// Vertical wheel.
pub const INPUT_REL_WHEEL: u16 = 0x08;

/// Input event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Key press/release.
    Key,
    /// Relative axis motion.
    Rel,
    /// Absolute axis position.
    Abs,
    /// Report boundary marker.
    Sync,
}

/// One of the two recognized motion channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Relative channel code carrying this axis.
    #[inline]
    pub const fn rel_code(self) -> u16 {
        match self {
            Self::X => INPUT_REL_X,
            Self::Y => INPUT_REL_Y,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
        }
    }
}

/// A single input event, mutable in place by processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Event type.
    pub kind: EventKind,
    /// Channel code within `kind`.
    pub code: u16,
    /// Signed value (displacement for relative events).
    pub value: i32,
}

impl InputEvent {
    /// Build an event of any kind.
    pub const fn new(kind: EventKind, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// Build a relative-motion event.
    pub const fn rel(code: u16, value: i32) -> Self {
        Self::new(EventKind::Rel, code, value)
    }

    /// Build a relative-motion event on `axis`.
    pub const fn motion(axis: Axis, value: i32) -> Self {
        Self::rel(axis.rel_code(), value)
    }

    /// Returns the motion axis if this is a relative X/Y sample.
    ///
    /// `None` for every other type or channel; such events must be
    /// forwarded unchanged.
    #[inline]
    pub fn motion_axis(&self) -> Option<Axis> {
        if self.kind != EventKind::Rel {
            return None;
        }
        match self.code {
            INPUT_REL_X => Some(Axis::X),
            INPUT_REL_Y => Some(Axis::Y),
            _ => None,
        }
    }
}
