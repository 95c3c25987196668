//! Prelude module for common re-exports.
//!
//! ```rust
//! use axlock_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    AxisLockConfig, ConfigError, ConfigLoader, LogLevel, ProcessorEntry, ProcessorFileConfig,
    SharedConfig, load_processor_file,
};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{ACCUM_LIMIT, MAX_PROCESSORS};

// ─── Input ──────────────────────────────────────────────────────────
pub use crate::input::{
    Axis, EventKind, INPUT_REL_HWHEEL, INPUT_REL_WHEEL, INPUT_REL_X, INPUT_REL_Y, InputEvent,
};
