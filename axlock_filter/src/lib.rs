//! # Axis-Lock Filter Library
//!
//! Suppresses motion on the non-dominant axis of a relative pointer stream so
//! that diagonal drift during an intended single-axis gesture never reaches
//! downstream consumers.
//!
//! ## Pipeline
//!
//! 1. **Accumulation** — per-axis signed sums, saturating at
//!    [`ACCUM_LIMIT`](axlock_common::consts::ACCUM_LIMIT)
//! 2. **Dominance** — which axis has earned the right to pass
//! 3. **Policy** — sticky (lock until idle) or non-sticky (re-evaluate per sample)
//! 4. **Release** — inactivity timer that fully resets a sticky engine
//!
//! ## Concurrency
//!
//! [`AxisLockEngine`] takes `&self` on every entry point. Samples and release
//! timeouts may arrive from different threads; all state lives behind one
//! short-held lock per engine and no two engines share anything.

#![deny(missing_docs)]

pub mod accumulator;
pub mod dominance;
pub mod engine;
pub mod error;
pub mod policy;
pub mod registry;
pub mod replay;
pub mod state;
pub mod timer;

pub use crate::engine::AxisLockEngine;
pub use crate::error::{EngineError, TraceError};
pub use crate::policy::{SuppressReason, Verdict};
pub use crate::registry::ProcessorRegistry;
pub use crate::timer::{ManualScheduler, ReleaseTimer, ThreadTimerFactory, TimerFactory};
