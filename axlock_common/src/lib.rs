//! Axis-Lock Common Library
//!
//! This crate provides the shared input event model, constants and
//! configuration loading utilities for all axis-lock workspace crates.
//!
//! # Module Structure
//!
//! - [`input`] - Relative-motion event model and channel codes
//! - [`config`] - Processor configuration, validation and TOML loading
//! - [`consts`] - Numeric limits shared by every crate
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use axlock_common::prelude::*;
//!
//! let mut event = InputEvent::rel(INPUT_REL_X, 4);
//! assert_eq!(event.motion_axis(), Some(Axis::X));
//! event.value = 0;
//! ```

pub mod config;
pub mod consts;
pub mod input;
pub mod prelude;
