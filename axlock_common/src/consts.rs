//! Workspace-wide constants.
//!
//! Single source of truth for numeric limits. Imported by all crates.

use static_assertions::const_assert;

/// Saturation bound for signed accumulators and remainders.
///
/// Half of `i32::MAX`, so a single `i32` delta can never push an
/// intermediate sum past the representable range.
pub const ACCUM_LIMIT: i32 = i32::MAX / 2;

/// Maximum number of processors declared in one configuration file.
pub const MAX_PROCESSORS: usize = 16;

/// Maximum length of a processor name.
pub const MAX_NAME_LEN: usize = 32;

/// Default service name used when `[shared]` is omitted.
pub const DEFAULT_SERVICE_NAME: &str = "axlock";

const_assert!(ACCUM_LIMIT > 0);
const_assert!((ACCUM_LIMIT as i64) * 2 < i64::MAX);
const_assert!(-(ACCUM_LIMIT as i64) > i32::MIN as i64);
const_assert!(MAX_PROCESSORS > 0);
const_assert!(MAX_NAME_LEN >= 8);
