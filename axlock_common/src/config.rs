//! Configuration loading traits and types.
//!
//! This module provides the per-processor [`AxisLockConfig`], the processor
//! file layout ([`ProcessorFileConfig`]) and a standardized way to load TOML
//! configuration files.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axlock_common::config::{load_processor_file, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let file = load_processor_file(Path::new("processors.toml"))?;
//!     for entry in &file.processors {
//!         println!("{}: threshold {}", entry.name, entry.threshold);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ACCUM_LIMIT, DEFAULT_SERVICE_NAME, MAX_NAME_LEN, MAX_PROCESSORS};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as a filter directive.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared by all binaries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "trackball-left"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Processor configuration ────────────────────────────────────────

/// Static parameters of one axis-lock processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisLockConfig {
    /// Minimum accumulated magnitude before any axis decision is made.
    pub threshold: u32,
    /// Sticky mode: hold a lock until `release_after_ms` of inactivity.
    #[serde(default)]
    pub sticky: bool,
    /// Inactivity timeout for sticky locks. Must be > 0 when sticky.
    #[serde(default)]
    pub release_after_ms: u32,
    /// Keep a running sum of suppressed motion per axis.
    #[serde(default)]
    pub track_remainders: bool,
}

impl AxisLockConfig {
    /// Non-sticky configuration.
    pub const fn non_sticky(threshold: u32) -> Self {
        Self {
            threshold,
            sticky: false,
            release_after_ms: 0,
            track_remainders: false,
        }
    }

    /// Sticky configuration releasing after `release_after_ms`.
    pub const fn sticky(threshold: u32, release_after_ms: u32) -> Self {
        Self {
            threshold,
            sticky: true,
            release_after_ms,
            track_remainders: false,
        }
    }

    /// Enable or disable remainder tracking.
    pub const fn with_remainders(mut self, track: bool) -> Self {
        self.track_remainders = track;
        self
    }

    /// Threshold as a signed magnitude comparable with accumulators.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    #[inline]
    pub const fn threshold_magnitude(&self) -> i32 {
        if self.threshold > ACCUM_LIMIT as u32 {
            ACCUM_LIMIT
        } else {
            self.threshold as i32
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `threshold` is zero
    /// - `threshold` exceeds the accumulator saturation bound
    /// - `sticky` is set and `release_after_ms` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::ValidationError(
                "threshold must be > 0".to_string(),
            ));
        }
        if self.threshold > ACCUM_LIMIT as u32 {
            return Err(ConfigError::ValidationError(format!(
                "threshold {} exceeds accumulator limit {ACCUM_LIMIT}",
                self.threshold
            )));
        }
        if self.sticky && self.release_after_ms == 0 {
            return Err(ConfigError::ValidationError(
                "release_after_ms must be > 0 when sticky".to_string(),
            ));
        }
        Ok(())
    }
}

/// Processor name, bounded so the registry stays allocation-free per entry.
pub type ProcessorName = heapless::String<MAX_NAME_LEN>;

/// One `[[processor]]` entry of a processor file.
///
/// # TOML Example
///
/// ```toml
/// [[processor]]
/// name = "scroll"
/// threshold = 10
/// sticky = true
/// release_after_ms = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorEntry {
    /// Unique instance name.
    pub name: ProcessorName,
    /// See [`AxisLockConfig::threshold`].
    pub threshold: u32,
    /// See [`AxisLockConfig::sticky`].
    #[serde(default)]
    pub sticky: bool,
    /// See [`AxisLockConfig::release_after_ms`].
    #[serde(default)]
    pub release_after_ms: u32,
    /// See [`AxisLockConfig::track_remainders`].
    #[serde(default)]
    pub track_remainders: bool,
}

impl ProcessorEntry {
    /// Processor parameters of this entry.
    pub fn config(&self) -> AxisLockConfig {
        AxisLockConfig {
            threshold: self.threshold,
            sticky: self.sticky,
            release_after_ms: self.release_after_ms,
            track_remainders: self.track_remainders,
        }
    }
}

/// Complete processor file: shared settings plus declared processors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorFileConfig {
    /// Shared application settings.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Declared processors, in file order.
    #[serde(rename = "processor", default)]
    pub processors: heapless::Vec<ProcessorEntry, MAX_PROCESSORS>,
}

impl ProcessorFileConfig {
    /// Parse a processor file from a TOML string (no validation).
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate shared settings, names and every processor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` on an empty or duplicate name,
    /// or on the first invalid processor (prefixed with its name).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let mut seen = HashSet::new();
        for entry in &self.processors {
            if entry.name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "processor name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate processor name '{}'",
                    entry.name
                )));
            }
            entry.config().validate().map_err(|e| match e {
                ConfigError::ValidationError(msg) => {
                    ConfigError::ValidationError(format!("processor '{}': {msg}", entry.name))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Load and validate a processor file.
pub fn load_processor_file(path: &Path) -> Result<ProcessorFileConfig, ConfigError> {
    let file = ProcessorFileConfig::load(path)?;
    file.validate()?;
    Ok(file)
}
