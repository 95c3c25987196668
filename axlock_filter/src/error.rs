//! Error types.
//!
//! Sample processing itself never fails; errors only arise while building
//! engines (configuration, timer workers) or reading replay traces.

use axlock_common::config::ConfigError;
use thiserror::Error;

/// Failure to construct an engine or registry.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration rejected before any state was created.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Release timer worker could not be started.
    #[error("failed to start release timer: {0}")]
    TimerSpawn(#[from] std::io::Error),

    /// No processor with the requested name.
    #[error("unknown processor '{0}'")]
    UnknownProcessor(String),
}

/// Failure to parse a replay trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Line does not have exactly three fields.
    #[error("line {line}: expected '<t_ms> <channel> <value>'")]
    Malformed {
        /// 1-based line number.
        line: usize,
    },

    /// Timestamp is not an unsigned integer.
    #[error("line {line}: invalid timestamp '{text}'")]
    BadTimestamp {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// Channel name is not recognized.
    #[error("line {line}: unknown channel '{text}'")]
    UnknownChannel {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// Value is not a signed 32-bit integer.
    #[error("line {line}: invalid value '{text}'")]
    BadValue {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// Timestamp is earlier than the previous sample.
    #[error("line {line}: timestamp {t_ms} precedes {previous_ms}")]
    TimeWentBackwards {
        /// 1-based line number.
        line: usize,
        /// Timestamp on this line.
        t_ms: u64,
        /// Timestamp of the previous sample.
        previous_ms: u64,
    },
}
