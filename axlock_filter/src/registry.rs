//! Processor registry.
//!
//! Builds one independent [`AxisLockEngine`] per declared processor. The
//! whole file is validated first, so either every engine is created or none.

use axlock_common::config::{ConfigError, ProcessorFileConfig, ProcessorName};
use axlock_common::consts::MAX_PROCESSORS;
use axlock_common::input::InputEvent;
use tracing::info;

use crate::engine::AxisLockEngine;
use crate::error::EngineError;
use crate::policy::Verdict;
use crate::timer::TimerFactory;

/// Named engines in declaration order.
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    processors: heapless::Vec<(ProcessorName, AxisLockEngine), MAX_PROCESSORS>,
}

impl ProcessorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `file` and build one engine per processor.
    ///
    /// # Errors
    /// `EngineError::Config` on any validation failure (no engine is built),
    /// or `EngineError::TimerSpawn` if a release timer cannot start.
    pub fn from_file_config(
        file: &ProcessorFileConfig,
        timers: &dyn TimerFactory,
    ) -> Result<Self, EngineError> {
        file.validate()?;

        let mut registry = Self::new();
        for entry in &file.processors {
            let engine = AxisLockEngine::with_timer(entry.config(), timers)?;
            registry.insert(entry.name.clone(), engine)?;
        }

        info!(
            service = %file.shared.service_name,
            count = registry.len(),
            "processor registry built"
        );
        Ok(registry)
    }

    /// Register an engine under `name`.
    ///
    /// # Errors
    /// `ConfigError::ValidationError` if the name is taken or the registry
    /// is full.
    pub fn insert(&mut self, name: ProcessorName, engine: AxisLockEngine) -> Result<(), EngineError> {
        if self.get(&name).is_some() {
            return Err(ConfigError::ValidationError(format!(
                "duplicate processor name '{name}'"
            ))
            .into());
        }
        self.processors.push((name, engine)).map_err(|(name, _)| {
            EngineError::Config(ConfigError::ValidationError(format!(
                "cannot register '{name}': more than {MAX_PROCESSORS} processors"
            )))
        })
    }

    /// Engine registered under `name`.
    pub fn get(&self, name: &str) -> Option<&AxisLockEngine> {
        self.processors
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, engine)| engine)
    }

    /// Engine registered under `name`, or `EngineError::UnknownProcessor`.
    pub fn require(&self, name: &str) -> Result<&AxisLockEngine, EngineError> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownProcessor(name.to_string()))
    }

    /// First registered engine.
    pub fn first(&self) -> Option<(&str, &AxisLockEngine)> {
        self.processors
            .first()
            .map(|(name, engine)| (name.as_str(), engine))
    }

    /// Route `event` through the engine named `name`.
    pub fn process(&self, name: &str, event: &mut InputEvent) -> Option<Verdict> {
        self.get(name).map(|engine| engine.process_sample(event))
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}
