//! Guarded holder of the active configuration.
//!
//! The cell stores an `Arc` to an immutable value. Writers swap the pointer
//! under a short exclusive lock; readers clone the pointer under a shared lock
//! and release it before doing any work, so no lock is ever held across
//! parsing or composition.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

/// Errors returned when reading the cell.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigCellError {
    /// No configuration has ever been set
    #[error("not configured")]
    NotConfigured,
}

/// Holder of zero or one configuration value.
#[derive(Debug)]
pub struct ConfigCell<T> {
    current: RwLock<Option<Arc<T>>>,
}

impl<T> ConfigCell<T> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replace the held configuration, fully superseding the previous one.
    pub fn configure(&self, config: T) {
        let next = Arc::new(config);
        // The guarded value is a pointer swap, so a poisoned lock cannot hold a torn value.
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(next);
    }

    /// Return the current configuration.
    pub fn read(&self) -> Result<Arc<T>, ConfigCellError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ConfigCellError::NotConfigured)
    }

    /// Whether at least one configuration has been set.
    pub fn is_configured(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T> Default for ConfigCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
