//! Named scalar persistence for cross-session records
//!
//! The core only ever needs "read/write a named number". Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: one JSON object on disk, rewritten via tmp + rename

pub mod file;

use std::collections::BTreeMap;

use thiserror::Error;

pub use file::JsonFileStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("refusing to store non-finite value for `{0}`")]
    NonFinite(String),
}

/// Read/write access to named numbers
pub trait ScalarStore {
    /// `Ok(None)` when the key was never written
    fn read_scalar(&self, key: &str) -> Result<Option<f64>, StoreError>;
    fn write_scalar(&mut self, key: &str, value: f64) -> Result<(), StoreError>;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

impl ScalarStore for MemoryStore {
    fn read_scalar(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn write_scalar(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        if !value.is_finite() {
            return Err(StoreError::NonFinite(key.to_string()));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: ScalarStore + ?Sized> ScalarStore for &mut S {
    fn read_scalar(&self, key: &str) -> Result<Option<f64>, StoreError> {
        (**self).read_scalar(key)
    }

    fn write_scalar(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        (**self).write_scalar(key, value)
    }
}
