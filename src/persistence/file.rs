//! JSON file backend
//!
//! Values are cached in memory; every write rewrites the whole object to a
//! sibling `.tmp` file and renames it over the original, so a crash mid-write
//! leaves the previous contents intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{ScalarStore, StoreError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, f64>,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            log::info!("No record store at {}, starting fresh", path.display());
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScalarStore for JsonFileStore {
    fn read_scalar(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn write_scalar(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        if !value.is_finite() {
            return Err(StoreError::NonFinite(key.to_string()));
        }
        self.values.insert(key.to_string(), value);
        self.flush()?;
        log::debug!("Stored {} = {} in {}", key, value, self.path.display());
        Ok(())
    }
}
