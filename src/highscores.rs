//! Cross-session records: best score and furthest level
//!
//! Persisted as two named scalars through a `ScalarStore`. Values are only
//! written when they improve on what is stored.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScalarStore, StoreError};

/// Store key for the best score
pub const HIGH_SCORE_KEY: &str = "highScore";
/// Store key for the furthest level reached
pub const HIGHEST_LEVEL_KEY: &str = "highestLevel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub high_score: u64,
    pub highest_level: u32,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            high_score: 0,
            highest_level: 1,
        }
    }
}

impl Records {
    /// Read records from the store. Missing or unreadable values fall back to
    /// the defaults.
    pub fn load<S: ScalarStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let high_score = read_whole(store, HIGH_SCORE_KEY, 0.0)
            .map_or(defaults.high_score, |v| v as u64);
        let highest_level = read_whole(store, HIGHEST_LEVEL_KEY, 1.0)
            .map_or(defaults.highest_level, |v| v.min(u32::MAX as f64) as u32);

        log::info!(
            "Loaded records: high score {}, highest level {}",
            high_score,
            highest_level
        );
        Self {
            high_score,
            highest_level,
        }
    }

    /// Take `score` as the new high score if it beats the current one.
    ///
    /// The in-memory record is updated even when the write fails; the error
    /// is returned for the caller to report.
    pub fn record_score<S: ScalarStore + ?Sized>(
        &mut self,
        score: u64,
        store: &mut S,
    ) -> Result<bool, StoreError> {
        if score <= self.high_score {
            return Ok(false);
        }
        log::info!("New high score {} (was {})", score, self.high_score);
        self.high_score = score;
        store.write_scalar(HIGH_SCORE_KEY, score as f64)?;
        Ok(true)
    }

    /// Take `level` as the new highest level if it goes further
    pub fn record_level<S: ScalarStore + ?Sized>(
        &mut self,
        level: u32,
        store: &mut S,
    ) -> Result<bool, StoreError> {
        if level <= self.highest_level {
            return Ok(false);
        }
        log::info!("New highest level {} (was {})", level, self.highest_level);
        self.highest_level = level;
        store.write_scalar(HIGHEST_LEVEL_KEY, level as f64)?;
        Ok(true)
    }
}

/// A stored whole number no smaller than `min`, or `None` (with a warning
/// for anything unusable)
fn read_whole<S: ScalarStore + ?Sized>(store: &S, key: &str, min: f64) -> Option<f64> {
    match store.read_scalar(key) {
        Ok(Some(value)) if value.is_finite() && value >= min => Some(value.trunc()),
        Ok(Some(value)) => {
            log::warn!("Ignoring stored {} = {}", key, value);
            None
        }
        Ok(None) => None,
        Err(err) => {
            log::warn!("Could not read {}: {}", key, err);
            None
        }
    }
}
