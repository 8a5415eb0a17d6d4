//! Gameplay settings
//!
//! Persisted separately from records as a JSON file. Every field has a
//! default, so partial files load fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading, saving or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for enemy fire and interval jitter
    pub seed: u64,

    // === Run ===
    pub starting_lives: i32,
    /// Barriers spawned per level
    pub barrier_count: usize,
    /// Ships offered during selection
    pub ship_count: usize,

    // === Combat ===
    /// Distance a linear bullet travels per tick
    pub bullet_speed: f32,
    /// Per-tick chance that a random enemy tries to fire
    pub enemy_fire_chance: f64,
    /// Minimum time between player shots (ms)
    pub player_cooldown_ms: f64,
    /// Invulnerability window after a hit (ms)
    pub invulnerability_ms: f64,

    // === Level transition ===
    pub transition_circle_ms: f64,
    pub transition_entry_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 12345,

            // Run
            starting_lives: 3,
            barrier_count: 3,
            ship_count: 4,

            // Combat
            bullet_speed: 0.5,
            enemy_fire_chance: 0.02,
            player_cooldown_ms: 300.0,
            invulnerability_ms: 2000.0,

            // Level transition
            transition_circle_ms: 3000.0,
            transition_entry_ms: 2000.0,
        }
    }
}

impl Settings {
    /// Bullet speed for this tick (halved while slow motion is on)
    pub fn effective_bullet_speed(&self, slow_motion: bool) -> f32 {
        if slow_motion {
            self.bullet_speed * 0.5
        } else {
            self.bullet_speed
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        if !(self.bullet_speed.is_finite() && self.bullet_speed > 0.0) {
            return invalid("bullet_speed", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return invalid("enemy_fire_chance", "must be within 0..=1");
        }
        if self.starting_lives <= 0 {
            return invalid("starting_lives", "must be positive");
        }
        if self.ship_count == 0 {
            return invalid("ship_count", "must be at least 1");
        }
        let durations = [
            ("player_cooldown_ms", self.player_cooldown_ms),
            ("invulnerability_ms", self.invulnerability_ms),
            ("transition_circle_ms", self.transition_circle_ms),
            ("transition_entry_ms", self.transition_entry_ms),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be a non-negative duration");
            }
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.barrier_count, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "barrier_count": 5 }"#).unwrap();
        assert_eq!(settings.barrier_count, 5);
        assert_eq!(settings.bullet_speed, 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            bullet_speed: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "bullet_speed",
                ..
            })
        ));

        let settings = Settings {
            enemy_fire_chance: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            transition_entry_ms: -1.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_slow_motion_halves_speed() {
        let settings = Settings::default();
        assert_eq!(settings.effective_bullet_speed(false), 0.5);
        assert_eq!(settings.effective_bullet_speed(true), 0.25);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!(
            "voxel-invaders-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: 7,
            ship_count: 2,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("voxel-invaders-no-such-settings.json");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
