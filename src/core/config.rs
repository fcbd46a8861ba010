//! Simulation configuration
//!
//! Saved and loaded as RON (Rusty Object Notation) or JSON, picked by file
//! extension. Every field has a default, so a file only needs the values it
//! changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::physics::Arena;
use crate::sim::{SpawnRule, SpawnerConfig};
use crate::species::{FireflyConfig, PredatorConfig, PreyConfig};

/// Everything a simulation run is configured by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Run name, shown in logs
    pub name: String,
    /// Config version for compatibility
    pub version: u32,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub arena: Arena,
    pub spawner: SpawnerConfig,
    pub prey: PreyConfig,
    pub predator: PredatorConfig,
    pub firefly: FireflyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: String::from("Ecosystem"),
            version: 1,
            seed: None,
            arena: Arena::default(),
            spawner: SpawnerConfig::default(),
            prey: PreyConfig::default(),
            predator: PredatorConfig::default(),
            firefly: FireflyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load a config, RON or JSON depending on the extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if is_json(path) {
            Self::load_json(path)
        } else {
            Self::load_ron(path)
        }
    }

    /// Save a config, RON or JSON depending on the extension
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if is_json(path) {
            self.save_json(path)
        } else {
            self.save_ron(path)
        }
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load the config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save the config to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load the config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.arena.is_valid() {
            return Err(invalid("arena", "must have positive width and height"));
        }

        let spawner = &self.spawner;
        if spawner.area_min.x > spawner.area_max.x || spawner.area_min.y > spawner.area_max.y {
            return Err(invalid("spawner.area", "min must not exceed max"));
        }
        for (field, rule) in [
            ("spawner.prey", &spawner.prey),
            ("spawner.predator", &spawner.predator),
            ("spawner.firefly", &spawner.firefly),
        ] {
            check_rule(field, rule)?;
        }

        let prey = &self.prey;
        non_negative("prey.move_speed", prey.move_speed)?;
        range("prey.direction_interval", prey.direction_interval)?;
        non_negative("prey.shrink_rate_per_second", prey.shrink_rate_per_second)?;
        non_negative("prey.pulse_scale_boost", prey.pulse_scale_boost)?;
        non_negative("prey.pulse_up_time", prey.pulse_up_time)?;
        non_negative("prey.pulse_hold_time", prey.pulse_hold_time)?;
        non_negative("prey.pulse_down_time", prey.pulse_down_time)?;
        non_negative("prey.pulse_cooldown_duration", prey.pulse_cooldown_duration)?;
        non_negative("prey.death_pop_duration", prey.death_pop_duration)?;
        non_negative("prey.death_fade_duration", prey.death_fade_duration)?;
        non_negative("prey.collider_radius", prey.collider_radius)?;
        range("prey.base_hue", prey.base_hue)?;
        range("prey.base_saturation", prey.base_saturation)?;
        range("prey.base_value", prey.base_value)?;
        if prey.start_scale <= prey.min_scale_before_death {
            return Err(invalid(
                "prey.start_scale",
                "must be above min_scale_before_death",
            ));
        }

        let predator = &self.predator;
        non_negative("predator.rest_duration", predator.rest_duration)?;
        non_negative("predator.move_speed", predator.move_speed)?;
        non_negative("predator.attack_range", predator.attack_range)?;
        non_negative("predator.shrink_speed", predator.shrink_speed)?;
        non_negative("predator.collider_radius", predator.collider_radius)?;
        if predator.kills_to_die == 0 {
            return Err(invalid("predator.kills_to_die", "must be at least 1"));
        }

        let firefly = &self.firefly;
        non_negative("firefly.move_speed", firefly.move_speed)?;
        range("firefly.direction_interval", firefly.direction_interval)?;
        non_negative("firefly.flash_interval", firefly.flash_interval)?;
        non_negative("firefly.blink_step", firefly.blink_step)?;
        non_negative("firefly.chase_speed", firefly.chase_speed)?;
        non_negative("firefly.attract_radius", firefly.attract_radius)?;
        non_negative("firefly.follow_distance", firefly.follow_distance)?;
        non_negative("firefly.collider_radius", firefly.collider_radius)?;
        if firefly.max_flashes == 0 {
            return Err(invalid("firefly.max_flashes", "must be at least 1"));
        }
        if firefly.flash_roll_sides == 0 {
            return Err(invalid("firefly.flash_roll_sides", "must be at least 1"));
        }

        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-negative number"))
    }
}

fn range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(invalid(field, "min must not exceed max"))
    }
}

fn check_rule(field: &'static str, rule: &SpawnRule) -> Result<(), ConfigError> {
    if rule.enabled && !(rule.interval.is_finite() && rule.interval > 0.0) {
        return Err(invalid(field, "spawn interval must be positive"));
    }
    Ok(())
}

/// Errors that can occur while loading, saving or checking a config
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error
    Io(String),
    /// Deserialization error
    Parse(String),
    /// Serialization error
    Serialize(String),
    /// A value outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Serialize(e) => write!(f, "Serialization error: {e}"),
            Self::Invalid { field, reason } => write!(f, "Invalid config: {field} {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
