//! Session configuration loaded from TOML.

use lane_defence_core::{EngagementRule, Rules};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings a director is created from. Every field is optional in TOML.
///
/// ```toml
/// seed = 7
/// engagement = "lane-ahead"
///
/// [rules]
/// starting_resources = 500.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectorConfig {
    /// Gameplay constants.
    pub rules: Rules,
    /// Seed for spawn rolls and the control bar palette. `0` when unset.
    pub seed: Option<u64>,
    /// When defenders open fire.
    pub engagement: EngagementRule,
}

impl DirectorConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rules for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;

        if !(rules.field_width > 0.0 && rules.field_height > 0.0) {
            return Err(ConfigError::invalid("field", "dimensions must be positive"));
        }
        if !(rules.cell_size > 0.0) {
            return Err(ConfigError::invalid("cell_size", "must be positive"));
        }
        if rules.lanes == 0 {
            return Err(ConfigError::invalid("lanes", "must be at least one"));
        }
        if (rules.lanes as f32 + 1.0) * rules.cell_size > rules.field_height {
            return Err(ConfigError::invalid(
                "lanes",
                "lanes below the control bar must fit the field height",
            ));
        }
        if rules.spawn_interval == 0 {
            return Err(ConfigError::invalid("spawn_interval", "must be positive"));
        }
        if rules.fire_period == 0 {
            return Err(ConfigError::invalid("fire_period", "must be positive"));
        }
        if !(rules.enemy_speed_min >= 0.0 && rules.enemy_speed_min <= rules.enemy_speed_max) {
            return Err(ConfigError::invalid(
                "enemy_speed_min",
                "must be non-negative and not exceed enemy_speed_max",
            ));
        }
        if !(rules.reward_divisor > 0.0) {
            return Err(ConfigError::invalid("reward_divisor", "must be positive"));
        }

        Ok(())
    }
}

/// Errors raised while loading a [`DirectorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or names unknown fields.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
