//! TOML-based application configuration.
//!
//! Stores planner preferences including:
//! - Timeline geometry and visible hour range
//! - Task estimate defaults and bounds
//! - Reward points per completed task
//! - Clock refresh cadence
//!
//! Configuration is stored at `~/.config/dayboard/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::clock::MAX_REFRESH_SECS;
use crate::error::{ConfigError, CoreError, Result};

/// Timeline geometry and visible hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    /// Height of one stacked row; also scales the current-time marker
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    /// Rendered height per hour of task duration
    #[serde(default = "default_unit_height")]
    pub unit_height: f64,
}

/// Task creation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default = "default_estimate")]
    pub default_estimate: u32,
    #[serde(default = "default_min_estimate")]
    pub min_estimate: u32,
    #[serde(default = "default_max_estimate")]
    pub max_estimate: u32,
    /// Untimed tasks at or below this many minutes go to the quick pool
    #[serde(default = "default_quick_threshold")]
    pub quick_threshold: u32,
}

/// Rewards ledger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_points_per_task")]
    pub points_per_task: u32,
}

/// Clock refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayboard/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub tasks: TaskConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

// Default functions
fn default_start_hour() -> u32 {
    6
}
fn default_end_hour() -> u32 {
    23
}
fn default_row_height() -> f64 {
    60.0
}
fn default_min_height() -> f64 {
    50.0
}
fn default_unit_height() -> f64 {
    50.0
}
fn default_estimate() -> u32 {
    30
}
fn default_min_estimate() -> u32 {
    5
}
fn default_max_estimate() -> u32 {
    480
}
fn default_quick_threshold() -> u32 {
    15
}
fn default_points_per_task() -> u32 {
    10
}
fn default_refresh_secs() -> u64 {
    60
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            row_height: default_row_height(),
            min_height: default_min_height(),
            unit_height: default_unit_height(),
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            default_estimate: default_estimate(),
            min_estimate: default_min_estimate(),
            max_estimate: default_max_estimate(),
            quick_threshold: default_quick_threshold(),
        }
    }
}

impl TaskConfig {
    /// Clamp a user-entered estimate to `[min_estimate, max_estimate]`.
    pub fn clamp_estimate(&self, minutes: u32) -> u32 {
        let min = self.min_estimate.max(1);
        let max = self.max_estimate.max(min);
        minutes.clamp(min, max)
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            points_per_task: default_points_per_task(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timeline;
        if t.end_hour > 23 || t.start_hour > t.end_hour {
            return Err(ConfigError::InvalidValue {
                key: "timeline".into(),
                message: format!(
                    "hour range {}..={} must lie within 0..=23",
                    t.start_hour, t.end_hour
                ),
            });
        }
        for (key, value) in [
            ("timeline.row_height", t.row_height),
            ("timeline.min_height", t.min_height),
            ("timeline.unit_height", t.unit_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be a positive number".into(),
                });
            }
        }
        if self.tasks.min_estimate == 0 || self.tasks.min_estimate > self.tasks.max_estimate {
            return Err(ConfigError::InvalidValue {
                key: "tasks".into(),
                message: "estimate bounds must satisfy 1 <= min_estimate <= max_estimate".into(),
            });
        }
        if !(1..=MAX_REFRESH_SECS).contains(&self.clock.refresh_secs) {
            return Err(ConfigError::InvalidValue {
                key: "clock.refresh_secs".into(),
                message: format!("must be between 1 and {MAX_REFRESH_SECS}"),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result violates a constraint.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
