//! TOML-based application configuration.
//!
//! Covers the engine cadence and the pomodoro defaults hosts use when
//! creating timers. Stored at `~/.config/multitimer/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::timer::{Phase, PomodoroConfig};

/// Returns `~/.config/multitimer[-dev]/` based on MULTITIMER_ENV.
///
/// Set MULTITIMER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MULTITIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("multitimer-dev")
    } else {
        base_dir.join("multitimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Scheduler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Defaults applied when a host creates a pomodoro timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroDefaults {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_work: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/multitimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub pomodoro: PomodoroDefaults,
}

// Default functions
fn default_tick_interval_ms() -> u64 {
    20
}
fn default_work_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for PomodoroDefaults {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
            auto_start_breaks: false,
            auto_start_work: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            pomodoro: PomodoroDefaults::default(),
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as bool"),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(config)
            }
            Err(_) => {
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
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

    /// Set a config value by key and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// Scheduler cadence. A configured zero is clamped to 1 ms, which the
    /// worker's interval requires.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.engine.tick_interval_ms.max(1))
    }

    /// Pomodoro settings for a freshly created timer, positioned at the
    /// first work phase.
    pub fn pomodoro_config(&self) -> PomodoroConfig {
        PomodoroConfig {
            work_duration_ms: minutes_to_ms(self.pomodoro.work_minutes),
            short_break_duration_ms: minutes_to_ms(self.pomodoro.short_break_minutes),
            long_break_duration_ms: minutes_to_ms(self.pomodoro.long_break_minutes),
            long_break_interval: self.pomodoro.long_break_interval,
            current_cycle: 1,
            current_phase: Phase::Work,
            auto_start_breaks: self.pomodoro.auto_start_breaks,
            auto_start_work: self.pomodoro.auto_start_work,
        }
    }
}

fn minutes_to_ms(minutes: u64) -> u64 {
    minutes.saturating_mul(60).saturating_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.engine.tick_interval_ms, 20);
        assert_eq!(parsed.pomodoro.work_minutes, 25);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str("[engine]\ntick_interval_ms = 50\n").unwrap();
        assert_eq!(parsed.engine.tick_interval_ms, 50);
        assert_eq!(parsed.pomodoro.long_break_interval, 4);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let config = Config::default();
        assert_eq!(config.get("engine.tick_interval_ms").as_deref(), Some("20"));
        assert_eq!(config.get("pomodoro.auto_start_breaks").as_deref(), Some("false"));
        assert!(config.get("pomodoro.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "pomodoro.work_minutes", "50").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "pomodoro.work_minutes").unwrap(),
            &serde_json::Value::Number(50.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "pomodoro.auto_start_work", "true").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "pomodoro.auto_start_work").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "engine.nonexistent_key", "1");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "engine.tick_interval_ms", "not_a_number");
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.engine.tick_interval_ms = 100;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.engine.tick_interval_ms, 100);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.engine.tick_interval_ms, 20);
        assert!(path.exists());
    }

    #[test]
    fn tick_interval_clamps_zero() {
        let mut config = Config::default();
        config.engine.tick_interval_ms = 0;
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn pomodoro_config_converts_minutes() {
        let config = Config::default();
        let pomodoro = config.pomodoro_config();
        assert_eq!(pomodoro.work_duration_ms, 25 * 60 * 1000);
        assert_eq!(pomodoro.short_break_duration_ms, 5 * 60 * 1000);
        assert_eq!(pomodoro.long_break_duration_ms, 15 * 60 * 1000);
        assert_eq!(pomodoro.current_cycle, 1);
        assert_eq!(pomodoro.current_phase, Phase::Work);
    }
}
