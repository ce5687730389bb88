//! Settings persistence
//!
//! Dial settings (maximum duration, sound) are saved as TOML in the
//! platform config directory. Timer state itself is never persisted.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialConfig {
    /// Upper bound of the dial, in seconds.
    pub max_duration_secs: f64,
    /// Whether the expiry alert makes noise.
    pub sound_enabled: bool,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 20.0,
            sound_enabled: true,
        }
    }
}

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Path of the settings file.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "visual-timer", "dial")
        .map(|dirs| dirs.config_dir().join("dial.toml"))
}

/// Load the saved settings.
///
/// Returns `None` if no settings file exists yet. Returns an error if the
/// file exists but can't be parsed.
pub fn load_config() -> Result<Option<DialConfig>, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: DialConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save the settings, creating the config directory if needed.
pub fn save_config(config: &DialConfig) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialConfig::default();
        assert_eq!(config.max_duration_secs, 20.0);
        assert!(config.sound_enabled);
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("dial.toml"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DialConfig {
            max_duration_secs: 45.0,
            sound_enabled: false,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: DialConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
