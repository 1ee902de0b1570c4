//! Application Configuration
//!
//! Settings shared across the workspace:
//! - Android SDK location (with auto-detection fallback)
//! - Emulator console connection defaults

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AvdForgeError, Result};

/// Android SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Path to the Android SDK; auto-detected when unset
    pub sdk_path: Option<PathBuf>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self { sdk_path: None }
    }
}

/// Emulator console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Host the emulator console listens on
    pub host: String,
    /// Console port used when none is given on the command line
    pub default_port: u16,
    /// How long to wait for a console command to be acknowledged
    pub timeout_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            default_port: 5554,
            timeout_ms: 120_000,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Android SDK settings
    pub sdk: SdkConfig,
    /// Emulator console settings
    pub console: ConsoleConfig,
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "avdforge", "AvdForge")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from file, creating it with defaults if missing
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| AvdForgeError::Config("Cannot determine config path".into()))?;

        if config_file.exists() {
            debug!("Loading config from {:?}", config_file);
            let contents = tokio::fs::read_to_string(&config_file).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| AvdForgeError::Config("Cannot determine config path".into()))?;

        if let Some(parent) = config_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(&config_file, contents).await?;

        debug!("Config saved to {:?}", config_file);
        Ok(())
    }

    /// Get the Android SDK path, falling back to environment variables
    /// and common install locations when not configured.
    pub fn get_sdk_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.sdk.sdk_path {
            return Some(path.clone());
        }

        for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
            if let Some(path) = std::env::var_os(var).map(PathBuf::from) {
                if path.exists() {
                    return Some(path);
                }
            }
        }

        let candidates = if cfg!(windows) {
            vec![
                std::env::var_os("LOCALAPPDATA")
                    .map(|d| PathBuf::from(d).join("Android").join("Sdk")),
                Some(PathBuf::from("C:\\Android\\sdk")),
            ]
        } else {
            vec![
                std::env::var_os("HOME")
                    .map(|h| PathBuf::from(h).join("Android").join("Sdk")),
                Some(PathBuf::from("/usr/local/android-sdk")),
            ]
        };

        candidates.into_iter().flatten().find(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.console.host, "localhost");
        assert_eq!(config.console.default_port, 5554);
        assert_eq!(config.console.timeout_ms, 120_000);
        assert!(config.sdk.sdk_path.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.sdk.sdk_path = Some(PathBuf::from("/opt/android-sdk"));
        config.console.timeout_ms = 30_000;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.sdk.sdk_path, Some(PathBuf::from("/opt/android-sdk")));
        assert_eq!(parsed.console.timeout_ms, 30_000);
        assert_eq!(parsed.console.default_port, 5554);
    }

    #[test]
    fn test_explicit_sdk_path_wins() {
        let mut config = AppConfig::default();
        config.sdk.sdk_path = Some(PathBuf::from("/nonexistent/sdk"));
        assert_eq!(config.get_sdk_path(), Some(PathBuf::from("/nonexistent/sdk")));
    }
}
