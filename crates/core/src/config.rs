//! Configuration management for the paramconf CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Defaults
//! - An optional settings file (`paramconf.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The parameter definitions themselves live in a separate file, see
//! [`crate::params`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::params::ParamsConfig;

/// Default definition file, relative to the working directory.
pub const DEFAULT_PARAMS_FILE: &str = "config.params.json";

/// Default cache file, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "config.cache.json";

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "paramconf.yaml";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the parameter definition file
    pub params_file: PathBuf,

    /// Path to the local cache of last-known values
    pub cache_file: PathBuf,

    /// Optional settings file path
    pub settings_file: Option<PathBuf>,

    /// Parameter store backend ("ssm", "memory")
    pub store: String,

    /// AWS region override
    pub region: Option<String>,

    /// AWS shared-config profile override
    pub profile: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Settings file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    params_file: Option<String>,
    cache_file: Option<String>,
    store: Option<String>,
    aws: Option<AwsSettings>,
    logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AwsSettings {
    region: Option<String>,
    profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSettings {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params_file: PathBuf::from(DEFAULT_PARAMS_FILE),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            settings_file: None,
            store: "ssm".to_string(),
            region: None,
            profile: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `PARAMCONF_SETTINGS`: Path to the settings file
    /// - `PARAMCONF_PARAMS_FILE`: Path to the definition file
    /// - `PARAMCONF_CACHE_FILE`: Path to the cache file
    /// - `PARAMCONF_STORE`: Parameter store backend
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use paramconf_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Cache file: {:?}", config.cache_file);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(settings) = std::env::var("PARAMCONF_SETTINGS") {
            config.settings_file = Some(PathBuf::from(settings));
        }

        let settings_path = config
            .settings_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

        if settings_path.exists() {
            config = config.merge_yaml(&settings_path)?;
        } else if config.settings_file.is_some() {
            return Err(AppError::Config(format!(
                "Settings file does not exist: {:?}",
                settings_path
            )));
        }

        // Environment variables override the settings file
        if let Ok(params_file) = std::env::var("PARAMCONF_PARAMS_FILE") {
            config.params_file = PathBuf::from(params_file);
        }

        if let Ok(cache_file) = std::env::var("PARAMCONF_CACHE_FILE") {
            config.cache_file = PathBuf::from(cache_file);
        }

        if let Ok(store) = std::env::var("PARAMCONF_STORE") {
            config.store = store;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML settings file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read settings file {:?}: {}", path, e))
        })?;

        let settings: SettingsFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse settings file {:?}: {}", path, e))
        })?;

        Ok(self.merge_settings(settings))
    }

    fn merge_settings(&self, settings: SettingsFile) -> Self {
        let mut result = self.clone();

        if let Some(params_file) = settings.params_file {
            result.params_file = PathBuf::from(params_file);
        }

        if let Some(cache_file) = settings.cache_file {
            result.cache_file = PathBuf::from(cache_file);
        }

        if let Some(store) = settings.store {
            result.store = store;
        }

        if let Some(aws) = settings.aws {
            if aws.region.is_some() {
                result.region = aws.region;
            }
            if aws.profile.is_some() {
                result.profile = aws.profile;
            }
        }

        if let Some(logging) = settings.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        result
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the
    /// settings file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        cache_file: Option<PathBuf>,
        store: Option<String>,
        region: Option<String>,
        profile: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(cache_file) = cache_file {
            self.cache_file = cache_file;
        }

        if let Some(store) = store {
            self.store = store;
        }

        if let Some(region) = region {
            self.region = Some(region);
        }

        if let Some(profile) = profile {
            self.profile = Some(profile);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Load the parameter definitions named by this configuration.
    pub fn load_params(&self) -> AppResult<ParamsConfig> {
        ParamsConfig::load(&self.params_file)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let known_stores = ["ssm", "memory"];

        if !known_stores.contains(&self.store.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown parameter store: {}. Supported: {}",
                self.store,
                known_stores.join(", ")
            )));
        }

        if self.cache_file.as_os_str().is_empty() {
            return Err(AppError::Config("Cache file path cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.params_file, PathBuf::from("config.params.json"));
        assert_eq!(config.cache_file, PathBuf::from("config.cache.json"));
        assert_eq!(config.store, "ssm");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("/tmp/cache.json")),
            Some("memory".to_string()),
            Some("eu-west-1".to_string()),
            None,
            None,
            true,
            false,
        );

        assert_eq!(overridden.cache_file, PathBuf::from("/tmp/cache.json"));
        assert_eq!(overridden.store, "memory");
        assert_eq!(overridden.region.as_deref(), Some("eu-west-1"));
        assert!(overridden.profile.is_none());
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_keeps_explicit_level() {
        let overridden = AppConfig::default().with_overrides(
            None,
            None,
            None,
            None,
            Some("trace".to_string()),
            true,
            false,
        );
        assert_eq!(overridden.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("paramconf.yaml");
        std::fs::write(
            &path,
            r#"
cacheFile: .cache/params.json
store: memory
aws:
  region: ap-northeast-1
  profile: deploy
logging:
  level: info
  color: false
"#,
        )
        .unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.cache_file, PathBuf::from(".cache/params.json"));
        assert_eq!(merged.params_file, PathBuf::from("config.params.json"));
        assert_eq!(merged.store, "memory");
        assert_eq!(merged.region.as_deref(), Some("ap-northeast-1"));
        assert_eq!(merged.profile.as_deref(), Some("deploy"));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
        assert!(merged.no_color);
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("paramconf.yaml");
        std::fs::write(&path, "store: [unterminated").unwrap();

        assert!(AppConfig::default().merge_yaml(&path).is_err());
    }

    #[test]
    fn test_validate_unknown_store() {
        let mut config = AppConfig::default();
        config.store = "etcd".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ssm() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
