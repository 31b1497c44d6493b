//! Configuration management for the Launchpad CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.launchpad/config.yaml)
//!
//! The configuration describes where the capability catalog comes from and who
//! the current user is; the catalog document itself is loaded elsewhere.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to a capability catalog JSON document
    pub catalog_file: Option<PathBuf>,

    /// URL of a capability catalog JSON document
    pub catalog_url: Option<String>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Directory holding persisted state (preferences)
    pub data_dir: PathBuf,

    /// Display name of the current user
    pub user_name: Option<String>,

    /// BCP 47 locale tag of the current user
    pub user_locale: Option<String>,

    /// Group identifiers the current user belongs to
    pub groups: Vec<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    catalog: Option<CatalogConfig>,
    user: Option<UserConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogConfig {
    file: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserConfig {
    name: Option<String>,
    locale: Option<String>,
    groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            catalog_file: None,
            catalog_url: None,
            config_file: None,
            data_dir: cwd.join(".launchpad"),
            user_name: None,
            user_locale: None,
            groups: Vec::new(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `LAUNCHPAD_CATALOG`: Path to a catalog JSON file
    /// - `LAUNCHPAD_CATALOG_URL`: URL of a catalog JSON document
    /// - `LAUNCHPAD_CONFIG`: Path to config file
    /// - `LAUNCHPAD_DATA_DIR`: Directory for persisted preferences
    /// - `LAUNCHPAD_USER`: Display name of the current user
    /// - `LAUNCHPAD_LOCALE`: Locale tag of the current user
    /// - `LAUNCHPAD_GROUPS`: Comma-separated group identifiers
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(data_dir) = std::env::var("LAUNCHPAD_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(config_file) = std::env::var("LAUNCHPAD_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.data_dir.join("config.yaml")
        };

        if config_path.exists() {
            tracing::debug!("Merging config file: {:?}", config_path);
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(file) = std::env::var("LAUNCHPAD_CATALOG") {
            config.catalog_file = Some(PathBuf::from(file));
        }

        if let Ok(url) = std::env::var("LAUNCHPAD_CATALOG_URL") {
            config.catalog_url = Some(url);
        }

        if let Ok(name) = std::env::var("LAUNCHPAD_USER") {
            config.user_name = Some(name);
        }

        if let Ok(locale) = std::env::var("LAUNCHPAD_LOCALE") {
            config.user_locale = Some(locale);
        }

        if let Ok(groups) = std::env::var("LAUNCHPAD_GROUPS") {
            config.groups = groups
                .split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect();
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.apply_config_file(config_file))
    }

    /// Apply a parsed config file on top of this config.
    fn apply_config_file(&self, config_file: ConfigFile) -> Self {
        let mut result = self.clone();

        if let Some(catalog) = config_file.catalog {
            if let Some(file) = catalog.file {
                result.catalog_file = Some(PathBuf::from(file));
            }
            if let Some(url) = catalog.url {
                result.catalog_url = Some(url);
            }
        }

        if let Some(user) = config_file.user {
            if let Some(name) = user.name {
                result.user_name = Some(name);
            }
            if let Some(locale) = user.locale {
                result.user_locale = Some(locale);
            }
            if let Some(groups) = user.groups {
                result.groups = groups;
            }
        }

        if let Some(logging) = config_file.logging {
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
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        catalog_file: Option<PathBuf>,
        catalog_url: Option<String>,
        config_file: Option<PathBuf>,
        user_name: Option<String>,
        user_locale: Option<String>,
        groups: Option<Vec<String>>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(catalog_file) = catalog_file {
            self.catalog_file = Some(catalog_file);
        }

        if let Some(catalog_url) = catalog_url {
            self.catalog_url = Some(catalog_url);
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(user_name) = user_name {
            self.user_name = Some(user_name);
        }

        if let Some(user_locale) = user_locale {
            self.user_locale = Some(user_locale);
        }

        if let Some(groups) = groups {
            self.groups = groups;
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

    /// Ensure the data directory exists.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).map_err(|e| {
                AppError::Config(format!("Failed to create data directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Validate the catalog source settings.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref file) = self.catalog_file {
            if !file.exists() {
                return Err(AppError::Config(format!(
                    "Catalog file does not exist: {:?}",
                    file
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.catalog_file.is_none());
        assert!(config.catalog_url.is_none());
        assert!(config.groups.is_empty());
        assert!(!config.verbose);
        assert!(!config.no_color);
        assert!(config.data_dir.ends_with(".launchpad"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("caps.json")),
            None,
            None,
            Some("Ada".to_string()),
            Some("en-GB".to_string()),
            Some(vec!["finance".to_string()]),
            None,
            true,
            false,
        );

        assert_eq!(overridden.catalog_file, Some(PathBuf::from("caps.json")));
        assert_eq!(overridden.user_name.as_deref(), Some("Ada"));
        assert_eq!(overridden.user_locale.as_deref(), Some("en-GB"));
        assert_eq!(overridden.groups, vec!["finance".to_string()]);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_apply_config_file() {
        let yaml = r#"
catalog:
  url: "https://example.com/capabilities.json"
user:
  name: Grace
  locale: en-US
  groups:
    - engineering
logging:
  level: debug
  color: false
"#;
        let parsed: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let config = AppConfig::default().apply_config_file(parsed);

        assert_eq!(
            config.catalog_url.as_deref(),
            Some("https://example.com/capabilities.json")
        );
        assert_eq!(config.user_name.as_deref(), Some("Grace"));
        assert_eq!(config.groups, vec!["engineering".to_string()]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.no_color);
    }

    #[test]
    fn test_validate_missing_catalog_file() {
        let mut config = AppConfig::default();
        config.catalog_file = Some(PathBuf::from("/definitely/not/here.json"));
        assert!(config.validate().is_err());
    }
}
