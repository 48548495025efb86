//! Configuration File Loading
//!
//! Handles loading and saving configuration files from various locations
//! with support for multiple formats and fallback to defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::load_with_options(LoadOptions::default())
    }

    /// Load configuration with custom options
    pub fn load_with_options(options: LoadOptions) -> Result<Config> {
        let mut loader = Self::new();

        if let Some((path, config)) = loader.find_and_load_config()? {
            info!("Loaded farm config from '{}'", path.display());
            loader.current_path = Some(path);
            if options.validate {
                loader.validate_config(&config)?;
            }
            return Ok(config);
        }

        if options.create_default {
            debug!("No farm config found, using defaults");
            let config = Config::default();
            if options.validate {
                loader.validate_config(&config)?;
            }
            Ok(config)
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let loader = Self::new();
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "Configuration file does not exist".to_string(),
            });
        }
        let format = Self::format_for_path(path);
        let config = loader.load_config_file(path, format)?;
        loader.validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = match Self::format_for_path(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(config)?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| Error::ConfigParseFailed {
                    format: "TOML".to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = Self::config_path_for_format(path, *format);

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            warn!("Failed to load config from {}: {}", config_path.display(), e);
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Determine the format a path should be parsed as
    fn format_for_path(path: &Path) -> ConfigFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// Get configuration file path for a specific format
    fn config_path_for_format(base_path: &Path, format: ConfigFormat) -> PathBuf {
        let file_name = match format {
            ConfigFormat::Toml => "config.toml",
            ConfigFormat::Json => "config.json",
        };
        base_path.join(file_name)
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("wsbuild"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("wsbuild"));
            paths.push(home.join(".wsbuild"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".wsbuild"));
        }

        paths
    }

    /// Validate configuration
    fn validate_config(&self, config: &Config) -> Result<()> {
        config.validate().map_err(|e| Error::ConfigValidationFailed {
            field: e.field().to_string(),
            reason: e.to_string(),
        })
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
