use kafka_file_engine::cache::{DEFAULT_CLEANUP_INTERVAL_SECONDS, DEFAULT_MAX_ENTRIES};
use kafka_file_engine::{CacheOptions, PropertyCatalog, PropertyDefinition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value in config file at {config_path}: {message}")]
    ConfigValueError {
        config_path: PathBuf,
        message: String,
    },
}

/// Document cache bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Zero or negative disables expiry.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: i64,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_cleanup_interval_seconds() -> i64 {
    DEFAULT_CLEANUP_INTERVAL_SECONDS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

/// A replacement property table for one block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    pub properties: Vec<PropertyDefinition>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for `.kafka` files when no file is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_files_path: Option<PathBuf>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<PropertyTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<PropertyTable>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .validate()
            .map_err(|message| ConfigError::ConfigValueError {
                config_path: config_path.to_path_buf(),
                message,
            })?;

        // Expand shell variables and tilde in the loaded path
        config.kafka_files_path = config
            .kafka_files_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/kafka-file");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::from_seconds(self.cache.max_entries, self.cache.cleanup_interval_seconds)
    }

    /// Built-in tables, with any configured table replacing its default.
    pub fn catalog(&self) -> PropertyCatalog {
        let mut catalog = PropertyCatalog::default();
        if let Some(table) = &self.producer {
            catalog.producer = table.properties.clone();
        }
        if let Some(table) = &self.consumer {
            catalog.consumer = table.properties.clone();
        }
        catalog
    }

    fn validate(&self) -> Result<(), String> {
        if self.cache.max_entries == 0 {
            return Err("cache.max_entries must be at least 1".to_string());
        }
        for (block, table) in [("producer", &self.producer), ("consumer", &self.consumer)] {
            let Some(table) = table else { continue };
            if let Some(blank) = table.properties.iter().find(|p| p.name.trim().is_empty()) {
                return Err(format!("{block} property with blank name {:?}", blank.name));
            }
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
