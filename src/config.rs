// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{CatalogError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_parallel_parses")]
    pub parallel_parses: usize,
}

/// Values stamped onto records the source text does not carry itself.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    pub status: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_max_file_size_mb() -> usize {
    10
}

fn default_parallel_parses() -> usize {
    4
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            parallel_parses: default_parallel_parses(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("COURSE_CATALOG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            catalog: CatalogConfig {
                data_dir: PathBuf::from("./courses"),
                extension: default_extension(),
                max_file_size_mb: default_max_file_size_mb(),
            },
            store: StoreConfig::default(),
            defaults: DefaultsConfig {
                status: Some("WIP".to_string()),
                category: None,
                year: Some("2025".to_string()),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.parallel_parses == 0 {
            return Err(CatalogError::Config(
                "parallel_parses must be greater than 0".to_string(),
            ));
        }

        if self.catalog.extension.is_empty() || self.catalog.extension.starts_with('.') {
            return Err(CatalogError::Config(
                "extension must be a bare suffix such as \"md\"".to_string(),
            ));
        }

        if self.catalog.max_file_size_mb == 0 {
            return Err(CatalogError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
