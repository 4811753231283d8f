use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::types::error::DatabaseError;

const DEFAULT_BASE_PATH: &str = "mobilegraph";
const DEFAULT_CACHE_PAGES: usize = 2;

/// File locations and cache sizes for a graph store.
///
/// ```toml
/// base_path = "/var/lib/mobilegraph/school"
/// node_cache_pages = 16
/// label_cache_pages = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_path: PathBuf,
    pub node_cache_pages: usize,
    pub label_cache_pages: usize,
    pub property_cache_pages: usize,
    pub key_cache_pages: usize,
    pub value_cache_pages: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            node_cache_pages: DEFAULT_CACHE_PAGES,
            label_cache_pages: DEFAULT_CACHE_PAGES,
            property_cache_pages: DEFAULT_CACHE_PAGES,
            key_cache_pages: DEFAULT_CACHE_PAGES,
            value_cache_pages: DEFAULT_CACHE_PAGES,
        }
    }
}

impl StoreConfig {
    pub fn with_base_path<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, DatabaseError> {
        let config: Self = toml::from_str(contents).map_err(|e| DatabaseError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| DatabaseError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), DatabaseError> {
        let capacities = [
            ("node_cache_pages", self.node_cache_pages),
            ("label_cache_pages", self.label_cache_pages),
            ("property_cache_pages", self.property_cache_pages),
            ("key_cache_pages", self.key_cache_pages),
            ("value_cache_pages", self.value_cache_pages),
        ];
        for (name, pages) in capacities {
            if pages == 0 {
                return Err(DatabaseError::Config {
                    reason: format!("{} must be at least 1", name),
                });
            }
        }
        if self.base_path.as_os_str().is_empty() {
            return Err(DatabaseError::Config {
                reason: "base_path is empty".to_string(),
            });
        }
        Ok(())
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = self.base_path.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    pub fn node_path(&self) -> PathBuf {
        self.with_suffix(".nodestore")
    }

    pub fn label_path(&self) -> PathBuf {
        self.with_suffix(".nodestore.labels")
    }

    pub fn property_path(&self) -> PathBuf {
        self.with_suffix(".nodestore.props")
    }

    pub fn property_key_path(&self) -> PathBuf {
        self.with_suffix(".nodestore.props.keys")
    }

    pub fn property_value_path(&self) -> PathBuf {
        self.with_suffix(".nodestore.props.vals")
    }
}
